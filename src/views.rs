//! Server-rendered HTML pages.

use time::{macros::format_description, OffsetDateTime};

use crate::auth::services::MIN_PASSWORD_LEN;
use crate::history::{repo::HistoryEntry, services::SieveArtifacts};
use crate::images::png_data_uri;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn base_style() -> &'static str {
    r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        background: #f5f5f5; color: #333; padding: 24px;
    }
    .card {
        background: #fff; border-radius: 12px; padding: 28px; margin: 0 auto 20px;
        max-width: 960px; box-shadow: 0 4px 24px rgba(0,0,0,0.08);
    }
    .card.narrow { max-width: 420px; }
    h1 { font-size: 24px; margin-bottom: 16px; color: #1a1a2e; }
    h2 { font-size: 18px; margin: 12px 0; }
    .form-group { margin-bottom: 14px; }
    .form-group label { display: block; font-size: 14px; margin-bottom: 6px; color: #444; }
    .form-group input {
        width: 100%; padding: 10px 12px; border: 1.5px solid #ddd;
        border-radius: 8px; font-size: 16px;
    }
    .btn {
        padding: 12px 20px; border: none; border-radius: 8px; font-size: 15px;
        font-weight: 600; cursor: pointer; background: #4a6cf7; color: #fff;
    }
    .error { background: #fff0f0; color: #d32f2f; padding: 10px 14px; border-radius: 8px; font-size: 14px; margin-bottom: 14px; }
    .nav { margin-bottom: 16px; font-size: 14px; }
    .nav a { color: #4a6cf7; margin-right: 14px; text-decoration: none; }
    .menu li { list-style: none; padding: 8px 0; }
    .menu a { color: #4a6cf7; }
    .sieve img { max-width: 100%; border: 1px solid #eee; }
    pre.ascii { font-size: 8px; line-height: 8px; overflow-x: auto; background: #fafafa; padding: 8px; }
    .meta { color: #888; font-size: 13px; }
    "#
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head><body>
{body}
</body></html>"#,
        title = escape(title),
        style = base_style(),
    )
}

fn error_box(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<div class="error">{}</div>"#, escape(e)))
        .unwrap_or_default()
}

fn nav(email: &str) -> String {
    format!(
        r#"<div class="nav">Signed in as <b>{}</b> &middot; <a href="/menu">Menu</a><a href="/generate_sieve">Generate</a><a href="/history">History</a><a href="/logout">Log out</a></div>"#,
        escape(email)
    )
}

pub fn login_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<div class="card narrow">
  <h1>Sign in</h1>
  {error}
  <form method="POST" action="/">
    <div class="form-group">
      <label>Email</label>
      <input type="email" name="email" required autocomplete="username">
    </div>
    <div class="form-group">
      <label>Password</label>
      <input type="password" name="password" required autocomplete="current-password">
    </div>
    <button type="submit" class="btn">Log in</button>
  </form>
  <p class="meta" style="margin-top:14px">No account? <a href="/register">Register</a></p>
</div>"#,
        error = error_box(error),
    );
    page("Sign in", &body)
}

pub fn register_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<div class="card narrow">
  <h1>Register</h1>
  {error}
  <form method="POST" action="/register">
    <div class="form-group">
      <label>Email</label>
      <input type="email" name="email" required autocomplete="username">
    </div>
    <div class="form-group">
      <label>Password (min {min} characters)</label>
      <input type="password" name="password" required minlength="{min}" autocomplete="new-password">
    </div>
    <div class="form-group">
      <label>Confirm password</label>
      <input type="password" name="confirm_password" required minlength="{min}" autocomplete="new-password">
    </div>
    <button type="submit" class="btn">Create account</button>
  </form>
  <p class="meta" style="margin-top:14px">Already registered? <a href="/">Sign in</a></p>
</div>"#,
        error = error_box(error),
        min = MIN_PASSWORD_LEN,
    );
    page("Register", &body)
}

pub fn menu_page(email: &str) -> String {
    let body = format!(
        r#"<div class="card narrow">
  <h1>Welcome, {email}</h1>
  <ul class="menu">
    <li><a href="/generate_sieve">Generate a sieve of Eratosthenes</a></li>
    <li><a href="/history">My history</a></li>
    <li><a href="/logout">Log out</a></li>
  </ul>
</div>"#,
        email = escape(email),
    );
    page("Menu", &body)
}

pub fn sieve_page(
    email: &str,
    max_number: u32,
    result: Option<&SieveArtifacts>,
    error: Option<&str>,
) -> String {
    let result_html = result
        .map(|r| {
            format!(
                r#"<div class="card sieve">
  <h2>N = {n} &middot; {count} primes</h2>
  <img alt="Sieve of Eratosthenes up to {n}" src="{src}">
  <h2>ASCII</h2>
  <pre class="ascii">{ascii}</pre>
</div>"#,
                n = r.number,
                count = r.prime_count,
                src = png_data_uri(&r.png),
                ascii = escape(&r.ascii),
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<div class="card">
  {nav}
  <h1>Sieve of Eratosthenes</h1>
  {error}
  <form method="POST" action="/generate_sieve">
    <div class="form-group">
      <label>Upper bound N (0 to {max})</label>
      <input type="number" name="number" min="0" max="{max}" required>
    </div>
    <button type="submit" class="btn">Generate</button>
  </form>
</div>
{result_html}"#,
        nav = nav(email),
        error = error_box(error),
        max = max_number,
    );
    page("Generate sieve", &body)
}

fn format_timestamp(unix: i64) -> String {
    OffsetDateTime::from_unix_timestamp(unix)
        .ok()
        .and_then(|t| {
            t.format(format_description!("[year]-[month]-[day] [hour]:[minute] UTC"))
                .ok()
        })
        .unwrap_or_default()
}

pub fn history_page(email: &str, entries: &[HistoryEntry]) -> String {
    let items = if entries.is_empty() {
        r#"<p class="meta">No sieves generated yet.</p>"#.to_string()
    } else {
        entries
            .iter()
            .map(|e| {
                format!(
                    r#"<div class="card sieve">
  <h2>N = {n}</h2>
  <p class="meta">{when}</p>
  <img alt="Sieve of Eratosthenes up to {n}" src="{src}">
  <pre class="ascii">{ascii}</pre>
</div>"#,
                    n = e.number,
                    when = format_timestamp(e.created_at),
                    src = png_data_uri(&e.image),
                    ascii = escape(&e.ascii_art),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = format!(
        r#"<div class="card">
  {nav}
  <h1>History</h1>
</div>
{items}"#,
        nav = nav(email),
    );
    page("History", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        r#"<div class="card narrow">
  <h1>Oops</h1>
  {error}
  <p class="meta"><a href="/">Back to sign in</a></p>
</div>"#,
        error = error_box(Some(message)),
    );
    page("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn emails_are_escaped_in_pages() {
        let html = menu_page("<b>@x.com");
        assert!(html.contains("&lt;b&gt;@x.com"));
        assert!(!html.contains("<b>@x.com"));
    }

    #[test]
    fn timestamps_render_in_utc() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00 UTC");
    }

    #[test]
    fn login_page_shows_error_only_when_given() {
        assert!(!login_page(None).contains(r#"class="error""#));
        assert!(login_page(Some("Wrong password.")).contains("Wrong password."));
    }
}
