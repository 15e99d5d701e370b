use anyhow::Context;
use bytes::Bytes;
use tracing::{info, warn};

use super::repo::{self, HistoryEntry};
use crate::{error::AppError, images::ascii, sieve, state::AppState};

/// Output of one sieve run, ready to store or display.
#[derive(Debug, Clone)]
pub struct SieveArtifacts {
    pub number: u32,
    pub prime_count: usize,
    pub png: Bytes,
    pub ascii: String,
}

/// Parse the submitted bound. Accepts surrounding whitespace, nothing else.
pub fn parse_number(raw: &str, max: u32) -> Result<u32, AppError> {
    let n: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput("Please enter a whole number.".into()))?;
    if n < 0 {
        return Err(AppError::InvalidInput("The number must not be negative.".into()));
    }
    if n > i64::from(max) {
        return Err(AppError::InvalidInput(format!(
            "The number must be at most {max}."
        )));
    }
    Ok(n as u32)
}

/// Sieve, render, convert. CPU bound; call from a blocking thread.
pub fn run_pipeline(number: u32) -> anyhow::Result<SieveArtifacts> {
    let n = number as usize;
    let primes = sieve::primes_up_to(n);
    let png = sieve::render_sieve(n, &primes)?;
    let ascii = ascii::image_to_ascii(&png)?;
    Ok(SieveArtifacts {
        number,
        prime_count: primes.len(),
        png,
        ascii,
    })
}

/// Validate `raw`, run the pipeline and record the result for `owner`.
/// Nothing is stored unless every stage succeeds.
pub async fn generate_for(
    st: &AppState,
    owner: &str,
    raw: &str,
) -> Result<(SieveArtifacts, HistoryEntry), AppError> {
    let number = parse_number(raw, st.config.sieve.max_number).inspect_err(|e| {
        warn!(owner, input = raw, reason = %e, "rejected sieve input");
    })?;

    let artifacts = tokio::task::spawn_blocking(move || run_pipeline(number))
        .await
        .context("sieve worker panicked")??;

    let entry = repo::insert(&st.db, owner, number, &artifacts.png, &artifacts.ascii).await?;
    info!(
        owner,
        number,
        primes = artifacts.prime_count,
        entry_id = entry.id,
        "sieve generated"
    );
    Ok((artifacts, entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn parse_accepts_whole_numbers_in_range() {
        assert_eq!(parse_number("30", 100).unwrap(), 30);
        assert_eq!(parse_number(" 0 ", 100).unwrap(), 0);
        assert_eq!(parse_number("100", 100).unwrap(), 100);
    }

    #[test]
    fn parse_rejects_bad_input() {
        for raw in ["", "abc", "3.5", "1e3", "-1", "101", "99999999999999999999999"] {
            assert!(
                matches!(parse_number(raw, 100), Err(AppError::InvalidInput(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn pipeline_outputs_agree_with_each_other() {
        let out = run_pipeline(30).unwrap();
        assert_eq!(out.prime_count, 10);
        assert_eq!(out.ascii, ascii::image_to_ascii(&out.png).unwrap());
    }

    #[test]
    fn pipeline_handles_tiny_bounds() {
        for n in [0, 1, 2] {
            let out = run_pipeline(n).unwrap();
            assert!(!out.png.is_empty());
        }
    }

    #[tokio::test]
    async fn generate_records_history() {
        let st = AppState::fake().await;
        let (artifacts, entry) = generate_for(&st, "a@example.com", "30").await.unwrap();
        assert_eq!(entry.number, 30);
        assert_eq!(entry.owner_email, "a@example.com");
        assert_eq!(entry.image, artifacts.png.to_vec());
        assert_eq!(entry.ascii_art, artifacts.ascii);
    }

    #[tokio::test]
    async fn invalid_input_stores_nothing() {
        let st = AppState::fake().await;
        let err = generate_for(&st, "a@example.com", "lots").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        let too_big = (st.config.sieve.max_number + 1).to_string();
        assert!(generate_for(&st, "a@example.com", &too_big).await.is_err());
        assert!(repo::list_by_owner(&st.db, "a@example.com").await.unwrap().is_empty());
    }
}
