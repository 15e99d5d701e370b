use lazy_static::lazy_static;
use regex::Regex;
use sqlx::SqlitePool;
use tower_sessions::Session;
use tracing::{error, info, warn};

use super::password::{hash_password, verify_password};
use super::repo_types::User;
use crate::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 10;

/// Session key holding the logged-in email.
pub const SESSION_USER_KEY: &str = "username";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Length is checked before the confirmation, so a short password reports as weak
/// even when the two fields differ.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::WeakPassword);
    }
    if password != confirm {
        return Err(AppError::PasswordMismatch);
    }
    Ok(())
}

pub async fn register(
    db: &SqlitePool,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<User, AppError> {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::InvalidEmail);
    }

    if let Err(e) = validate_new_password(password, confirm) {
        warn!(email = %email, reason = %e, "registration rejected");
        return Err(e);
    }

    if User::find_by_email(db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::EmailTaken);
    }

    let hash = hash_password(password)?;
    let user = User::create(db, &email, &hash).await?;
    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(user)
}

pub async fn authenticate(db: &SqlitePool, email: &str, password: &str) -> Result<User, AppError> {
    let email = normalize_email(email);

    let Some(user) = User::find_by_email(db, &email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::UnknownUser);
    };

    let ok = verify_password(password, &user.password_hash).map_err(|e| {
        error!(error = %e, user_id = user.id, "verify_password failed");
        AppError::Internal(e)
    })?;
    if !ok {
        warn!(email = %email, user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(user)
}

/// Bind `email` to the session under a fresh id.
pub async fn start_session(session: &Session, email: &str) -> Result<(), AppError> {
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("cycle session id: {e}")))?;
    session
        .insert(SESSION_USER_KEY, email)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("store session user: {e}")))?;
    Ok(())
}

pub async fn end_session(session: &Session) -> Result<(), AppError> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("flush session: {e}")))
}
