use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::error;

use crate::auth::services::MIN_PASSWORD_LEN;
use crate::views;

/// Failures surfaced at the request boundary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Wrong password. Please try again.")]
    InvalidCredentials,
    #[error("User not found. Please register first.")]
    UnknownUser,
    #[error("Password must be at least {} characters long.", MIN_PASSWORD_LEN)]
    WeakPassword,
    #[error("Passwords do not match. Please try again.")]
    PasswordMismatch,
    #[error("Invalid email address.")]
    InvalidEmail,
    #[error("This email is already registered.")]
    EmailTaken,
    #[error("{0}")]
    InvalidInput(String),
    #[error("authentication required")]
    Unauthenticated,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials | AppError::UnknownUser => StatusCode::UNAUTHORIZED,
            AppError::WeakPassword
            | AppError::PasswordMismatch
            | AppError::InvalidEmail
            | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::EmailTaken => StatusCode::CONFLICT,
            AppError::Unauthenticated => StatusCode::SEE_OTHER,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the user. Internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal(_) => "Something went wrong. Please try again later.".into(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => Redirect::to("/").into_response(),
            AppError::Internal(ref e) => {
                error!(error = ?e, "internal error");
                (self.status(), Html(views::error_page(&self.user_message()))).into_response()
            }
            other => (other.status(), Html(views::error_page(&other.user_message()))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_password_message_mentions_minimum() {
        assert_eq!(
            AppError::WeakPassword.to_string(),
            "Password must be at least 10 characters long."
        );
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = AppError::Internal(anyhow::anyhow!("disk I/O error at /var/db"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.user_message().contains("/var/db"));
    }

    #[test]
    fn unauthenticated_redirects_to_login() {
        let res = AppError::Unauthenticated.into_response();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()["location"], "/");
    }
}
