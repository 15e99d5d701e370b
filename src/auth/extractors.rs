use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use tracing::debug;

use super::services::SESSION_USER_KEY;
use crate::error::AppError;

/// Email of the logged-in user. Rejects with a redirect to the login page.
pub struct CurrentUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(anyhow::anyhow!(msg)))?;

        let email = session
            .get::<String>(SESSION_USER_KEY)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("read session: {e}")))?;

        match email {
            Some(email) => Ok(CurrentUser(email)),
            None => {
                debug!(uri = %parts.uri, "no session, redirecting to login");
                Err(AppError::Unauthenticated)
            }
        }
    }
}
