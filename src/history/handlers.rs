use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use tracing::{error, instrument};

use super::{dto::GenerateForm, repo, services::generate_for};
use crate::{auth::extractors::CurrentUser, error::AppError, state::AppState, views};

pub fn sieve_routes() -> Router<AppState> {
    Router::new().route("/generate_sieve", get(generate_page).post(generate))
}

pub fn history_routes() -> Router<AppState> {
    Router::new().route("/history", get(list_history))
}

#[instrument(skip_all, fields(user = %user.0))]
pub async fn generate_page(State(state): State<AppState>, user: CurrentUser) -> Html<String> {
    Html(views::sieve_page(&user.0, state.config.sieve.max_number, None, None))
}

#[instrument(skip_all, fields(user = %user.0))]
pub async fn generate(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<GenerateForm>,
) -> Result<Response, AppError> {
    let max = state.config.sieve.max_number;
    match generate_for(&state, &user.0, &form.number).await {
        Ok((artifacts, _entry)) => {
            Ok(Html(views::sieve_page(&user.0, max, Some(&artifacts), None)).into_response())
        }
        Err(e @ AppError::InvalidInput(_)) => Ok((
            e.status(),
            Html(views::sieve_page(&user.0, max, None, Some(&e.user_message()))),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

#[instrument(skip_all, fields(user = %user.0))]
pub async fn list_history(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, AppError> {
    let entries = repo::list_by_owner(&state.db, &user.0).await.map_err(|e| {
        error!(error = %e, "list history failed");
        AppError::Internal(e)
    })?;
    Ok(Html(views::history_page(&user.0, &entries)))
}
