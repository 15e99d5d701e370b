use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    auth::{dto::{LoginForm, RegisterForm}, extractors::CurrentUser, services},
    error::AppError,
    state::AppState,
    views,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/logout", get(logout))
}

pub fn menu_routes() -> Router<AppState> {
    Router::new().route("/menu", get(menu))
}

pub async fn login_page() -> Html<String> {
    Html(views::login_page(None))
}

#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match services::authenticate(&state.db, &form.email, &form.password).await {
        Ok(user) => {
            services::start_session(&session, &user.email).await?;
            Ok(Redirect::to("/menu").into_response())
        }
        Err(AppError::Internal(e)) => Err(AppError::Internal(e)),
        Err(e) => Ok((e.status(), Html(views::login_page(Some(&e.user_message())))).into_response()),
    }
}

pub async fn register_page() -> Html<String> {
    Html(views::register_page(None))
}

#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    match services::register(&state.db, &form.email, &form.password, &form.confirm_password).await {
        Ok(user) => {
            services::start_session(&session, &user.email).await?;
            Ok(Redirect::to("/menu").into_response())
        }
        Err(AppError::Internal(e)) => Err(AppError::Internal(e)),
        Err(e) => {
            Ok((e.status(), Html(views::register_page(Some(&e.user_message())))).into_response())
        }
    }
}

#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    services::end_session(&session).await?;
    Ok(Redirect::to("/"))
}

#[instrument(skip_all, fields(user = %user.0))]
pub async fn menu(user: CurrentUser) -> Html<String> {
    Html(views::menu_page(&user.0))
}
