use axum::{
    extract::{FromRef, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{
            ForgotPasswordRequest, LoginRequest, MessageResponse, PublicAccount, RegisterRequest,
            TokenResponse,
        },
        extractors::AuthUser,
        jwt::JwtKeys,
        services,
    },
    error::{AppError, AppResult, MessageError},
    extract::ApiJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/forgotpassword", put(forgot_password))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> AppResult<Json<TokenResponse>> {
    let keys = JwtKeys::from_ref(&state);
    let token = services::register(state.accounts.as_ref(), &keys, payload).await?;
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let keys = JwtKeys::from_ref(&state);
    let token = services::login(state.accounts.as_ref(), &keys, payload).await?;
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    payload: Result<ApiJson<ForgotPasswordRequest>, AppError>,
) -> Result<Json<MessageResponse>, MessageError> {
    let ApiJson(payload) = payload?;
    services::reset_password(state.accounts.as_ref(), payload).await?;
    Ok(Json(MessageResponse::new("Password updated successfully")))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(account_id): AuthUser,
) -> AppResult<Json<PublicAccount>> {
    let account = services::current_account(state.accounts.as_ref(), account_id).await?;
    Ok(Json(account.into()))
}
