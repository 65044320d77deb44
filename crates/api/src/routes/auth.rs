//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::user::{CurrentUser, User};
use crate::services::AuthService;
use crate::state::AppState;

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Auth status response.
#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<CurrentUser>,
}

/// Register a new account and log it in.
///
/// POST /api/auth/register
#[instrument(skip_all, fields(username = %request.username))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = AuthService::new(state.pool())
        .register(&request.username, &request.email, &request.password)
        .await?;

    set_current_user(&session, &CurrentUser::from(&user)).await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email and password.
///
/// POST /api/auth/login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<User>> {
    let user = AuthService::new(state.pool())
        .login(&request.email, &request.password)
        .await?;

    // Rotate the session id on privilege change
    session.cycle_id().await?;
    set_current_user(&session, &CurrentUser::from(&user)).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(user))
}

/// Logout the current session.
///
/// POST /api/auth/logout
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The current user's profile.
///
/// GET /api/auth/me
pub async fn me(RequireAuth(user): RequireAuth) -> Json<CurrentUser> {
    Json(user)
}

/// Lightweight auth status probe for the frontend.
///
/// GET /api/auth/check
pub async fn check(OptionalAuth(user): OptionalAuth) -> Json<AuthStatus> {
    Json(AuthStatus {
        authenticated: user.is_some(),
        user,
    })
}
