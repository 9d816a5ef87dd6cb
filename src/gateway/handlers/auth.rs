//! Registration and login endpoints (public)

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::{AuthError, AuthResponse, LoginRequest, RegisterRequest};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiRejection, ApiResponse, error_codes, reject};

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub user_id: i64,
}

fn auth_rejection(e: AuthError) -> ApiRejection {
    let (status, code) = match &e {
        AuthError::UserAlreadyExists => (StatusCode::CONFLICT, error_codes::USER_EXISTS),
        AuthError::InvalidCredentials | AuthError::TokenInvalid => {
            (StatusCode::UNAUTHORIZED, error_codes::AUTH_FAILED)
        }
        AuthError::Hash(_) | AuthError::Store(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
        ),
    };
    reject(status, code, e.to_string())
}

/// Register a new user
///
/// POST /api/v1/auth/register
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = ApiResponse<RegisterResponse>),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Username or email already taken")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>, ApiRejection> {
    req.validate().map_err(|e| {
        reject(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            e.to_string(),
        )
    })?;

    match state.user_auth.register(req).await {
        Ok(user_id) => Ok(Json(ApiResponse::success(RegisterResponse { user_id }))),
        Err(e) => Err(auth_rejection(e)),
    }
}

/// Login and receive a JWT
///
/// POST /api/v1/auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid email or password")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiRejection> {
    req.validate().map_err(|e| {
        reject(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            e.to_string(),
        )
    })?;

    match state.user_auth.login(req).await {
        Ok(resp) => Ok(Json(ApiResponse::success(resp))),
        Err(e) => Err(auth_rejection(e)),
    }
}
