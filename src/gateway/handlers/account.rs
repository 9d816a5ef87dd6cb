//! Account management endpoints

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::account::{Account, AccountService, AccountServiceError};
use crate::auth::Claims;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiRejection, ApiResponse, error_codes, reject};

// --- Requests ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Currency class: LOCAL, FOREIGN or COMMODITY
    #[schema(example = "LOCAL")]
    pub account_type: String,
    #[schema(example = "checking")]
    pub name: String,
    /// Starting balance, defaults to 0.00
    #[schema(example = "500.00")]
    pub initial_balance: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchAccountsRequest {
    pub number: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    #[schema(example = "savings")]
    pub name: String,
}

// --- Responses ---

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub account_id: Uuid,
    pub account_number: String,
    #[schema(example = "LOCAL")]
    pub account_type: String,
    pub name: String,
    #[schema(example = "500.00")]
    pub balance: String,
    pub created_at: DateTime<Utc>,
}

impl AccountResponse {
    fn from_account(account: &Account) -> Self {
        Self {
            account_id: account.account_id,
            account_number: account.account_number.clone(),
            account_type: account.currency.as_str().to_string(),
            name: account.name.clone(),
            balance: format!("{:.2}", account.balance),
            created_at: account.created_at,
        }
    }
}

fn account_rejection(e: AccountServiceError) -> ApiRejection {
    let (status, code) = match &e {
        AccountServiceError::NotFound => (StatusCode::NOT_FOUND, error_codes::ACCOUNT_NOT_FOUND),
        AccountServiceError::InvalidCurrency(_)
        | AccountServiceError::NegativeInitialBalance
        | AccountServiceError::InvalidName => {
            (StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER)
        }
        AccountServiceError::NonZeroBalance => (
            StatusCode::UNPROCESSABLE_ENTITY,
            error_codes::NON_ZERO_BALANCE,
        ),
        AccountServiceError::Store(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
        ),
    };
    reject(status, code, e.to_string())
}

// --- Handlers ---

/// Open a new account for the authenticated user
///
/// POST /api/v1/accounts
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account created", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Authentication failed")
    ),
    security(("bearer_jwt" = [])),
    tag = "Account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiRejection> {
    let user_id = claims.sub.parse::<i64>().unwrap_or_default();

    let initial_balance = match &req.initial_balance {
        Some(s) => Some(Decimal::from_str(s).map_err(|_| {
            reject(
                StatusCode::BAD_REQUEST,
                error_codes::INVALID_PARAMETER,
                "Invalid initial balance format",
            )
        })?),
        None => None,
    };

    match AccountService::open(
        &state.db,
        user_id,
        &req.account_type,
        &req.name,
        initial_balance,
    )
    .await
    {
        Ok(account) => Ok(Json(ApiResponse::success(AccountResponse::from_account(
            &account,
        )))),
        Err(e) => Err(account_rejection(e)),
    }
}

/// Search the authenticated user's accounts
///
/// POST /api/v1/accounts/search
#[utoipa::path(
    post,
    path = "/api/v1/accounts/search",
    request_body = SearchAccountsRequest,
    responses(
        (status = 200, description = "Matching accounts", body = ApiResponse<Vec<AccountResponse>>),
        (status = 401, description = "Authentication failed")
    ),
    security(("bearer_jwt" = [])),
    tag = "Account"
)]
pub async fn search_accounts(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SearchAccountsRequest>,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, ApiRejection> {
    let user_id = claims.sub.parse::<i64>().unwrap_or_default();

    match AccountService::search(
        &state.db,
        user_id,
        req.number.as_deref(),
        req.name.as_deref(),
    )
    .await
    {
        Ok(accounts) => Ok(Json(ApiResponse::success(
            accounts.iter().map(AccountResponse::from_account).collect(),
        ))),
        Err(e) => Err(account_rejection(e)),
    }
}

/// Get details of one account
///
/// GET /api/v1/accounts/{account_id}
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}",
    params(
        ("account_id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account details", body = ApiResponse<AccountResponse>),
        (status = 401, description = "Authentication failed"),
        (status = 404, description = "Account not found or access denied")
    ),
    security(("bearer_jwt" = [])),
    tag = "Account"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiRejection> {
    let user_id = claims.sub.parse::<i64>().unwrap_or_default();

    match AccountService::get(&state.db, user_id, account_id).await {
        Ok(account) => Ok(Json(ApiResponse::success(AccountResponse::from_account(
            &account,
        )))),
        Err(e) => Err(account_rejection(e)),
    }
}

/// Rename an account
///
/// PUT /api/v1/accounts/{account_id}
#[utoipa::path(
    put,
    path = "/api/v1/accounts/{account_id}",
    params(
        ("account_id" = Uuid, Path, description = "Account ID")
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Invalid name"),
        (status = 401, description = "Authentication failed"),
        (status = 404, description = "Account not found or access denied")
    ),
    security(("bearer_jwt" = [])),
    tag = "Account"
)]
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(account_id): Path<Uuid>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiRejection> {
    let user_id = claims.sub.parse::<i64>().unwrap_or_default();

    match AccountService::rename(&state.db, user_id, account_id, &req.name).await {
        Ok(account) => Ok(Json(ApiResponse::success(AccountResponse::from_account(
            &account,
        )))),
        Err(e) => Err(account_rejection(e)),
    }
}

/// Close an account (balance must be zero)
///
/// DELETE /api/v1/accounts/{account_id}
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{account_id}",
    params(
        ("account_id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account closed", body = ApiResponse<String>),
        (status = 401, description = "Authentication failed"),
        (status = 404, description = "Account not found or access denied"),
        (status = 422, description = "Balance is not zero")
    ),
    security(("bearer_jwt" = [])),
    tag = "Account"
)]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<ApiResponse<String>>, ApiRejection> {
    let user_id = claims.sub.parse::<i64>().unwrap_or_default();

    match AccountService::close(&state.db, user_id, account_id).await {
        Ok(()) => Ok(Json(ApiResponse::success("Account closed".to_string()))),
        Err(e) => Err(account_rejection(e)),
    }
}
