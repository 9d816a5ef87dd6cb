//! Transfer endpoints: execute, balance lookup, history

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

use crate::auth::{Claims, OwnershipError, ensure_owner};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiRejection, ApiResponse, error_codes, reject};
use crate::transfer::{HistoryEntry, TransactionRecord, TransferError, TransferService};

// --- Requests ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferApiRequest {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub from_account_id: Uuid,
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub to_account_id: Uuid,
    /// String to avoid float precision issues in JSON
    #[schema(example = "100.50")]
    pub amount: String,
}

// --- Responses ---

#[derive(Debug, Serialize, ToSchema)]
pub struct TransferApiResponse {
    pub transaction_id: i64,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    pub amount: String,
    #[schema(example = "SUCCESS")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[schema(example = "Transfer completed successfully")]
    pub message: String,
}

impl TransferApiResponse {
    fn from_record(record: &TransactionRecord) -> Self {
        Self {
            transaction_id: record.transaction_id,
            from_account_id: record.from_account_id,
            to_account_id: record.to_account_id,
            amount: format!("{:.2}", record.amount),
            status: record.status.as_str().to_string(),
            created_at: record.created_at,
            message: "Transfer completed successfully".to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    pub account_id: Uuid,
    #[schema(example = "399.50")]
    pub balance: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryEntryResponse {
    pub transaction_id: i64,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    pub amount: String,
    #[schema(example = "SUCCESS")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[schema(example = "OUTGOING")]
    pub direction: String,
    pub counterparty_account_id: Uuid,
}

impl HistoryEntryResponse {
    fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            transaction_id: entry.transaction_id,
            from_account_id: entry.from_account_id,
            to_account_id: entry.to_account_id,
            amount: format!("{:.2}", entry.amount),
            status: entry.status.as_str().to_string(),
            created_at: entry.created_at,
            direction: entry.direction.as_str().to_string(),
            counterparty_account_id: entry.counterparty_account_id,
        }
    }
}

fn transfer_rejection(e: &TransferError) -> ApiRejection {
    let (status, code) = match e {
        TransferError::InvalidAmount => (StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER),
        TransferError::SameAccount => (StatusCode::BAD_REQUEST, error_codes::SAME_ACCOUNT),
        TransferError::AccountNotFound { .. } => {
            (StatusCode::NOT_FOUND, error_codes::ACCOUNT_NOT_FOUND)
        }
        TransferError::CurrencyMismatch { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            error_codes::CURRENCY_MISMATCH,
        ),
        TransferError::InsufficientFunds => (
            StatusCode::UNPROCESSABLE_ENTITY,
            error_codes::INSUFFICIENT_BALANCE,
        ),
        TransferError::OperationTimeout => (
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::OPERATION_TIMEOUT,
        ),
        TransferError::Store(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
        ),
    };
    reject(status, code, e.to_string())
}

fn ownership_rejection(e: OwnershipError) -> ApiRejection {
    match e {
        OwnershipError::Denied => reject(
            StatusCode::NOT_FOUND,
            error_codes::ACCOUNT_NOT_FOUND,
            "Account not found or access denied",
        ),
        OwnershipError::Store(e) => reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            e.to_string(),
        ),
    }
}

// --- Handlers ---

/// Transfer money between two accounts
///
/// POST /api/v1/transfers
#[utoipa::path(
    post,
    path = "/api/v1/transfers",
    request_body = TransferApiRequest,
    responses(
        (status = 200, description = "Transfer completed", body = ApiResponse<TransferApiResponse>),
        (status = 400, description = "Invalid amount or same account"),
        (status = 401, description = "Authentication failed"),
        (status = 404, description = "Account not found or access denied"),
        (status = 422, description = "Insufficient funds or currency mismatch"),
        (status = 503, description = "Lock wait timed out")
    ),
    security(("bearer_jwt" = [])),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<TransferApiRequest>,
) -> Result<Json<ApiResponse<TransferApiResponse>>, ApiRejection> {
    let user_id = claims.sub.parse::<i64>().unwrap_or_default();

    let amount = Decimal::from_str(&req.amount).map_err(|_| {
        reject(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            "Invalid amount format",
        )
    })?;

    // Ownership of the source account is checked before the engine runs
    ensure_owner(state.db.pool(), user_id, req.from_account_id)
        .await
        .map_err(ownership_rejection)?;

    match TransferService::execute(
        &state.db,
        &state.transfer_config,
        req.from_account_id,
        req.to_account_id,
        amount,
    )
    .await
    {
        Ok(record) => Ok(Json(ApiResponse::success(TransferApiResponse::from_record(
            &record,
        )))),
        Err(e) => Err(transfer_rejection(&e)),
    }
}

/// Get account balance
///
/// GET /api/v1/transfers/accounts/{account_id}/balance
#[utoipa::path(
    get,
    path = "/api/v1/transfers/accounts/{account_id}/balance",
    params(
        ("account_id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Current balance", body = ApiResponse<BalanceResponse>),
        (status = 401, description = "Authentication failed"),
        (status = 404, description = "Account not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Transfer"
)]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<ApiResponse<BalanceResponse>>, ApiRejection> {
    match TransferService::get_balance(&state.db, account_id).await {
        Ok(balance) => Ok(Json(ApiResponse::success(BalanceResponse {
            account_id,
            balance: format!("{:.2}", balance),
        }))),
        Err(e) => Err(transfer_rejection(&e)),
    }
}

/// Get transaction history for an account, newest first
///
/// GET /api/v1/transfers/accounts/{account_id}/history
#[utoipa::path(
    get,
    path = "/api/v1/transfers/accounts/{account_id}/history",
    params(
        ("account_id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Transaction history", body = ApiResponse<Vec<HistoryEntryResponse>>),
        (status = 401, description = "Authentication failed"),
        (status = 404, description = "Account not found or access denied")
    ),
    security(("bearer_jwt" = [])),
    tag = "Transfer"
)]
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<HistoryEntryResponse>>>, ApiRejection> {
    let user_id = claims.sub.parse::<i64>().unwrap_or_default();

    ensure_owner(state.db.pool(), user_id, account_id)
        .await
        .map_err(ownership_rejection)?;

    match TransferService::get_history(&state.db, account_id).await {
        Ok(entries) => Ok(Json(ApiResponse::success(
            entries.iter().map(HistoryEntryResponse::from_entry).collect(),
        ))),
        Err(e) => Err(transfer_rejection(&e)),
    }
}
