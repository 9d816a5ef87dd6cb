//! API response envelope and error codes
//!
//! All responses follow the same structure:
//! - code: 0 = success, non-zero = error code
//! - msg: short message description
//! - data: actual data (success) or null (error)

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

/// Unified API response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Error tuple every handler returns on the failure path
pub type ApiRejection = (StatusCode, Json<ApiResponse<()>>);

/// Build a rejection with a stable error code
pub fn reject(status: StatusCode, code: i32, msg: impl Into<String>) -> ApiRejection {
    (status, Json(ApiResponse::<()>::error(code, msg)))
}

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_BALANCE: i32 = 1002;
    pub const SAME_ACCOUNT: i32 = 1003;
    pub const CURRENCY_MISMATCH: i32 = 1004;
    pub const NON_ZERO_BALANCE: i32 = 1005;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;
    pub const USER_EXISTS: i32 = 2003;

    // Resource errors (4xxx)
    pub const ACCOUNT_NOT_FOUND: i32 = 4001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
    pub const OPERATION_TIMEOUT: i32 = 5002;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_shape() {
        let resp = ApiResponse::success("data");
        assert_eq!(resp.code, 0);
        assert_eq!(resp.msg, "ok");
        assert_eq!(resp.data, Some("data"));
    }

    #[test]
    fn test_error_response_has_no_data() {
        let resp = ApiResponse::<()>::error(error_codes::INVALID_PARAMETER, "bad input");
        assert_eq!(resp.code, 1001);
        assert_eq!(resp.msg, "bad input");
        assert!(resp.data.is_none());

        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("data").is_none(), "null data must be omitted");
    }
}
