//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::service::{AuthResponse, LoginRequest, RegisterRequest};
use crate::gateway::handlers::{
    AccountResponse, BalanceResponse, CreateAccountRequest, HistoryEntryResponse,
    RegisterResponse, SearchAccountsRequest, TransferApiRequest, TransferApiResponse,
    UpdateAccountRequest,
};

/// Bearer JWT security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Minibank API",
        version = "1.0.0",
        description = "Mini banking ledger: accounts, atomic transfers and a durable audit trail.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::auth::register,
        crate::gateway::handlers::auth::login,
        crate::gateway::handlers::account::create_account,
        crate::gateway::handlers::account::search_accounts,
        crate::gateway::handlers::account::get_account,
        crate::gateway::handlers::account::update_account,
        crate::gateway::handlers::account::delete_account,
        crate::gateway::handlers::transfer::create_transfer,
        crate::gateway::handlers::transfer::get_balance,
        crate::gateway::handlers::transfer::get_history,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            RegisterResponse,
            CreateAccountRequest,
            SearchAccountsRequest,
            UpdateAccountRequest,
            AccountResponse,
            TransferApiRequest,
            TransferApiResponse,
            BalanceResponse,
            HistoryEntryResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login (no auth required)"),
        (name = "Account", description = "Account lifecycle (auth required)"),
        (name = "Transfer", description = "Transfers, balances and history (auth required)")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        assert!(!doc.paths.paths.is_empty(), "Should document some paths");
        assert!(
            doc.paths.paths.contains_key("/api/v1/transfers"),
            "Transfer endpoint must be documented"
        );
    }
}
