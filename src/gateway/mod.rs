//! HTTP gateway
//!
//! Thin presentation layer over the account and transfer services: routing,
//! JWT middleware, the response envelope and Swagger UI. No invariants of
//! its own.

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::jwt_auth_middleware;
use crate::config::AppConfig;
use openapi::ApiDoc;
use state::AppState;
use types::{ApiRejection, ApiResponse, error_codes, reject};

async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<String>>, ApiRejection> {
    state.db.health_check().await.map_err(|e| {
        reject(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            format!("Database unreachable: {}", e),
        )
    })?;
    Ok(Json(ApiResponse::success("ok".to_string())))
}

/// Start the HTTP gateway server
pub async fn run_server(config: &AppConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let public = Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/auth/register", post(handlers::auth::register))
        .route("/api/v1/auth/login", post(handlers::auth::login));

    let private = Router::new()
        .route("/api/v1/accounts", post(handlers::account::create_account))
        .route(
            "/api/v1/accounts/search",
            post(handlers::account::search_accounts),
        )
        .route(
            "/api/v1/accounts/{account_id}",
            get(handlers::account::get_account)
                .put(handlers::account::update_account)
                .delete(handlers::account::delete_account),
        )
        .route("/api/v1/transfers", post(handlers::transfer::create_transfer))
        .route(
            "/api/v1/transfers/accounts/{account_id}/balance",
            get(handlers::transfer::get_balance),
        )
        .route(
            "/api/v1/transfers/accounts/{account_id}/history",
            get(handlers::transfer::get_history),
        )
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    let app = Router::new()
        .merge(public)
        .merge(private)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Gateway listening on http://{} (Swagger UI at /docs)", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
