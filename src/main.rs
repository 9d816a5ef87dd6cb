//! minibank - Mini Banking Ledger
//!
//! Service entry point. Architecture:
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌────────────┐    ┌────────────┐
//! │  Gateway │───▶│ Ownership │───▶│  Transfer  │───▶│ PostgreSQL │
//! │  (axum)  │    │   guard   │    │   engine   │    │ (sqlx)     │
//! └──────────┘    └───────────┘    └────────────┘    └────────────┘
//!                                        │ on failure
//!                                        ▼
//!                                  FailureAuditor (own scope)
//! ```

use std::sync::Arc;

use minibank::auth::UserAuthService;
use minibank::config::AppConfig;
use minibank::db::Database;
use minibank::gateway::{self, state::AppState};
use minibank::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::args().nth(1).unwrap_or_else(|| "dev".to_string());
    let config = AppConfig::load(&env);
    let _guard = logging::init_logging(&config);

    tracing::info!(env = %env, "Starting minibank");

    let db = Arc::new(Database::connect(&config.postgres_url).await?);
    db.ensure_schema().await?;

    let user_auth = Arc::new(UserAuthService::new(
        db.pool().clone(),
        config.jwt_secret.clone(),
    ));

    let state = Arc::new(AppState::new(db, user_auth, config.transfer.clone()));

    gateway::run_server(&config, state).await
}
