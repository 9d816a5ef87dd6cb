use std::sync::Arc;

use crate::auth::UserAuthService;
use crate::config::TransferConfig;
use crate::db::Database;

/// Shared gateway application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL database (accounts, transactions, users)
    pub db: Arc<Database>,
    /// JWT session service
    pub user_auth: Arc<UserAuthService>,
    /// Transfer engine tuning
    pub transfer_config: TransferConfig,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        user_auth: Arc<UserAuthService>,
        transfer_config: TransferConfig,
    ) -> Self {
        Self {
            db,
            user_auth,
            transfer_config,
        }
    }
}
