use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub enable_tracing: bool,
    pub gateway: GatewayConfig,
    /// PostgreSQL connection URL for accounts, transactions and users
    pub postgres_url: String,
    /// Secret for signing session tokens
    pub jwt_secret: String,
    #[serde(default)]
    pub transfer: TransferConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TransferConfig {
    /// Max time a transfer waits on a row lock before it is aborted
    pub lock_timeout_ms: u64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: 5000,
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        let mut config: AppConfig =
            serde_yaml::from_str(&content).expect("Failed to parse config yaml");

        // Secrets may come from the environment instead of the file
        if let Ok(url) = std::env::var("MINIBANK_POSTGRES_URL") {
            config.postgres_url = url;
        }
        if let Ok(secret) = std::env::var("MINIBANK_JWT_SECRET") {
            config.jwt_secret = secret;
        }

        config
    }
}
