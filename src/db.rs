//! Database connection management

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// PostgreSQL database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        tracing::info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create tables if they do not exist yet.
    ///
    /// `transactions_tb` references accounts by id only, no foreign keys:
    /// a FAILED record must be writable even when one side never existed.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS users_tb (
                user_id       BIGSERIAL PRIMARY KEY,
                username      TEXT NOT NULL UNIQUE,
                email         TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS accounts_tb (
                account_id     UUID PRIMARY KEY,
                owner_id       BIGINT NOT NULL,
                account_number TEXT NOT NULL UNIQUE,
                currency       SMALLINT NOT NULL,
                account_name   TEXT NOT NULL,
                balance        NUMERIC(19, 2) NOT NULL DEFAULT 0 CHECK (balance >= 0),
                version        BIGINT NOT NULL DEFAULT 1,
                created_at     TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS idx_accounts_owner ON accounts_tb (owner_id)
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS transactions_tb (
                transaction_id  BIGSERIAL PRIMARY KEY,
                from_account_id UUID NOT NULL,
                to_account_id   UUID NOT NULL,
                amount          NUMERIC(19, 2) NOT NULL,
                status          SMALLINT NOT NULL,
                created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS idx_transactions_from
                ON transactions_tb (from_account_id, created_at DESC)
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS idx_transactions_to
                ON transactions_tb (to_account_id, created_at DESC)
            "#,
        ];

        for stmt in statements {
            sqlx::query(stmt).execute(&self.pool).await?;
        }

        tracing::info!("Database schema ready");
        Ok(())
    }
}
