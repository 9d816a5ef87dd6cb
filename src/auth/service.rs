//! User registration, login and JWT session tokens

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (user_id as string)
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub iat: usize,  // Issued at
}

/// User Registration Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64))]
    #[schema(example = "user1")]
    pub username: String,
    #[validate(email)]
    #[schema(example = "user1@example.com")]
    pub email: String,
    #[validate(length(min = 8))]
    #[schema(example = "password123")]
    pub password: String,
}

/// User Login Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    #[schema(example = "user1@example.com")]
    pub email: String,
    #[schema(example = "password123")]
    pub password: String,
}

/// Auth Response (JWT)
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username or email already taken")]
    UserAlreadyExists,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    TokenInvalid,

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),
}

const TOKEN_TTL_HOURS: i64 = 24;

pub struct UserAuthService {
    db: PgPool,
    jwt_secret: String,
}

impl UserAuthService {
    pub fn new(db: PgPool, jwt_secret: String) -> Self {
        Self { db, jwt_secret }
    }

    /// Register a new user, returning the new user id
    pub async fn register(&self, req: RegisterRequest) -> Result<i64, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();

        let row = sqlx::query(
            r#"INSERT INTO users_tb (username, email, password_hash)
               VALUES ($1, $2, $3)
               RETURNING user_id"#,
        )
        .bind(&req.username)
        .bind(&req.email)
        .bind(&password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            // 23505 = unique_violation on username/email
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                AuthError::UserAlreadyExists
            }
            _ => AuthError::Store(e),
        })?;

        let user_id: i64 = row.get("user_id");
        tracing::info!(user_id, username = %req.username, "User registered");
        Ok(user_id)
    }

    /// Login user and issue JWT
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AuthError> {
        let row = sqlx::query(
            r#"SELECT user_id, username, email, password_hash
               FROM users_tb
               WHERE email = $1"#,
        )
        .bind(&req.email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

        let password_hash: String = row.get("password_hash");
        let parsed_hash =
            PasswordHash::new(&password_hash).map_err(|e| AuthError::Hash(e.to_string()))?;

        Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        let user_id: i64 = row.get("user_id");
        let token = issue_token(&self.jwt_secret, user_id)?;

        Ok(AuthResponse {
            token,
            user_id,
            username: row.get("username"),
            email: row.get("email"),
        })
    }

    /// Verify a bearer token and return its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode_token(&self.jwt_secret, token)
    }
}

fn issue_token(secret: &str, user_id: i64) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::hours(TOKEN_TTL_HOURS);

    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::TokenInvalid)
}

fn decode_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::TokenInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = issue_token("test-secret", 42).unwrap();
        let claims = decode_token("test-secret", &token).unwrap();
        assert_eq!(claims.sub, "42");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let token = issue_token("test-secret", 42).unwrap();
        assert!(matches!(
            decode_token("other-secret", &token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: "42".to_string(),
            exp: past.timestamp() as usize,
            iat: (past - Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            decode_token("test-secret", &token),
            Err(AuthError::TokenInvalid)
        ));
    }
}
