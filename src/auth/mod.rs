//! User authentication and ownership checks
//!
//! JWT-based sessions: `UserAuthService` issues and verifies tokens, the
//! axum middleware injects verified `Claims`, and `ensure_owner` is the
//! explicit guard handlers call before touching an account. All of this
//! sits outside the transfer engine's transaction boundary.

pub mod middleware;
pub mod ownership;
pub mod service;

pub use middleware::jwt_auth_middleware;
pub use ownership::{OwnershipError, ensure_owner};
pub use service::{AuthError, AuthResponse, Claims, LoginRequest, RegisterRequest, UserAuthService};
