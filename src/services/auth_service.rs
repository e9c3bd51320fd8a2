//! Domain service for authentication: credential login and token verification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Token is missing")]
    MissingToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is invalid")]
    TokenInvalid,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// JWT payload. `exp` is seconds since the Unix epoch.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub username: String,
    pub exp: usize,
}

/// User info DTO for responses. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i32,
    pub username: String,
    pub created_at: String,
}

/// Successful login: a signed token plus the authenticated user.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub user: UserView,
}

/// Identity recovered from a verified token.
#[derive(Debug, Clone, Serialize)]
pub struct TokenIdentity {
    pub user_id: i32,
    pub username: String,
}

/// Domain service trait for login and token verification.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and issues a signed token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] when either field is empty
    /// and [`AuthError::InvalidCredentials`] when verification fails.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Verifies a token (with or without a `Bearer ` prefix) and returns the
    /// identity embedded in it.
    ///
    /// # Errors
    ///
    /// Distinguishes [`AuthError::MissingToken`], [`AuthError::TokenExpired`]
    /// and [`AuthError::TokenInvalid`].
    async fn verify(&self, token: &str) -> Result<TokenIdentity, AuthError>;
}
