//! JWT-backed implementation of the `AuthService` trait.
//!
//! Tokens are HS256-signed with the process-wide secret and expire after the
//! configured number of hours. Password verification runs Argon2 on a
//! blocking task since it is CPU-bound.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use async_trait::async_trait;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use tokio::task;
use tracing::{info, warn};

use crate::db::Store;
use crate::services::auth_service::{
    AuthError, AuthService, Claims, LoginResult, TokenIdentity, UserView,
};

pub struct JwtAuthService {
    store: Store,
    secret: String,
    token_expiry_hours: i64,
}

impl JwtAuthService {
    #[must_use]
    pub const fn new(store: Store, secret: String, token_expiry_hours: i64) -> Self {
        Self {
            store,
            secret,
            token_expiry_hours,
        }
    }

    fn issue_token(&self, user_id: i32, username: &str) -> Result<String, AuthError> {
        let expires_at = chrono::Utc::now() + chrono::Duration::hours(self.token_expiry_hours);
        let claims = Claims {
            user_id,
            username: username.to_string(),
            exp: usize::try_from(expires_at.timestamp())
                .map_err(|e| AuthError::Internal(format!("Invalid expiry timestamp: {e}")))?,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }
}

#[async_trait]
impl AuthService for JwtAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let Some((user, password_hash)) = self.store.get_user_with_password(username).await?
        else {
            // Unknown users fall through to the same error as a bad password.
            return Err(AuthError::InvalidCredentials);
        };

        let password = password.to_string();
        // Argon2 verification is CPU-intensive and would stall the runtime.
        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| AuthError::Internal(format!("Invalid password hash format: {e}")))?;
            Ok::<bool, AuthError>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task panicked: {e}")))??;

        if !is_valid {
            warn!("Failed login attempt for user '{}'", username);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(user.id, &user.username)?;
        info!("User '{}' logged in", user.username);

        Ok(LoginResult {
            token,
            user: UserView {
                id: user.id,
                username: user.username,
                created_at: user.created_at,
            },
        })
    }

    async fn verify(&self, token: &str) -> Result<TokenIdentity, AuthError> {
        // Strip the scheme marker before the empty check so a bare "Bearer "
        // header is treated as an absent token, not as the word "Bearer".
        let token = token.trim_start();
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid,
        })?;

        Ok(TokenIdentity {
            user_id: data.claims.user_id,
            username: data.claims.username,
        })
    }
}
