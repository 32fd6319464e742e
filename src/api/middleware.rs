//! JWT authentication middleware for the API.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::{User, UserRole};

/// Token lifetime. Matches the 24h expiry the frontend assumes when it
/// schedules re-login.
const TOKEN_TTL_HOURS: i64 = 24;

/// Authentication configuration loaded from environment variables.
#[derive(Clone)]
pub struct AuthConfig {
    jwt_secret: String,
}

impl AuthConfig {
    /// Load the signing secret from OLIVE_MILL_JWT_SECRET, falling back to a
    /// development-only default.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("OLIVE_MILL_JWT_SECRET")
            .unwrap_or_else(|_| "olive-mill-dev-secret".to_string());
        Self { jwt_secret }
    }

    /// Create a config with a fixed secret (for testing).
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
        }
    }

    /// Sign a token for `user`, valid for 24 hours.
    pub fn issue_token(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
    }

    /// Verify a token and return its claims. Expiry is validated.
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// The authenticated identity carried through request extensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    pub email: String,
    pub role: UserRole,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "message": message })),
    )
        .into_response()
}

/// Middleware that rejects requests without a valid bearer token and makes
/// the verified [`Claims`] available to handlers via `Extension`.
pub async fn auth_middleware(
    State(config): State<AuthConfig>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => {
            tracing::warn!("Missing or malformed Authorization header");
            return unauthorized("No token provided");
        }
    };

    match config.verify_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!("Token rejected: {}", err);
            unauthorized("Invalid token")
        }
    }
}
