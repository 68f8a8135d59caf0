//! Authentication Module
//!
//! Issues and verifies HS256 bearer tokens for the demo user directory.

mod extractor;

pub use extractor::AuthUser;

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AuthError;
use crate::models::{AuthResponse, LoginRequest};

/// Claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub role: String,
    pub iss: String,
    pub aud: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

/// Upper bound on token lifetime (one year)
const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

struct UserRecord {
    password: &'static str,
    role: &'static str,
}

// == Auth Service ==
pub struct AuthService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    token_ttl: Duration,
    // Demo user directory: username -> (password, role)
    users: HashMap<&'static str, UserRecord>,
}

impl AuthService {
    pub fn new(secret: &str, issuer: &str, audience: &str, token_ttl_secs: u64) -> Self {
        let user = |password, role| UserRecord { password, role };
        let users = HashMap::from([
            ("admin", user("password123", "Admin")),
            ("user", user("userpass", "User")),
            ("manager", user("managerpass", "Manager")),
        ]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            token_ttl: Duration::seconds(token_ttl_secs.min(MAX_TOKEN_TTL_SECS) as i64),
            users,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            &config.jwt_issuer,
            &config.jwt_audience,
            config.token_ttl,
        )
    }

    // == Login ==
    /// Checks credentials and issues a token valid for the configured lifetime.
    pub fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AuthError> {
        let user = self
            .users
            .get(request.username.as_str())
            .filter(|user| user.password == request.password)
            .ok_or_else(|| {
                warn!(username = %request.username, "login rejected");
                AuthError::InvalidCredentials
            })?;

        let now = Utc::now();
        let expiration = now + self.token_ttl;
        let token = self.issue(&request.username, user.role, now, expiration)?;

        info!(username = %request.username, role = user.role, "token issued");
        Ok(AuthResponse { token, expiration })
    }

    fn issue(
        &self,
        username: &str,
        role: &str,
        issued_at: DateTime<Utc>,
        expiration: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: username.to_string(),
            role: role.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    // == Verify ==
    /// Validates signature, expiry, issuer and audience.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}
