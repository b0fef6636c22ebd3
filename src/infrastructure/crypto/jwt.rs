//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::domain::{DomainError, DomainResult, IdentityClaims, TokenError, TokenIssuer};

/// JWT configuration, resolved once at startup.
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Issuer claim
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
        }
    }
}

/// JWT claims as they travel on the wire
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (account ID)
    pub sub: String,
    /// Account role (`ADMIN` / `USER`)
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

/// HS256 [`TokenIssuer`] with the signing key injected at construction.
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
}

impl JwtTokenIssuer {
    /// Fails when the secret is empty; callers treat that as fatal.
    pub fn new(config: &JwtConfig) -> Result<Self, ConfigError> {
        if config.secret.trim().is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }

        let mut validation = Validation::default();
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
        })
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, claims: &IdentityClaims, ttl: Duration) -> DomainResult<String> {
        let now = Utc::now();
        let token_claims = TokenClaims {
            sub: claims.subject_id.clone(),
            role: claims.role.as_str().to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &token_claims, &self.encoding_key)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        let role = token_data
            .claims
            .role
            .parse()
            .map_err(|_| TokenError::Invalid)?;

        Ok(IdentityClaims {
            subject_id: token_data.claims.sub,
            role,
        })
    }
}
