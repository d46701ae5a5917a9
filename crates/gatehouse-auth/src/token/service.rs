//! Token creation and validation with configurable signing and TTL.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use gatehouse_core::config::AuthConfig;
use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::types::SubjectId;

use super::claims::TokenClaims;

/// Issues and verifies signed bearer tokens (HMAC-SHA256).
///
/// Tokens are valid until natural expiry; there is no revocation list.
#[derive(Clone)]
pub struct TokenService {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Default token TTL.
    default_ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("validation", &self.validation)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl TokenService {
    /// Creates a new token service from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Zero leeway: a token with a 1-second TTL must expire on schedule.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
            default_ttl: Duration::from_secs(config.token_ttl_minutes * 60),
        }
    }

    /// Issues a signed token for the given subject with an explicit TTL.
    pub fn issue(
        &self,
        subject_id: SubjectId,
        claims: serde_json::Map<String, serde_json::Value>,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let payload = TokenClaims {
            sub: subject_id,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero()))
                .timestamp(),
            jti: Uuid::new_v4(),
            claims,
        };

        encode(&Header::default(), &payload, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Issues a signed token with the configured default TTL.
    pub fn issue_default(
        &self,
        subject_id: SubjectId,
        claims: serde_json::Map<String, serde_json::Value>,
    ) -> Result<String, AppError> {
        self.issue(subject_id, claims, self.default_ttl)
    }

    /// The configured default TTL.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Decodes and validates a token string.
    ///
    /// Failure kinds stay distinct for logging; the HTTP boundary collapses
    /// all of them to 401.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AppError> {
        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::new(ErrorKind::TokenExpired, "Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::new(ErrorKind::InvalidSignature, "Invalid token signature")
                    }
                    _ => AppError::new(ErrorKind::MalformedToken, format!("Malformed token: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_service() -> TokenService {
        TokenService::new(&AuthConfig {
            token_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        })
    }

    fn claims_map(role: &str) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("role".to_string(), serde_json::json!(role));
        map
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let service = make_service();
        let token = service
            .issue(42, claims_map("editor"), Duration::from_secs(60))
            .unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.claims.get("role"), Some(&serde_json::json!("editor")));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_fresh_token_verifies() {
        let service = make_service();
        let token = service
            .issue(7, serde_json::Map::new(), Duration::from_secs(1))
            .unwrap();
        assert!(service.verify(&token).is_ok());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = make_service();

        // Sign a payload whose expiry already passed, with the same secret.
        let now = Utc::now().timestamp();
        let stale = TokenClaims {
            sub: 7,
            iat: now - 10,
            exp: now - 5,
            jti: Uuid::new_v4(),
            claims: serde_json::Map::new(),
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = service.verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenExpired);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let service = make_service();
        let token = service
            .issue(1, serde_json::Map::new(), Duration::from_secs(60))
            .unwrap();

        // Flip one character inside the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_ne!(token, tampered);

        let err = service.verify(&tampered).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let service = make_service();
        let err = service.verify("definitely-not-a-token").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedToken);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = make_service();
        let other = TokenService::new(&AuthConfig {
            token_secret: "different-secret".to_string(),
            ..AuthConfig::default()
        });

        let token = other
            .issue(1, serde_json::Map::new(), Duration::from_secs(60))
            .unwrap();
        let err = service.verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidSignature);
    }
}
