/// Authentication service - JWT verification
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tunedeck_core::UserId;

/// Verifies bearer tokens and mints development tokens.
///
/// Tokens are HS256 with `sub` holding the user id. Issuing tokens for real
/// users happens elsewhere; [`AuthService::create_access_token`] backs the
/// `issue-token` command and the tests.
#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    access_token_expiration: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

impl AuthService {
    pub fn new(secret: String, access_expiration_hours: u64) -> Self {
        Self {
            secret,
            access_token_expiration: Duration::hours(access_expiration_hours as i64),
        }
    }

    /// Create an access token
    pub fn create_access_token(&self, user_id: &UserId) -> Result<String> {
        let now = Utc::now();
        let exp = now + self.access_token_expiration;

        let claims = Claims {
            sub: user_id.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify a token and return the caller identity
    pub fn verify_access_token(&self, token: &str) -> Result<UserId> {
        let claims = self.verify_token(token)?;
        if claims.sub.trim().is_empty() {
            return Err(ServerError::Auth("Token has no subject".to_string()));
        }
        Ok(UserId::new(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation_and_verification() {
        let auth = AuthService::new("secret".to_string(), 24);
        let user_id = UserId::new("user-123");

        let access_token = auth.create_access_token(&user_id).unwrap();
        let verified_id = auth.verify_access_token(&access_token).unwrap();
        assert_eq!(verified_id, user_id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = AuthService::new("secret".to_string(), 24);
        let verifier = AuthService::new("other-secret".to_string(), 24);

        let token = issuer.create_access_token(&UserId::new("user-123")).unwrap();
        assert!(verifier.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let auth = AuthService::new("secret".to_string(), 24);
        assert!(matches!(
            auth.verify_access_token("not.a.jwt"),
            Err(ServerError::Jwt(_))
        ));
    }

    #[test]
    fn test_empty_subject_rejected() {
        let auth = AuthService::new("secret".to_string(), 24);
        let token = auth.create_access_token(&UserId::new("")).unwrap();
        assert!(matches!(
            auth.verify_access_token(&token),
            Err(ServerError::Auth(_))
        ));
    }
}
