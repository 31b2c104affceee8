use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when validating a session credential
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid subject: {0}")]
    InvalidSubject(String),
}

/// Account role carried in the session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Donor,
    Hospital,
}

/// JWT claims issued by the identity service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// The authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

/// Validates HS256 session tokens
///
/// Only signed, unexpired tokens are accepted. There is no unsigned
/// fallback format.
pub struct SessionAuthenticator {
    key: DecodingKey,
    validation: Validation,
}

impl SessionAuthenticator {
    pub fn new(secret: &str, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AuthError::InvalidSubject(data.claims.sub.clone()))?;

        Ok(Identity {
            user_id,
            role: data.claims.role,
        })
    }

    /// Pull the token out of an `Authorization` header value
    pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
        header
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token_for(user_id: Uuid, role: Role, exp_offset_secs: i64, iss: Option<&str>) -> String {
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            exp: (chrono::Utc::now().timestamp() + exp_offset_secs) as usize,
            iss: iss.map(str::to_string),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
    }

    #[test]
    fn test_valid_token_resolves_identity() {
        let auth = SessionAuthenticator::new(SECRET, None);
        let user_id = Uuid::new_v4();

        let identity = auth.authenticate(&token_for(user_id, Role::Hospital, 3600, None)).unwrap();

        assert_eq!(identity, Identity { user_id, role: Role::Hospital });
    }

    #[test]
    fn test_expired_token_rejected() {
        let auth = SessionAuthenticator::new(SECRET, None);
        let token = token_for(Uuid::new_v4(), Role::Donor, -3600, None);

        assert!(matches!(auth.authenticate(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let auth = SessionAuthenticator::new("another-secret", None);
        let token = token_for(Uuid::new_v4(), Role::Donor, 3600, None);

        assert!(auth.authenticate(&token).is_err());
    }

    #[test]
    fn test_unsigned_user_id_token_rejected() {
        let auth = SessionAuthenticator::new(SECRET, None);
        let token = format!("jwt-token-{}", Uuid::new_v4());

        assert!(auth.authenticate(&token).is_err());
    }

    #[test]
    fn test_issuer_enforced_when_configured() {
        let auth = SessionAuthenticator::new(SECRET, Some("bloodlink"));
        let user_id = Uuid::new_v4();

        assert!(auth.authenticate(&token_for(user_id, Role::Donor, 3600, Some("bloodlink"))).is_ok());
        assert!(auth.authenticate(&token_for(user_id, Role::Donor, 3600, Some("other"))).is_err());
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(SessionAuthenticator::bearer_token(Some("Bearer abc")).unwrap(), "abc");
        assert!(SessionAuthenticator::bearer_token(Some("Basic abc")).is_err());
        assert!(SessionAuthenticator::bearer_token(Some("Bearer ")).is_err());
        assert!(SessionAuthenticator::bearer_token(None).is_err());
    }
}
