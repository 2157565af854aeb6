use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared_types::UserRole;
use std::sync::Arc;

/// Claims carried in a bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub exp: i64,
    pub iat: i64,
    /// Unique token identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Parsed role, `None` when the token names a role this service does not know.
    pub fn user_role(&self) -> Option<UserRole> {
        UserRole::parse(&self.role)
    }
}

/// HS256 signing and verification keys derived from `JWT_SECRET`.
#[derive(Clone)]
pub struct JwtKeys {
    inner: Arc<KeyPair>,
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            inner: Arc::new(KeyPair {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
        }
    }

    /// Keys from the `JWT_SECRET` environment variable.
    pub fn from_env() -> Result<Self, String> {
        crate::config::jwt_secret().map(|s| Self::from_secret(s.as_bytes()))
    }

    pub fn issue(
        &self,
        subject: &str,
        name: &str,
        role: UserRole,
        organization: Option<&str>,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            name: name.to_string(),
            role: role.as_str().to_string(),
            organization: organization.map(str::to_string),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Some(uuid::Uuid::new_v4().to_string()),
        };
        self.encode(&claims)
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), claims, &self.inner.encoding)
    }

    /// Verify signature and expiry.
    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.inner.decoding, &Validation::default()).map(|d| d.claims)
    }
}

/// Default lifetime of development tokens.
pub fn token_ttl_hours() -> i64 {
    std::env::var("JWT_TOKEN_TTL_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::from_secret(b"test-secret-key-for-jwt-unit-tests")
    }

    #[test]
    fn issue_and_validate() {
        let keys = keys();
        let token = keys
            .issue("u-17", "Efua Asante", UserRole::Finance, Some("Petroleum Commission"), Duration::hours(1))
            .unwrap();
        let claims = keys.validate(&token).unwrap();
        assert_eq!(claims.sub, "u-17");
        assert_eq!(claims.role, "finance");
        assert_eq!(claims.user_role(), Some(UserRole::Finance));
        assert_eq!(claims.organization.as_deref(), Some("Petroleum Commission"));
        assert!(claims.exp > claims.iat);
        assert!(claims.jti.is_some());
    }

    #[test]
    fn expired_token_rejected() {
        let keys = keys();
        let now = Utc::now();
        let claims = Claims {
            sub: "u-1".into(),
            name: "Expired".into(),
            role: "officer".into(),
            organization: None,
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            jti: None,
        };
        let token = keys.encode(&claims).unwrap();
        assert!(keys.validate(&token).is_err());
    }

    #[test]
    fn token_from_other_secret_rejected() {
        let other = JwtKeys::from_secret(b"another-secret");
        let token = other
            .issue("u-1", "Mallory", UserRole::Admin, None, Duration::hours(1))
            .unwrap();
        assert!(keys().validate(&token).is_err());
    }

    #[test]
    fn garbage_rejected() {
        assert!(keys().validate("not.a.valid.jwt").is_err());
        assert!(keys().validate("").is_err());
    }

    #[test]
    fn unknown_role_parses_to_none() {
        let claims = Claims {
            sub: "u-1".into(),
            name: "x".into(),
            role: "auditor".into(),
            organization: None,
            iat: 0,
            exp: 0,
            jti: None,
        };
        assert_eq!(claims.user_role(), None);
    }
}
