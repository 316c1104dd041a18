use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

/// Claims extracted from a verified session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    /// Stable subject id issued by the identity provider.
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub session_id: Option<String>,
}

/// Expired and malformed tokens fail identically; the message never carries
/// verification internals.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token")]
    InvalidToken,
}

/// Verifies a bearer token and extracts its claims.
/// Verification must stay local (no network round-trip per request).
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    sid: Option<String>,
}

/// Offline verifier for Clerk session tokens: RS256 against the instance's
/// PEM public key, expiry enforced, audience not checked (Clerk session
/// tokens carry none by default).
pub struct ClerkVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl ClerkVerifier {
    pub fn from_rsa_pem(pem: &str) -> anyhow::Result<Self> {
        let decoding_key = DecodingKey::from_rsa_pem(pem.as_bytes())?;
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_aud = false;
        Ok(Self {
            decoding_key,
            validation,
        })
    }

    #[cfg(test)]
    fn with_key(decoding_key: DecodingKey, validation: Validation) -> Self {
        Self {
            decoding_key,
            validation,
        }
    }
}

impl TokenVerifier for ClerkVerifier {
    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let data = decode::<RawClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(SessionClaims {
            subject: data.claims.sub,
            email: data.claims.email,
            name: data.claims.name,
            session_id: data.claims.sid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        sid: Option<String>,
    }

    const TEST_SECRET: &[u8] = b"unit-test-signing-secret";

    fn test_verifier() -> ClerkVerifier {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        ClerkVerifier::with_key(DecodingKey::from_secret(TEST_SECRET), validation)
    }

    fn sign(claims: &TestClaims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(TEST_SECRET),
        )
        .unwrap()
    }

    fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_verify_extracts_all_claims() {
        let token = sign(&TestClaims {
            sub: "user_2abc".into(),
            exp: future_exp(),
            email: Some("ada@example.com".into()),
            name: Some("Ada Lovelace".into()),
            sid: Some("sess_1".into()),
        });

        let claims = test_verifier().verify(&token).unwrap();
        assert_eq!(claims.subject, "user_2abc");
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
        assert_eq!(claims.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(claims.session_id.as_deref(), Some("sess_1"));
    }

    #[test]
    fn test_verify_tolerates_missing_profile_claims() {
        let token = sign(&TestClaims {
            sub: "user_2abc".into(),
            exp: future_exp(),
            email: None,
            name: None,
            sid: None,
        });

        let claims = test_verifier().verify(&token).unwrap();
        assert_eq!(claims.subject, "user_2abc");
        assert!(claims.email.is_none());
        assert!(claims.name.is_none());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = sign(&TestClaims {
            sub: "user_2abc".into(),
            exp: chrono::Utc::now().timestamp() - 3600,
            email: None,
            name: None,
            sid: None,
        });

        assert!(test_verifier().verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(test_verifier().verify("not-a-jwt").is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = sign(&TestClaims {
            sub: "user_2abc".into(),
            exp: future_exp(),
            email: None,
            name: None,
            sid: None,
        });
        let tampered = format!("{}x", token);
        assert!(test_verifier().verify(&tampered).is_err());
    }

    #[test]
    fn test_error_message_is_generic() {
        let err = test_verifier().verify("garbage").unwrap_err();
        assert_eq!(err.to_string(), "invalid token");
    }
}
