/// Access token signing and validation
///
/// Access tokens are short-lived HS256 JWTs carrying the account id as the
/// subject. The algorithm is pinned at construction: tokens whose header
/// names a different algorithm are rejected regardless of signature, which
/// closes the algorithm-confusion hole.
///
/// Tokens are stateless; possession of a token with a valid signature and an
/// unexpired `exp` claim is the only check. The server keeps no per-token
/// state and cannot revoke an access token before its natural expiry.
use crate::error::{AuthError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The one algorithm this service signs and accepts.
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

const TOKEN_TYPE_ACCESS: &str = "access";

/// JWT claims carried by an access token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (account id as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type, always "access"
    pub token_type: String,
}

/// Stateless access-token signer and verifier.
///
/// Holds the derived signing keys; constructed once from settings at startup
/// and shared by reference. Immutable after construction.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.set_required_spec_claims(&["exp"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign an access token for the given account.
    pub fn sign(&self, account_id: Uuid, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {}", e)))
    }

    /// Verify an access token and return the subject account id.
    ///
    /// Fails closed: parse errors, signature mismatches, wrong algorithm,
    /// wrong token type, malformed subject, and expiry all collapse into
    /// `Unauthenticated`.
    pub fn verify(&self, token: &str) -> Result<Uuid> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| AuthError::Unauthenticated)?;

        if data.claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(AuthError::Unauthenticated);
        }

        Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret-key")
    }

    #[test]
    fn test_sign_and_verify_round_trip() {
        let account_id = Uuid::new_v4();
        let token = signer()
            .sign(account_id, Duration::minutes(30))
            .expect("should sign");
        let subject = signer().verify(&token).expect("should verify");
        assert_eq!(subject, account_id);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = signer()
            .sign(Uuid::new_v4(), Duration::seconds(-10))
            .expect("should sign");
        assert!(matches!(
            signer().verify(&token),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = signer()
            .sign(Uuid::new_v4(), Duration::minutes(30))
            .expect("should sign");
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });
        assert!(signer().verify(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = signer()
            .sign(Uuid::new_v4(), Duration::minutes(30))
            .expect("should sign");
        let other = TokenSigner::new("a-different-secret");
        assert!(matches!(other.verify(&token), Err(AuthError::Unauthenticated)));
    }

    #[test]
    fn test_foreign_algorithm_is_rejected() {
        // Token signed with HS384 over the same secret must not validate,
        // even though the signature itself is sound.
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(30)).timestamp(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key"),
        )
        .expect("should encode");

        assert!(matches!(
            signer().verify(&token),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_wrong_token_type_is_rejected() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(30)).timestamp(),
            token_type: "refresh".to_string(),
        };
        let token = encode(
            &Header::new(JWT_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key"),
        )
        .expect("should encode");

        assert!(signer().verify(&token).is_err());
    }

    #[test]
    fn test_garbage_input_is_rejected() {
        assert!(signer().verify("").is_err());
        assert!(signer().verify("not.a.jwt").is_err());
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let claims = Claims {
            sub: "42".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(30)).timestamp(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
        };
        let token = encode(
            &Header::new(JWT_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key"),
        )
        .expect("should encode");

        assert!(signer().verify(&token).is_err());
    }
}
