// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuance and verification.
//!
//! One service owns both directions: it signs claim sets for validated
//! principals and verifies presented tokens back into claims. Issuer and
//! verifier share the HMAC-SHA-256 key and the claim schema, so a token is
//! exactly as trustworthy as the key configured at process start.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::claims::{Principal, TokenClaims};

/// Fixed token lifetime: five minutes from issuance.
pub const TOKEN_LIFETIME_SECS: i64 = 300;

/// Minimum accepted signing key length in bytes.
pub const MIN_KEY_BYTES: usize = 32;

/// Error raised when the service cannot be built or a token cannot be signed.
///
/// `WeakKey` is a configuration failure and surfaces at construction time,
/// before the server starts accepting requests. `Signing` is kept so the
/// login path can propagate instead of panicking, although HS256 signing of
/// a well-formed claim set does not fail in practice.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("signing key must be at least {MIN_KEY_BYTES} bytes")]
    WeakKey,

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Why a presented token was rejected.
///
/// Exactly three kinds: structural or claim-schema problems are `Malformed`,
/// an authentic-looking token whose signature does not match the key is
/// `BadSignature`, and a correctly signed token past its `exp` is `Expired`.
/// The signature is checked before any claim is interpreted, so a tampered
/// token can never report `Expired` and an expired authentic token can never
/// report `BadSignature`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    BadSignature,

    #[error("token has expired")]
    Expired,
}

/// HMAC-SHA-256 token issuer and verifier.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    validation: Validation,
}

// `EncodingKey` has no `Debug` impl, so derive is unavailable; key material
// is omitted rather than printed.
impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build the service from the configured signing key and issuer name.
    ///
    /// Rejects keys shorter than [`MIN_KEY_BYTES`]; a service that cannot
    /// sign must refuse to start rather than issue forgeable tokens.
    pub fn new(secret: &str, issuer: impl Into<String>) -> Result<Self, TokenError> {
        if secret.len() < MIN_KEY_BYTES {
            return Err(TokenError::WeakKey);
        }

        let issuer = issuer.into();
        let mut validation = Validation::new(Algorithm::HS256);
        // Issuer and verifier share one clock; expiry is exact.
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_issuer(&[issuer.as_str()]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            validation,
        })
    }

    /// Name written into the `iss` claim of issued tokens.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issue a signed token for a validated principal.
    ///
    /// Every call mints a fresh `jti`, so two tokens for the same principal
    /// at the same instant still differ in claims and signed value.
    pub fn issue(&self, principal: &Principal) -> Result<String, TokenError> {
        let iat = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: principal.email.clone(),
            uid: principal.user_id.clone(),
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
            roles: principal.roles.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify a presented token and return its claims.
    ///
    /// Signature first, then expiry, then claim schema; see [`VerifyError`]
    /// for the failure taxonomy. Issuer mismatch counts as `Malformed`.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, VerifyError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => VerifyError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => VerifyError::BadSignature,
                _ => VerifyError::Malformed,
            },
        )?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::roles::Role;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn service() -> TokenService {
        TokenService::new(SECRET, "test").expect("service builds")
    }

    fn alice() -> Principal {
        Principal {
            user_id: "user_alice".to_string(),
            email: "alice@example.com".to_string(),
            roles: [Role::Customer].into_iter().collect(),
        }
    }

    /// Sign an arbitrary claim set with the test key, bypassing `issue`.
    fn sign_raw(claims: &TokenClaims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("signing succeeds")
    }

    fn claims_at(iat: i64, exp: i64, iss: &str) -> TokenClaims {
        TokenClaims {
            sub: "alice@example.com".to_string(),
            uid: "user_alice".to_string(),
            jti: Uuid::new_v4().to_string(),
            iss: iss.to_string(),
            iat,
            exp,
            roles: [Role::Customer].into_iter().collect(),
        }
    }

    #[test]
    fn weak_key_is_rejected_at_construction() {
        let err = TokenService::new("too-short", "test").unwrap_err();
        assert!(matches!(err, TokenError::WeakKey));
    }

    #[test]
    fn verify_roundtrips_identity_and_roles() {
        let service = service();
        let principal = alice();

        let token = service.issue(&principal).expect("issue succeeds");
        let claims = service.verify(&token).expect("verify succeeds");

        assert_eq!(Principal::from_claims(&claims), principal);
        assert_eq!(claims.iss, "test");
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_SECS);
    }

    #[test]
    fn repeated_issuance_mints_distinct_tokens() {
        let service = service();
        let principal = alice();

        let first = service.issue(&principal).unwrap();
        let second = service.issue(&principal).unwrap();
        assert_ne!(first, second);

        let first_claims = service.verify(&first).unwrap();
        let second_claims = service.verify(&second).unwrap();
        assert_ne!(first_claims.jti, second_claims.jti);
    }

    #[test]
    fn expired_token_reports_expired_not_bad_signature() {
        let service = service();
        let now = Utc::now().timestamp();

        let barely = sign_raw(&claims_at(now - TOKEN_LIFETIME_SECS - 1, now - 1, "test"));
        assert_eq!(service.verify(&barely), Err(VerifyError::Expired));

        let long_gone = sign_raw(&claims_at(now - 900, now - 600, "test"));
        assert_eq!(service.verify(&long_gone), Err(VerifyError::Expired));
    }

    #[test]
    fn payload_bit_flip_reports_bad_signature() {
        let service = service();
        let token = service.issue(&alice()).unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);

        // Flip one bit in the decoded payload bytes and re-encode, keeping
        // the base64url text well formed so only the signature check fails.
        let mut payload = URL_SAFE_NO_PAD.decode(&parts[1]).unwrap();
        payload[0] ^= 0b0000_0001;
        parts[1] = URL_SAFE_NO_PAD.encode(&payload);

        let tampered = parts.join(".");
        assert_eq!(service.verify(&tampered), Err(VerifyError::BadSignature));
    }

    #[test]
    fn signature_bit_flip_reports_bad_signature() {
        let service = service();
        let token = service.issue(&alice()).unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let mut signature = URL_SAFE_NO_PAD.decode(&parts[2]).unwrap();
        signature[0] ^= 0b1000_0000;
        parts[2] = URL_SAFE_NO_PAD.encode(&signature);

        let tampered = parts.join(".");
        assert_eq!(service.verify(&tampered), Err(VerifyError::BadSignature));
    }

    #[test]
    fn tampering_an_expired_token_still_reports_bad_signature() {
        // Signature is checked before expiry, so tampering wins.
        let service = service();
        let now = Utc::now().timestamp();
        let token = sign_raw(&claims_at(now - 900, now - 600, "test"));

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let mut payload = URL_SAFE_NO_PAD.decode(&parts[1]).unwrap();
        payload[0] ^= 0b0000_0100;
        parts[1] = URL_SAFE_NO_PAD.encode(&payload);

        assert_eq!(
            service.verify(&parts.join(".")),
            Err(VerifyError::BadSignature)
        );
    }

    #[test]
    fn wrong_issuer_is_malformed() {
        let service = service();
        let now = Utc::now().timestamp();
        let token = sign_raw(&claims_at(now, now + 300, "someone-else"));

        assert_eq!(service.verify(&token), Err(VerifyError::Malformed));
    }

    #[test]
    fn structural_garbage_is_malformed() {
        let service = service();
        assert_eq!(service.verify("not-a-token"), Err(VerifyError::Malformed));
        assert_eq!(service.verify("a.b"), Err(VerifyError::Malformed));
        assert_eq!(service.verify(""), Err(VerifyError::Malformed));
    }

    #[test]
    fn foreign_key_signature_is_rejected() {
        let service = service();
        let other = TokenService::new("ffffffffffffffffffffffffffffffff", "test").unwrap();

        let token = other.issue(&alice()).unwrap();
        assert_eq!(service.verify(&token), Err(VerifyError::BadSignature));
    }
}
