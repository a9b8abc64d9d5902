//! Opaque bearer credentials.
//!
//! A token is `base64url(claims_json) "." base64url(hmac_sha256(claims_json))`.
//! Verification recomputes the tag with the configured secret; claims are
//! only read after the tag checks out.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("invalid signing key")]
    Key,
    #[error("failed to encode claims")]
    Encode,
    #[error("malformed token")]
    Malformed,
    #[error("bad token signature")]
    BadSignature,
}

/// Identity carried by a credential token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub account_id: i64,
    pub username: String,
}

/// Issues and verifies bearer credentials for the protected routes.
#[derive(Clone)]
pub struct TokenSigner {
    key: Vec<u8>,
}

impl TokenSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.key).map_err(|_| TokenError::Key)
    }

    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        let payload = serde_json::to_vec(claims).map_err(|_| TokenError::Encode)?;
        let mut mac = self.mac()?;
        mac.update(&payload);
        let tag = mac.finalize().into_bytes();
        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(tag)
        ))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let (payload_b64, tag_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::Malformed)?;
        let tag = URL_SAFE_NO_PAD
            .decode(tag_b64)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac()?;
        mac.update(&payload);
        mac.verify_slice(&tag)
            .map_err(|_| TokenError::BadSignature)?;

        serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> Claims {
        Claims {
            account_id: 7,
            username: "alice".to_string(),
        }
    }

    #[test]
    fn issue_verify_round_trip() {
        let signer = TokenSigner::new("secret");
        let token = signer.issue(&claims()).unwrap();
        assert_eq!(signer.verify(&token).unwrap(), claims());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let signer = TokenSigner::new("secret");
        let token = signer.issue(&claims()).unwrap();
        let (_, tag) = token.split_once('.').unwrap();

        let forged = Claims {
            account_id: 8,
            username: "mallory".to_string(),
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        let forged_token = format!("{forged_payload}.{tag}");
        assert!(matches!(
            signer.verify(&forged_token),
            Err(TokenError::BadSignature)
        ));
    }

    #[test]
    fn token_from_another_key_is_rejected() {
        let signer = TokenSigner::new("secret");
        let other = TokenSigner::new("other-secret");
        let token = other.issue(&claims()).unwrap();
        assert!(matches!(
            signer.verify(&token),
            Err(TokenError::BadSignature)
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        let signer = TokenSigner::new("secret");
        assert!(matches!(
            signer.verify("no-dot-in-here"),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(
            signer.verify("not base64.also not"),
            Err(TokenError::Malformed)
        ));
    }
}
