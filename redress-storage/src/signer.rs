//! Signed download URLs
//!
//! Attachments are never served by blob key alone; the API hands out
//! short-lived signed URLs instead. The signature covers the key and the
//! expiry, so neither can be altered without invalidating the URL.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::{BlobError, BlobResult};

/// Default signed URL lifetime in seconds
pub const DEFAULT_URL_TTL_SECS: i64 = 600;

/// Signs and verifies download URLs for blob keys
#[derive(Clone)]
pub struct UrlSigner {
    secret: String,
}

impl UrlSigner {
    /// Create a signer over a shared secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Signature over a key and expiry (hex SHA-256)
    pub fn sign(&self, key: &str, expires: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(key.as_bytes());
        hasher.update(expires.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Build a signed download URL path for a key
    pub fn signed_url(&self, key: &str, ttl_secs: i64, now: DateTime<Utc>) -> String {
        let expires = now.timestamp() + ttl_secs;
        format!(
            "/files/{}?expires={}&sig={}",
            key,
            expires,
            self.sign(key, expires)
        )
    }

    /// Verify a presented signature against a key and expiry
    pub fn verify(
        &self,
        key: &str,
        expires: i64,
        sig: &str,
        now: DateTime<Utc>,
    ) -> BlobResult<()> {
        if now.timestamp() > expires {
            return Err(BlobError::Expired);
        }
        let expected = self.sign(key, expires);
        // constant-time compare
        if expected.len() != sig.len() {
            return Err(BlobError::SignatureInvalid);
        }
        let mut diff = 0u8;
        for (a, b) in expected.bytes().zip(sig.bytes()) {
            diff |= a ^ b;
        }
        if diff != 0 {
            return Err(BlobError::SignatureInvalid);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_signed_url_round_trip() {
        let signer = UrlSigner::new("a very long shared secret for tests");
        let key = "user:alice/cmp_0001/1718000000.png";

        let url = signer.signed_url(key, DEFAULT_URL_TTL_SECS, now());
        assert!(url.starts_with(&format!("/files/{}?expires=", key)));

        let expires = now().timestamp() + DEFAULT_URL_TTL_SECS;
        let sig = signer.sign(key, expires);
        assert!(signer.verify(key, expires, &sig, now()).is_ok());
    }

    #[test]
    fn test_expired_url_rejected() {
        let signer = UrlSigner::new("a very long shared secret for tests");
        let key = "user:alice/cmp_0001/1718000000.png";
        let expires = now().timestamp() - 1;
        let sig = signer.sign(key, expires);

        let result = signer.verify(key, expires, &sig, now());
        assert!(matches!(result, Err(BlobError::Expired)));
    }

    #[test]
    fn test_tampered_key_rejected() {
        let signer = UrlSigner::new("a very long shared secret for tests");
        let expires = now().timestamp() + 60;
        let sig = signer.sign("user:alice/cmp_0001/1718000000.png", expires);

        let result = signer.verify("user:bob/cmp_0002/1718000000.png", expires, &sig, now());
        assert!(matches!(result, Err(BlobError::SignatureInvalid)));
    }

    #[test]
    fn test_tampered_expiry_rejected() {
        let signer = UrlSigner::new("a very long shared secret for tests");
        let key = "user:alice/cmp_0001/1718000000.png";
        let expires = now().timestamp() + 60;
        let sig = signer.sign(key, expires);

        // extending the expiry invalidates the signature
        let result = signer.verify(key, expires + 3600, &sig, now());
        assert!(matches!(result, Err(BlobError::SignatureInvalid)));
    }

    #[test]
    fn test_different_secret_rejected() {
        let signer = UrlSigner::new("secret one");
        let other = UrlSigner::new("secret two");
        let key = "user:alice/cmp_0001/1718000000.png";
        let expires = now().timestamp() + 60;
        let sig = signer.sign(key, expires);

        assert!(matches!(
            other.verify(key, expires, &sig, now()),
            Err(BlobError::SignatureInvalid)
        ));
    }
}
