/// Signing key for room access grants
use crate::error::{VideoError, VideoResult};
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::fmt;

/// LiveKit API key and secret pair
///
/// Loaded once at startup and shared read-only by every issuance.
#[derive(Clone)]
pub struct GrantSigningKey {
    api_key: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl GrantSigningKey {
    /// Build a key from the API key id and shared secret.
    ///
    /// Both must be non-blank.
    pub fn new(api_key: &str, api_secret: &str) -> VideoResult<Self> {
        if api_key.trim().is_empty() {
            return Err(VideoError::Configuration("LiveKit API key is missing".to_string()));
        }
        if api_secret.trim().is_empty() {
            return Err(VideoError::Configuration("LiveKit API secret is missing".to_string()));
        }

        Ok(Self {
            api_key: api_key.to_string(),
            encoding_key: EncodingKey::from_secret(api_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(api_secret.as_bytes()),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl fmt::Debug for GrantSigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrantSigningKey")
            .field("api_key", &self.api_key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_parts() {
        assert!(matches!(
            GrantSigningKey::new("", "secret"),
            Err(VideoError::Configuration(_))
        ));
        assert!(matches!(
            GrantSigningKey::new("APIkey", "   "),
            Err(VideoError::Configuration(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let key = GrantSigningKey::new("APIkey", "super-secret-value").unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("APIkey"));
        assert!(!debug.contains("super-secret-value"));
    }
}
