/// Grant verification
use crate::{
    error::{VideoError, VideoResult},
    grant::{GrantClaims, GrantSigningKey},
};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, Validation};

/// Verify a grant with full validation
///
/// This performs:
/// 1. Signature verification against `key`
/// 2. Issuer check (must be `key`'s API key)
/// 3. Expiration and not-before checking
pub fn verify_grant(token: &str, key: &GrantSigningKey) -> VideoResult<GrantClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[key.api_key()]);
    validation.validate_nbf = true;

    decode::<GrantClaims>(token, key.decoding_key(), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::warn!("Grant verification failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    VideoError::InvalidGrant("Grant has expired".to_string())
                }
                ErrorKind::InvalidSignature => {
                    VideoError::InvalidGrant("Invalid grant signature".to_string())
                }
                ErrorKind::InvalidIssuer => {
                    VideoError::InvalidGrant("Grant issued for another key".to_string())
                }
                _ => VideoError::InvalidGrant(format!("Malformed grant: {}", e)),
            }
        })
}
