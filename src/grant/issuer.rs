/// Grant issuer - resolves the participant and signs a room access grant
use crate::{
    error::{VideoError, VideoResult},
    grant::{GrantClaims, GrantSigningKey},
    identity::IdentityResolver,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, Header};
use std::sync::Arc;
use tracing::{error, info};

/// Issues room access grants
///
/// Holds no per-call state; one instance is shared by all requests.
pub struct GrantIssuer {
    resolver: Arc<dyn IdentityResolver>,
    key: GrantSigningKey,
    ttl: Duration,
}

impl GrantIssuer {
    pub fn new(resolver: Arc<dyn IdentityResolver>, key: GrantSigningKey, ttl: Duration) -> Self {
        Self { resolver, key, ttl }
    }

    pub fn signing_key(&self) -> &GrantSigningKey {
        &self.key
    }

    /// Issue a grant for `user_id` to join `room_name`, returning the compact JWT
    pub async fn issue(&self, room_name: &str, user_id: i64) -> VideoResult<String> {
        self.issue_at(room_name, user_id, Utc::now()).await
    }

    /// Issue a grant with an explicit issuance time
    ///
    /// Output is deterministic for identical inputs and key.
    pub async fn issue_at(
        &self,
        room_name: &str,
        user_id: i64,
        issued_at: DateTime<Utc>,
    ) -> VideoResult<String> {
        // Arguments are checked before touching the identity store
        if room_name.trim().is_empty() {
            return Err(VideoError::InvalidArgument(
                "roomName must not be blank".to_string(),
            ));
        }
        if user_id <= 0 {
            return Err(VideoError::InvalidArgument(format!(
                "userId must be a positive integer, got {}",
                user_id
            )));
        }

        let identity = self.resolver.resolve(user_id).await?;

        let claims = GrantClaims::new(self.key.api_key(), &identity, room_name, issued_at, self.ttl);
        let token = self.sign(&claims)?;

        info!(room = %room_name, subject = %claims.sub, "Issued room grant");

        Ok(token)
    }

    fn sign(&self, claims: &GrantClaims) -> VideoResult<String> {
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(self.key.api_key().to_string());

        encode(&header, claims, self.key.encoding_key()).map_err(|e| {
            error!(room = %claims.video.room, subject = %claims.sub, "Failed to sign grant: {}", e);
            VideoError::Signing(format!("Failed to sign grant: {}", e))
        })
    }
}
