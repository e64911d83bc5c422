/// Claim set carried in a room access grant
use crate::{
    error::{VideoError, VideoResult},
    identity::{Identity, Role},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// JWT payload for a room access grant
///
/// ```json
/// {
///   "iss": "APIkey",
///   "sub": "42",
///   "name": "Anna Ivanova",
///   "metadata": "{\"role\": \"SPECIALIST\", \"avatarId\": 7}",
///   "video": { "room": "consult-100", "roomJoin": true },
///   "nbf": 1760850000,
///   "iat": 1760850000,
///   "exp": 1760871600
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantClaims {
    /// API key the grant was signed with; the media server picks the secret by it
    pub iss: String,

    /// User id as a string
    pub sub: String,

    /// Display name
    pub name: String,

    /// JSON-encoded [`ParticipantMetadata`], stored as a string
    pub metadata: String,

    pub video: VideoGrant,

    pub nbf: i64,
    pub iat: i64,
    pub exp: i64,
}

impl GrantClaims {
    /// Build the claims for `identity` joining `room_name`, valid from `issued_at` for `ttl`
    pub fn new(
        api_key: &str,
        identity: &Identity,
        room_name: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let now = issued_at.timestamp();

        Self {
            iss: api_key.to_string(),
            sub: identity.id.to_string(),
            name: identity.display_name(),
            metadata: ParticipantMetadata::from(identity).encode(),
            video: VideoGrant::join(room_name),
            nbf: now,
            iat: now,
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Decode the embedded metadata string
    pub fn participant_metadata(&self) -> VideoResult<ParticipantMetadata> {
        ParticipantMetadata::decode(&self.metadata)
    }
}

/// Room permissions, scoped to exactly one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    pub room: String,
    pub room_join: bool,
}

impl VideoGrant {
    pub fn join(room_name: &str) -> Self {
        Self {
            room: room_name.to_string(),
            room_join: true,
        }
    }
}

/// Profile data the media server hands to other participants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantMetadata {
    pub role: Role,
    pub avatar_id: Option<i64>,
}

impl ParticipantMetadata {
    /// Encode as `{"role": "<ROLE>", "avatarId": <int|null>}`.
    ///
    /// Existing consumers match this exact spacing and field order, so it is
    /// written by hand rather than through `serde_json::to_string`.
    pub fn encode(&self) -> String {
        let avatar_id = match self.avatar_id {
            Some(id) => id.to_string(),
            None => "null".to_string(),
        };

        format!(
            "{{\"role\": \"{}\", \"avatarId\": {}}}",
            self.role.as_str(),
            avatar_id
        )
    }

    pub fn decode(raw: &str) -> VideoResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| VideoError::InvalidGrant(format!("Malformed metadata: {}", e)))
    }
}

impl From<&Identity> for ParticipantMetadata {
    fn from(identity: &Identity) -> Self {
        Self {
            role: identity.role,
            avatar_id: identity.avatar_id,
        }
    }
}
