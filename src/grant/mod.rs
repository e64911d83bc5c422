/// Room access grants
///
/// A grant is a HS256-signed JWT that lets one user join one LiveKit room.
/// Grants are built fresh for every request and never stored.

pub mod claims;
pub mod issuer;
pub mod key;
pub mod verify;

pub use claims::{GrantClaims, ParticipantMetadata, VideoGrant};
pub use issuer::GrantIssuer;
pub use key::GrantSigningKey;
pub use verify::verify_grant;

/// Default grant lifetime in seconds (6 hours, the LiveKit SDK default)
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 6 * 3600;

/// Shortest accepted grant lifetime in seconds
pub const MIN_TOKEN_TTL_SECS: u64 = 60;

/// Longest accepted grant lifetime in seconds
pub const MAX_TOKEN_TTL_SECS: u64 = 24 * 3600;
