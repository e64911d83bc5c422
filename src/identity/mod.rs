/// Identity Resolution
///
/// Looks up the profile of a user by numeric id so a grant can be issued
/// for them. Identities are owned by the identity store and are never
/// mutated on the grant path.

pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresIdentityStore;
pub use sqlite::SqliteIdentityStore;

use crate::error::{VideoError, VideoResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User roles known to the identity store
///
/// The store keeps the lowercase form; the canonical (wire) form is uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Client,
    Specialist,
    Moderator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Specialist => "SPECIALIST",
            Role::Moderator => "MODERATOR",
            Role::Admin => "ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = VideoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client" => Ok(Role::Client),
            "specialist" => Ok(Role::Specialist),
            "moderator" => Ok(Role::Moderator),
            "admin" => Ok(Role::Admin),
            _ => Err(VideoError::Internal(format!("Unknown role in identity store: {}", s))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's identity and profile attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub role: Role,
    pub avatar_id: Option<i64>,
}

impl Identity {
    /// Display name shown to other participants: name and surname joined by one space
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Identity store lookup
///
/// Implementations are read-only and safe to call concurrently.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve a user id to its identity.
    ///
    /// Returns `VideoError::UserNotFound` when no record exists for `id`.
    async fn resolve(&self, id: i64) -> VideoResult<Identity>;
}
