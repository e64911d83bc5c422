/// PostgreSQL identity store
///
/// Reads the `users` table owned by the CMS. The schema is managed there, so
/// this store runs no migrations and only issues read queries.
use crate::{
    error::{VideoError, VideoResult},
    identity::{Identity, IdentityResolver},
};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PostgresIdentityStore {
    db: PgPool,
}

impl PostgresIdentityStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityResolver for PostgresIdentityStore {
    async fn resolve(&self, id: i64) -> VideoResult<Identity> {
        // role is a named enum on the CMS side
        let row = sqlx::query(
            r#"
            SELECT id::int8 AS id, name, surname, role::text AS role, avatar_id::int8 AS avatar_id
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(VideoError::Database)?
        .ok_or(VideoError::UserNotFound { id })?;

        let role: String = row.try_get("role")?;

        Ok(Identity {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            surname: row.try_get("surname")?,
            role: role.parse()?,
            avatar_id: row.try_get("avatar_id")?,
        })
    }
}
