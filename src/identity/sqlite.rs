/// SQLite identity store, used for local development and tests
use crate::{
    error::{VideoError, VideoResult},
    identity::{Identity, IdentityResolver},
};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Identity store backed by the local `users` table
#[derive(Clone)]
pub struct SqliteIdentityStore {
    db: SqlitePool,
}

impl SqliteIdentityStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    fn identity_from_row(row: &SqliteRow) -> VideoResult<Identity> {
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

#[async_trait]
impl IdentityResolver for SqliteIdentityStore {
    async fn resolve(&self, id: i64) -> VideoResult<Identity> {
        let row = sqlx::query(
            r#"
            SELECT id, name, surname, role, avatar_id
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(VideoError::Database)?
        .ok_or(VideoError::UserNotFound { id })?;

        Self::identity_from_row(&row)
    }
}
