use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::repo_types::SessionRecord;

impl SessionRecord {
    pub async fn create(
        db: &SqlitePool,
        id: Uuid,
        subject: &str,
        expires_at: i64,
    ) -> sqlx::Result<SessionRecord> {
        sqlx::query_as::<_, SessionRecord>(
            r#"
            INSERT INTO sessions (id, subject, expires_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, subject, expires_at
            "#,
        )
        .bind(id.to_string())
        .bind(subject)
        .bind(expires_at)
        .fetch_one(db)
        .await
    }

    /// Live session by id; expired rows are treated as absent.
    pub async fn find_active(
        db: &SqlitePool,
        id: Uuid,
        now: i64,
    ) -> sqlx::Result<Option<SessionRecord>> {
        sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT id, subject, expires_at
            FROM sessions
            WHERE id = ?1 AND expires_at > ?2
            "#,
        )
        .bind(id.to_string())
        .bind(now)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &SqlitePool, id: Uuid) -> sqlx::Result<bool> {
        let res = sqlx::query("DELETE FROM sessions WHERE id = ?1")
            .bind(id.to_string())
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn delete_expired(db: &SqlitePool, now: i64) -> sqlx::Result<u64> {
        let res = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?1")
            .bind(now)
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }
}
