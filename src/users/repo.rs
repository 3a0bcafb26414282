use sqlx::SqlitePool;

use super::User;

impl User {
    /// Find a user by (already normalized) email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, name
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, name
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Insert a new user. `Ok(None)` when the email is already taken, which
    /// covers two registrations racing past the lookup in the handler.
    pub async fn create(
        db: &SqlitePool,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> sqlx::Result<Option<User>> {
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, password)
            VALUES (?1, ?2, ?3)
            RETURNING id, email, password, name
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(db)
        .await;

        match inserted {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
