use sqlx::FromRow;

/// Server-side record of a live session.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRecord {
    pub id: String,      // Claims::sid
    pub subject: String, // SessionSubject::unique_id of the bound entity
    pub expires_at: i64, // unix timestamp
}
