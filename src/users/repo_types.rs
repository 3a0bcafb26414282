use sqlx::FromRow;

use crate::auth::session::SessionSubject;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,          // unique user ID
    pub email: String,    // normalized, unique
    pub password: String, // Argon2 PHC string, never the plaintext
    pub name: String,     // display label
}

impl SessionSubject for User {
    fn is_authenticated(&self) -> bool {
        true
    }

    fn unique_id(&self) -> String {
        self.id.to_string()
    }
}
