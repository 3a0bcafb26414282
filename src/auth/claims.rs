use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token payload carried in the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // SessionSubject::unique_id
    pub sid: Uuid,   // server-side session row
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
    pub iss: String, // issuer
    pub aud: String, // audience
}
