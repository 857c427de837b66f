use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload identifying a logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub id: Uuid,      // user ID
    pub name: String,
    pub email: String,
    pub iat: usize,    // issued at (unix timestamp)
    pub exp: usize,    // expires at (unix timestamp)
}
