//! JWT claims structure for access tokens.

use serde::{Deserialize, Serialize};

/// Claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a user ID.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
