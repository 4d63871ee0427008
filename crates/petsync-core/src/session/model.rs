use crate::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What survives a restart for a signed-in user.
///
/// Stored encrypted under the `user` slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user: User,
    pub authenticated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl SessionRecord {
    pub fn new(user: User, token: Option<String>) -> Self {
        Self {
            user,
            authenticated_at: Utc::now(),
            token,
        }
    }

    /// Same continuation data, new user fields (after a profile update).
    pub fn with_user(&self, user: User) -> Self {
        Self {
            user,
            authenticated_at: self.authenticated_at,
            token: self.token.clone(),
        }
    }
}
