/// User domain type
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// Account role as carried in the token claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Admins may delete songs from the catalogue
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Signed-in user, as shown in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login email
    pub email: String,

    /// Account role
    pub role: Role,
}
