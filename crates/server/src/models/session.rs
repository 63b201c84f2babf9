//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use clementine_core::{Email, UserId};

use super::user::User;

/// Session-stored user identity.
///
/// One fixed-schema serde value per session, never loosely typed fields
/// asserted at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_roundtrip() {
        let current = CurrentUser {
            id: UserId::new_random(),
            email: Email::parse("grace@example.com").unwrap(),
            name: "Grace".to_string(),
        };

        let json = serde_json::to_string(&current).unwrap();
        let back: CurrentUser = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, current.id);
        assert_eq!(back.email, current.email);
        assert_eq!(back.name, current.name);
    }
}
