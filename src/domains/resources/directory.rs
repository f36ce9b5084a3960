//! Fixed sample user table backing the user info resource.
//!
//! The table is illustrative data, built once at start-up and only read
//! afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Payload returned when a user id is not in the table.
pub const USER_NOT_FOUND: &str = "User not found";

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
}

/// Result of looking a user up.
///
/// A miss is a value, not an error: it serializes as
/// `{"error": "User not found"}` and is returned with a success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserLookup {
    Found(UserRecord),
    Missing { error: String },
}

impl UserLookup {
    pub fn missing() -> Self {
        Self::Missing {
            error: USER_NOT_FOUND.to_string(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Read-only id → record table.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, UserRecord>,
}

impl UserDirectory {
    /// The two sample users served by the quickstart server.
    pub fn sample() -> Self {
        Self::from_records([
            ("1", "Alice", "alice@example.com"),
            ("2", "Bob", "bob@example.com"),
        ])
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
        let users = records
            .into_iter()
            .map(|(id, name, email)| {
                (
                    id.to_string(),
                    UserRecord {
                        name: name.to_string(),
                        email: email.to_string(),
                    },
                )
            })
            .collect();
        Self { users }
    }

    pub fn lookup(&self, user_id: &str) -> UserLookup {
        self.users
            .get(user_id)
            .cloned()
            .map(UserLookup::Found)
            .unwrap_or_else(UserLookup::missing)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sample_lookup() {
        let directory = UserDirectory::sample();
        assert_eq!(directory.len(), 2);
        assert_eq!(
            serde_json::to_value(directory.lookup("1")).unwrap(),
            json!({"name": "Alice", "email": "alice@example.com"})
        );
        assert_eq!(
            serde_json::to_value(directory.lookup("2")).unwrap(),
            json!({"name": "Bob", "email": "bob@example.com"})
        );
    }

    #[test]
    fn test_miss_is_a_payload() {
        let directory = UserDirectory::sample();
        for id in ["3", "", "alice", "01"] {
            let lookup = directory.lookup(id);
            assert!(!lookup.is_found());
            assert_eq!(
                serde_json::to_value(lookup).unwrap(),
                json!({"error": "User not found"})
            );
        }
    }
}
