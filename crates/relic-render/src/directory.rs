use std::collections::HashMap;

use relic_types::User;

/// Name shown for authors and reactors missing from the user list.
pub const UNKNOWN_USER_NAME: &str = "none";

/// User lookup built once per request from `users.json`.
pub struct Directory {
    users: Vec<User>,
    by_id: HashMap<String, usize>,
    unknown: User,
}

impl Directory {
    pub fn new(users: Vec<User>) -> Self {
        let mut by_id = HashMap::with_capacity(users.len());
        for (idx, user) in users.iter().enumerate() {
            // First entry wins on duplicate ids
            by_id.entry(user.id.clone()).or_insert(idx);
        }

        Self {
            users,
            by_id,
            unknown: User {
                id: String::new(),
                name: UNKNOWN_USER_NAME.to_string(),
            },
        }
    }

    /// The user with this id, or a sentinel named "none".
    pub fn user(&self, id: &str) -> &User {
        self.by_id
            .get(id)
            .map(|&idx| &self.users[idx])
            .unwrap_or(&self.unknown)
    }

    pub fn display_name(&self, id: &str) -> &str {
        &self.user(id).name
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
