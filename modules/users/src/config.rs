use serde::{Deserialize, Serialize};

/// `modules.users` configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UsersConfig {
    /// Number of sample users created at startup.
    pub seed_users: u32,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self { seed_users: 2 }
    }
}
