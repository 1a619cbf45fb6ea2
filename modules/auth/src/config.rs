use serde::{Deserialize, Serialize};

/// Configuration for the auth module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    #[serde(default = "default_max_username_length")]
    pub max_username_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
            max_username_length: default_max_username_length(),
        }
    }
}

fn default_min_password_length() -> usize {
    8
}

fn default_max_username_length() -> usize {
    64
}
