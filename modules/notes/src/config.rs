use serde::{Deserialize, Serialize};

/// Configuration for the notes module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotesConfig {
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            max_title_length: default_max_title_length(),
        }
    }
}

fn default_max_title_length() -> usize {
    255
}
