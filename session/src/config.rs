//! Configuration for edit sessions

use editdata_edit::EditOptions;
use serde::Deserialize;

/// Configuration for an edit session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Executed INSERTs return every column of the new row
    pub capture_inserted_values: bool,
    /// Display text for calculated columns of a new row
    pub computed_placeholder: String,
    /// Cell text that means SQL NULL
    pub null_text: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capture_inserted_values: true,
            computed_placeholder: "<computed>".to_string(),
            null_text: "NULL".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_capture_inserted_values(mut self, capture: bool) -> Self {
        self.capture_inserted_values = capture;
        self
    }

    pub fn with_computed_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.computed_placeholder = placeholder.into();
        self
    }

    pub fn with_null_text(mut self, null_text: impl Into<String>) -> Self {
        self.null_text = null_text.into();
        self
    }

    pub(crate) fn edit_options(&self) -> EditOptions {
        EditOptions {
            capture_inserted_values: self.capture_inserted_values,
            null_text: self.null_text.clone(),
            computed_placeholder: self.computed_placeholder.clone(),
        }
    }
}
