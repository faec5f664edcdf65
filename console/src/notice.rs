use crate::error::ConsoleError;
use std::fmt;

/// A message raised after a mutation the backend did not confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `action` reads as a verb phrase, e.g. "remove the grant".
    pub fn failed(action: &str, err: &ConsoleError) -> Self {
        Self::new(format!("Could not {}: {}", action, err))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
