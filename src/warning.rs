//! Non-fatal findings returned alongside results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-fatal condition worth telling the caller about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Section or column the warning concerns
    pub topic: String,
    /// Human-readable message
    pub message: String,
}

impl Warning {
    /// Create a warning and log it.
    pub fn new(topic: impl Into<String>, message: impl Into<String>) -> Self {
        let warning = Self {
            topic: topic.into(),
            message: message.into(),
        };
        log::warn!("{}", warning);
        warning
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.topic, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let warning = Warning::new("target", "Threshold is not used for numerical targets.");
        assert_eq!(
            warning.to_string(),
            "[target] Threshold is not used for numerical targets."
        );
    }
}
