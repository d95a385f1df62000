//! Parsing options and configuration.

/// Options for reading CSV datasets.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for malformed records
    pub error_mode: ErrorMode,

    /// Field delimiter
    pub delimiter: u8,

    /// Whether the first record holds column names
    pub has_headers: bool,

    /// Cell texts read as missing values (compared after trimming)
    pub null_values: Vec<String>,

    /// Whether to trim whitespace around fields
    pub trim: bool,

    /// Maximum number of data rows to read (None = all)
    pub max_rows: Option<usize>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (pad or cut records with the wrong field count).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether the first record holds column names.
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Add a cell text that is read as a missing value.
    pub fn with_null_value(mut self, value: impl Into<String>) -> Self {
        self.null_values.push(value.into());
        self
    }

    /// Limit the number of data rows read.
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    /// Check if a trimmed cell text is a missing value.
    pub(crate) fn is_null_text(&self, text: &str) -> bool {
        text.is_empty() || self.null_values.iter().any(|v| v == text)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            delimiter: b',',
            has_headers: true,
            null_values: vec!["NaN".to_string(), "nan".to_string(), "NULL".to_string()],
            trim: true,
            max_rows: None,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on records with the wrong number of fields
    #[default]
    Strict,
    /// Pad short records with missing values and drop extra fields
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_null_values() {
        let options = ParseOptions::default();
        assert!(options.is_null_text(""));
        assert!(options.is_null_text("NaN"));
        assert!(!options.is_null_text("?"));
    }

    #[test]
    fn test_builder_methods() {
        let options = ParseOptions::new()
            .lenient()
            .with_delimiter(b';')
            .with_null_value("?")
            .with_max_rows(10);
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.delimiter, b';');
        assert!(options.is_null_text("?"));
        assert_eq!(options.max_rows, Some(10));
    }
}
