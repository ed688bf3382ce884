use std::fmt;
use std::path::PathBuf;

/// The constraint a rejected field value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value outside a closed set of accepted choices.
    OneOf,
    /// Value not matching the relative-duration grammar.
    Interval,
    /// Value not shaped like `#RRGGBB`.
    ColorCode,
    /// List containing an element of the wrong kind.
    ListOf,
    /// Number outside its allowed range.
    Range,
    /// Alert query without a usable refId.
    NonEmptyRefId,
    /// String that does not parse as the expected format.
    Format,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneOf => "one_of",
            Self::Interval => "interval",
            Self::ColorCode => "color_code",
            Self::ListOf => "list_of",
            Self::Range => "range",
            Self::NonEmptyRefId => "non_empty_ref_id",
            Self::Format => "format",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub rule: Rule,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Inconsistent layout: {0}")]
    Layout(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Wrap an I/O failure with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
