use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// A submitted form value that cannot be turned into run inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    #[error("missing required field: {0}")]
    MissingRequired(String),

    #[error("field `{field}` expects a {expected} value")]
    WrongKind {
        field: String,
        expected: &'static str,
    },

    #[error("field `{field}` must be {bound} {limit}")]
    OutOfRange {
        field: String,
        bound: &'static str,
        limit: String,
    },

    #[error("field `{field}` does not match pattern `{pattern}`")]
    PatternMismatch { field: String, pattern: String },

    #[error("field `{field}` must be one of: {}", .allowed.join(", "))]
    NotAnOption { field: String, allowed: Vec<String> },

    #[error("field `{field}` is not valid JSON: {message}")]
    InvalidJson { field: String, message: String },
}

impl SubmissionError {
    /// Name of the form field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            SubmissionError::MissingRequired(field) => field,
            SubmissionError::WrongKind { field, .. }
            | SubmissionError::OutOfRange { field, .. }
            | SubmissionError::PatternMismatch { field, .. }
            | SubmissionError::NotAnOption { field, .. }
            | SubmissionError::InvalidJson { field, .. } => field,
        }
    }
}
