use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default budget for `text_preview`, in bytes.
pub const DEFAULT_TEXT_PREVIEW_LIMIT: usize = 10 * 1024;

/// Outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Error,
    Timeout,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Success => "success",
            RunStatus::Error => "error",
            RunStatus::Timeout => "timeout",
        }
    }
}

/// Machine-readable classification of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorClass {
    ImportError,
    EntrypointNotFound,
    EndpointNotFound,
    ValidationError,
    RuntimeError,
    Timeout,
    NetworkError,
    Unknown,
}

impl ErrorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::ImportError => "IMPORT_ERROR",
            ErrorClass::EntrypointNotFound => "ENTRYPOINT_NOT_FOUND",
            ErrorClass::EndpointNotFound => "ENDPOINT_NOT_FOUND",
            ErrorClass::ValidationError => "VALIDATION_ERROR",
            ErrorClass::RuntimeError => "RUNTIME_ERROR",
            ErrorClass::Timeout => "TIMEOUT",
            ErrorClass::NetworkError => "NETWORK_ERROR",
            ErrorClass::Unknown => "UNKNOWN",
        }
    }

    /// A default next step to show next to the error message.
    pub fn suggested_fix(&self) -> &'static str {
        match self {
            ErrorClass::ImportError => "Check that the app imports cleanly and its dependencies are installed.",
            ErrorClass::EntrypointNotFound => "Point the entrypoint at the app object, e.g. `main:app`.",
            ErrorClass::EndpointNotFound => "Pick an endpoint listed in the OpenAPI document.",
            ErrorClass::ValidationError => "Fix the highlighted input and run again.",
            ErrorClass::RuntimeError => "Inspect the traceback for the exception raised by the handler.",
            ErrorClass::Timeout => "Reduce the work done per request or raise the time limit.",
            ErrorClass::NetworkError => "Check that the outbound host is reachable.",
            ErrorClass::Unknown => "Retry the run; report it if the error persists.",
        }
    }
}

/// A file produced by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    pub mime: String,
    pub url: String,
}

/// The standardized result of executing one endpoint.
///
/// Every runner emits this shape, so a renderer can display any run without
/// knowing which backend produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEnvelope {
    pub run_id: String,
    pub status: RunStatus,
    pub duration_ms: u64,

    pub http_status: u16,
    pub content_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_preview: Option<String>,

    #[serde(default)]
    pub artifacts: Vec<ArtifactRef>,

    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub redactions_applied: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_class: Option<ErrorClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
}

impl RunEnvelope {
    /// Envelope for a completed HTTP response.
    ///
    /// JSON bodies that parse land in `json`; anything else is kept as a
    /// preview cut to `preview_limit` bytes.
    pub fn from_response(
        run_id: impl Into<String>,
        duration: Duration,
        http_status: u16,
        content_type: impl Into<String>,
        body: &str,
        preview_limit: usize,
    ) -> Self {
        let content_type = content_type.into();
        let mut envelope = Self::base(run_id.into(), RunStatus::Success, duration, http_status);

        let parsed = if is_json_content_type(&content_type) {
            match serde_json::from_str::<Value>(body) {
                Ok(value) => Some(value),
                Err(e) => {
                    envelope
                        .warnings
                        .push(format!("response declared JSON but did not parse: {e}"));
                    None
                }
            }
        } else {
            None
        };

        match parsed {
            Some(value) => envelope.json = Some(value),
            None if !body.is_empty() => {
                let preview = truncate_preview(body, preview_limit);
                if preview.len() < body.len() {
                    envelope.warnings.push(format!(
                        "response truncated to {} of {} bytes",
                        preview.len(),
                        body.len()
                    ));
                }
                envelope.text_preview = Some(preview.to_string());
            }
            None => {}
        }

        envelope.content_type = content_type;
        envelope
    }

    /// Envelope for a run that failed before or while producing a response.
    pub fn error(
        run_id: impl Into<String>,
        duration: Duration,
        http_status: u16,
        class: ErrorClass,
        message: impl Into<String>,
    ) -> Self {
        let mut envelope = Self::base(run_id.into(), RunStatus::Error, duration, http_status);
        envelope.error_class = Some(class);
        envelope.error_message = Some(message.into());
        envelope.suggested_fix = Some(class.suggested_fix().to_string());
        envelope
    }

    /// Envelope for a run that exceeded its time limit.
    pub fn timeout(run_id: impl Into<String>, duration: Duration) -> Self {
        let mut envelope = Self::base(run_id.into(), RunStatus::Timeout, duration, 504);
        envelope.error_class = Some(ErrorClass::Timeout);
        envelope.error_message = Some(format!(
            "request timed out after {}ms",
            envelope.duration_ms
        ));
        envelope.suggested_fix = Some(ErrorClass::Timeout.suggested_fix().to_string());
        envelope
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }

    fn base(run_id: String, status: RunStatus, duration: Duration, http_status: u16) -> Self {
        Self {
            run_id,
            status,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            http_status,
            content_type: "application/json".to_string(),
            json: None,
            text_preview: None,
            artifacts: Vec::new(),
            warnings: Vec::new(),
            redactions_applied: false,
            error_class: None,
            error_message: None,
            suggested_fix: None,
        }
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

/// Cut `text` to at most `limit` bytes without splitting a character.
pub fn truncate_preview(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
