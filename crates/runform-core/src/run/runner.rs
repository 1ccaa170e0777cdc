use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::config::RunnerConfig;
use crate::model::{ErrorClass, RunEnvelope};
use crate::parse::reader::JsonMap;
use crate::transform::{compile_sections, has_endpoint};

use super::submission::build_run_inputs;

/// Replacement for redacted input values.
pub const REDACTED: &str = "[REDACTED]";

/// One request to execute an endpoint with submitted form values.
#[derive(Debug, Clone, Copy)]
pub struct RunRequest<'a> {
    pub document: &'a Value,
    pub endpoint_id: &'a str,
    pub values: &'a JsonMap,
}

/// Trait for backends that execute an endpoint and report a [`RunEnvelope`].
///
/// Failures are reported inside the envelope, never as a Rust error, so a
/// renderer always has something to show.
pub trait Runner {
    fn run(&self, request: &RunRequest<'_>) -> RunEnvelope;
}

/// Runner that validates the submission and answers with a mocked response
/// echoing the inputs. Nothing is executed.
#[derive(Debug, Clone, Default)]
pub struct DemoRunner {
    config: RunnerConfig,
}

impl DemoRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    fn new_run_id() -> String {
        format!("demo-{}", Uuid::new_v4())
    }
}

impl Runner for DemoRunner {
    fn run(&self, request: &RunRequest<'_>) -> RunEnvelope {
        let started = Instant::now();
        let run_id = Self::new_run_id();
        let endpoint_id = request.endpoint_id;

        if !has_endpoint(request.document, endpoint_id) {
            log::info!("{run_id}: endpoint {endpoint_id:?} not found");
            return RunEnvelope::error(
                run_id,
                started.elapsed(),
                404,
                ErrorClass::EndpointNotFound,
                format!("endpoint `{endpoint_id}` is not in the OpenAPI document"),
            );
        }

        let form = compile_sections(request.document, endpoint_id);
        let inputs = match build_run_inputs(&form, request.values) {
            Ok(inputs) => inputs,
            Err(e) => {
                log::info!("{run_id}: rejected submission for {endpoint_id}: {e}");
                return RunEnvelope::error(
                    run_id,
                    started.elapsed(),
                    422,
                    ErrorClass::ValidationError,
                    e.to_string(),
                );
            }
        };

        let mut echoed = match serde_json::to_value(&inputs) {
            Ok(value) => value,
            Err(e) => {
                return RunEnvelope::error(
                    run_id,
                    started.elapsed(),
                    500,
                    ErrorClass::Unknown,
                    format!("failed to encode inputs: {e}"),
                );
            }
        };
        let redacted = redact(&mut echoed, &self.config.redact_keys);

        let body = json!({
            "demo": "This is a mocked response",
            "endpoint": endpoint_id,
            "inputs": echoed,
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });

        let mut envelope = RunEnvelope::from_response(
            run_id,
            started.elapsed(),
            200,
            "application/json",
            &body.to_string(),
            self.config.text_preview_limit,
        );
        envelope.redactions_applied = redacted;
        log::debug!("{}: demo run of {endpoint_id} succeeded", envelope.run_id);
        envelope
    }
}

/// Replace values stored under any of `keys`, at any depth.
///
/// Keys match case-insensitively with `-` and `_` treated alike. Returns
/// whether anything was replaced.
pub fn redact(value: &mut Value, keys: &[String]) -> bool {
    let keys: Vec<String> = keys.iter().map(|k| normalize_key(k)).collect();
    redact_normalized(value, &keys)
}

fn redact_normalized(value: &mut Value, keys: &[String]) -> bool {
    match value {
        Value::Object(map) => {
            let mut redacted = false;
            for (key, inner) in map.iter_mut() {
                if !inner.is_null() && keys.contains(&normalize_key(key)) {
                    *inner = Value::String(REDACTED.to_string());
                    redacted = true;
                } else {
                    redacted |= redact_normalized(inner, keys);
                }
            }
            redacted
        }
        Value::Array(items) => items
            .iter_mut()
            .fold(false, |acc, item| redact_normalized(item, keys) || acc),
        _ => false,
    }
}

fn normalize_key(key: &str) -> String {
    key.to_ascii_lowercase().replace('-', "_")
}
