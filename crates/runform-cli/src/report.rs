use anyhow::Result;
use minijinja::{Environment, context};
use serde::Serialize;

use runform_core::config::OutputFormat;
use runform_core::{EndpointMeta, FormField, FormModel, RunEnvelope};

/// Per-document summary printed by `runform validate`.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub version: Option<String>,
    pub paths: usize,
    pub endpoints: Vec<EndpointSummary>,
}

#[derive(Debug, Serialize)]
pub struct EndpointSummary {
    pub id: String,
    pub fields: usize,
}

/// Serialize `value` for the structured output formats.
fn structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    Ok(match format {
        OutputFormat::Text => None,
        OutputFormat::Json => Some(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => Some(serde_yaml_ng::to_string(value)?.trim_end().to_string()),
    })
}

fn render(name: &str, source: &str, ctx: minijinja::Value) -> Result<String> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template(name, source)?;
    let rendered = env.get_template(name)?.render(ctx)?;
    Ok(rendered.trim_end().to_string())
}

pub fn endpoints(endpoints: &[EndpointMeta], format: OutputFormat) -> Result<String> {
    if let Some(out) = structured(&endpoints, format)? {
        return Ok(out);
    }
    render(
        "endpoints.txt.j2",
        include_str!("../templates/endpoints.txt.j2"),
        context! { endpoints => endpoints },
    )
}

pub fn form(form: &FormModel, format: OutputFormat) -> Result<String> {
    if let Some(out) = structured(form, format)? {
        return Ok(out);
    }
    let fields: Vec<minijinja::Value> = form.fields.iter().map(field_to_ctx).collect();
    render(
        "form.txt.j2",
        include_str!("../templates/form.txt.j2"),
        context! {
            endpoint_id => form.endpoint_id.clone(),
            fields => fields,
        },
    )
}

fn field_to_ctx(field: &FormField) -> minijinja::Value {
    let mut constraints = Vec::new();
    if let Some(default) = &field.default_value {
        constraints.push(format!("default {default}"));
    }
    if let Some(options) = &field.options {
        constraints.push(format!("one of {}", options.join("|")));
    }
    if let Some(min) = &field.min_length {
        constraints.push(format!("minLength {min}"));
    }
    if let Some(max) = &field.max_length {
        constraints.push(format!("maxLength {max}"));
    }
    if let Some(pattern) = &field.pattern {
        constraints.push(format!("pattern {pattern}"));
    }
    if let Some(min) = &field.minimum {
        constraints.push(format!("minimum {min}"));
    }
    if let Some(max) = &field.maximum {
        constraints.push(format!("maximum {max}"));
    }

    context! {
        name => field.name.clone(),
        label => field.label.clone(),
        kind => field.kind.as_str(),
        required => field.required,
        constraints => constraints,
    }
}

pub fn envelope(envelope: &RunEnvelope, format: OutputFormat) -> Result<String> {
    if let Some(out) = structured(envelope, format)? {
        return Ok(out);
    }
    let body = match (&envelope.json, &envelope.text_preview) {
        (Some(json), _) => Some(serde_json::to_string_pretty(json)?),
        (None, Some(text)) => Some(text.clone()),
        (None, None) => None,
    };

    render(
        "run.txt.j2",
        include_str!("../templates/run.txt.j2"),
        context! {
            run_id => envelope.run_id.clone(),
            status => envelope.status.as_str(),
            http_status => envelope.http_status,
            duration_ms => envelope.duration_ms,
            error_class => envelope.error_class.map(|class| class.as_str()),
            error_message => envelope.error_message.clone(),
            suggested_fix => envelope.suggested_fix.clone(),
            redactions_applied => envelope.redactions_applied,
            warnings => envelope.warnings.clone(),
            body => body,
        },
    )
}

pub fn validation(report: &ValidationReport, format: OutputFormat) -> Result<String> {
    if let Some(out) = structured(report, format)? {
        return Ok(out);
    }
    render(
        "validate.txt.j2",
        include_str!("../templates/validate.txt.j2"),
        context! {
            version => report.version.as_deref().unwrap_or("(unknown version)"),
            paths => report.paths,
            endpoints => &report.endpoints,
        },
    )
}
