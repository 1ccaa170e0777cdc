use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::envelope::DEFAULT_TEXT_PREVIEW_LIMIT;

/// Top-level project configuration loaded from `.runform.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunformConfig {
    /// OpenAPI document read when no `--input` is given.
    pub input: String,
    pub format: OutputFormat,
    pub runner: RunnerConfig,
}

impl Default for RunformConfig {
    fn default() -> Self {
        Self {
            input: "openapi.json".to_string(),
            format: OutputFormat::Text,
            runner: RunnerConfig::default(),
        }
    }
}

/// How the CLI prints its results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Options for runners producing run envelopes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Byte budget for `text_preview` of non-JSON responses.
    pub text_preview_limit: usize,
    /// Input keys whose values are replaced before they are echoed back.
    /// Matched case-insensitively, with `-` and `_` treated alike.
    pub redact_keys: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            text_preview_limit: DEFAULT_TEXT_PREVIEW_LIMIT,
            redact_keys: ["password", "secret", "token", "api_key", "authorization"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".runform.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<RunformConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: RunformConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# runform configuration
input: openapi.json
format: text          # text | json | yaml

runner:
  text_preview_limit: 10240   # bytes kept from non-JSON responses
  redact_keys:                # input keys masked in echoed run results
    - password
    - secret
    - token
    - api_key
    - authorization
"#
}
