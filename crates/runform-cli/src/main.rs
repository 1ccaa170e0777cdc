mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde_json::{Map, Value};

use runform_core::config::{self, CONFIG_FILE_NAME, OutputFormat, RunformConfig};
use runform_core::parse::{self, reader};
use runform_core::run::{DemoRunner, RunRequest, Runner};
use runform_core::transform::{compile, has_endpoint, list_endpoints};

use report::{EndpointSummary, ValidationReport};

#[derive(Parser)]
#[command(
    name = "runform",
    about = "Turn OpenAPI operations into forms and run them",
    version
)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the endpoints of an OpenAPI document
    Endpoints {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long)]
        format: Option<FormatArg>,
    },

    /// Print the form compiled for one endpoint
    Form {
        /// Endpoint identifier, e.g. "GET /users"
        endpoint_id: String,

        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long)]
        format: Option<FormatArg>,
    },

    /// Submit values to an endpoint with the demo runner
    Run {
        /// Endpoint identifier, e.g. "POST /users"
        endpoint_id: String,

        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Field value, repeatable
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// YAML or JSON file with a mapping of field names to values
        #[arg(long)]
        values: Option<PathBuf>,

        /// Output format
        #[arg(long)]
        format: Option<FormatArg>,
    },

    /// Check that a document loads and summarize its endpoints
    Validate {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long)]
        format: Option<FormatArg>,
    },

    /// Initialize a new runform configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Endpoints { input, format } => {
            let cfg = load_config(&cli.config)?;
            cmd_endpoints(&cfg, input, format)
        }

        Commands::Form {
            endpoint_id,
            input,
            format,
        } => {
            let cfg = load_config(&cli.config)?;
            cmd_form(&cfg, &endpoint_id, input, format)
        }

        Commands::Run {
            endpoint_id,
            input,
            set,
            values,
            format,
        } => {
            let cfg = load_config(&cli.config)?;
            cmd_run(&cfg, &endpoint_id, input, set, values, format)
        }

        Commands::Validate { input, format } => {
            let cfg = load_config(&cli.config)?;
            cmd_validate(&cfg, input, format)
        }

        Commands::Init { force } => cmd_init(&cli.config, force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "runform", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the config file, falling back to defaults when it does not exist.
fn load_config(path: &Path) -> Result<RunformConfig> {
    Ok(config::load_config(path)?.unwrap_or_default())
}

fn output_format(arg: Option<FormatArg>, cfg: &RunformConfig) -> OutputFormat {
    arg.map(OutputFormat::from).unwrap_or(cfg.format)
}

fn load_document(input: Option<PathBuf>, cfg: &RunformConfig) -> Result<Value> {
    let path = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    parse::from_path(&path).with_context(|| format!("failed to load {}", path.display()))
}

/// Parse a `--set NAME=VALUE` argument.
fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got `{arg}`")),
    }
}

/// Read submitted values from a YAML or JSON mapping.
fn load_values(path: &Path) -> Result<Map<String, Value>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let value = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?,
        _ => {
            let yaml: serde_yaml_ng::Value = serde_yaml_ng::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            parse::yaml_to_json(yaml)
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => anyhow::bail!(
            "{} must contain a mapping of field names to values",
            path.display()
        ),
    }
}

fn cmd_endpoints(
    cfg: &RunformConfig,
    input: Option<PathBuf>,
    format: Option<FormatArg>,
) -> Result<()> {
    let doc = load_document(input, cfg)?;
    let endpoints = list_endpoints(&doc);
    println!("{}", report::endpoints(&endpoints, output_format(format, cfg))?);
    Ok(())
}

fn cmd_form(
    cfg: &RunformConfig,
    endpoint_id: &str,
    input: Option<PathBuf>,
    format: Option<FormatArg>,
) -> Result<()> {
    let doc = load_document(input, cfg)?;
    if !has_endpoint(&doc, endpoint_id) {
        log::warn!("{endpoint_id:?} is not an operation of the document");
    }
    let form = compile(&doc, endpoint_id);
    println!("{}", report::form(&form, output_format(format, cfg))?);
    Ok(())
}

fn cmd_run(
    cfg: &RunformConfig,
    endpoint_id: &str,
    input: Option<PathBuf>,
    set: Vec<(String, String)>,
    values: Option<PathBuf>,
    format: Option<FormatArg>,
) -> Result<()> {
    let doc = load_document(input, cfg)?;

    let mut submitted = match values {
        Some(path) => load_values(&path)?,
        None => Map::new(),
    };
    for (name, value) in set {
        submitted.insert(name, Value::String(value));
    }

    let runner = DemoRunner::new(cfg.runner.clone());
    let envelope = runner.run(&RunRequest {
        document: &doc,
        endpoint_id,
        values: &submitted,
    });
    println!("{}", report::envelope(&envelope, output_format(format, cfg))?);

    if !envelope.is_success() {
        anyhow::bail!(
            "run {} finished with status {}",
            envelope.run_id,
            envelope.status.as_str()
        );
    }
    Ok(())
}

fn cmd_validate(
    cfg: &RunformConfig,
    input: Option<PathBuf>,
    format: Option<FormatArg>,
) -> Result<()> {
    let doc = load_document(input, cfg)?;

    let endpoints = list_endpoints(&doc)
        .into_iter()
        .map(|endpoint| EndpointSummary {
            fields: compile(&doc, &endpoint.id).fields.len(),
            id: endpoint.id,
        })
        .collect();

    let summary = ValidationReport {
        version: reader::openapi_version(&doc).map(str::to_string),
        paths: reader::paths(&doc).map_or(0, |paths| paths.len()),
        endpoints,
    };
    println!("{}", report::validation(&summary, output_format(format, cfg))?);
    Ok(())
}

fn cmd_init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::try_parse_from([
            "runform",
            "run",
            "GET /search results",
            "--set",
            "q=red shoes",
            "--set",
            "filter=a=b",
        ])
        .unwrap();
        let Commands::Run {
            endpoint_id, set, ..
        } = cli.command
        else {
            panic!("expected the run command");
        };
        assert_eq!(endpoint_id, "GET /search results");
        assert_eq!(
            set,
            [
                ("q".to_string(), "red shoes".to_string()),
                ("filter".to_string(), "a=b".to_string()),
            ]
        );
        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_parse_assignment_errors() {
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=value").is_err());
        assert_eq!(
            parse_assignment("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
    }

    #[test]
    fn test_load_values() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("values.yaml");
        fs::write(&yaml, "name: Ada\nage: 36\n").unwrap();
        let values = load_values(&yaml).unwrap();
        assert_eq!(values["name"], "Ada");
        assert_eq!(values["age"], 36);

        let json = dir.path().join("values.json");
        fs::write(&json, r#"{"tags": ["a"]}"#).unwrap();
        let values = load_values(&json).unwrap();
        assert_eq!(values["tags"], serde_json::json!(["a"]));

        let list = dir.path().join("list.yaml");
        fs::write(&list, "- a\n- b\n").unwrap();
        assert!(load_values(&list).is_err());
    }

    #[test]
    fn test_format_flag_overrides_config() {
        let cfg = RunformConfig::default();
        assert_eq!(output_format(None, &cfg), OutputFormat::Text);
        assert_eq!(output_format(Some(FormatArg::Yaml), &cfg), OutputFormat::Yaml);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        cmd_init(&path, false).unwrap();
        assert!(cmd_init(&path, false).is_err());
        cmd_init(&path, true).unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.input, "openapi.json");
    }
}
