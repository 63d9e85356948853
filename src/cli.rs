//! CLI command definitions for jss-config
//!
//! The binary is a thin wrapper: everything here turns arguments into
//! [`ComposeInputs`] for the library.

use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{load_package_metadata, load_setup_config, ComposeInputs, DEFAULT_OUTPUT_PATH};
use crate::error::{ConfigError, ConfigResult};

/// Setup file name, relative to the project root
pub const SETUP_CONFIG_FILE: &str = "scjssconfig.json";

/// Package manifest name, relative to the project root
pub const PACKAGE_FILE: &str = "package.json";

/// Generate the runtime environment config for a JSS app
#[derive(Parser, Debug)]
#[command(name = "jss-config")]
#[command(about = "Generate the runtime environment config for a JSS app", version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose the config and write the environment module
    Generate {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output file (default: src/environments/environment.ts)
        #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,

        /// Print the module to stdout instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Compose and validate the config without writing anything
    Verify {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Where configuration comes from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Project root containing scjssconfig.json and package.json
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Path to the setup config (default: <root>/scjssconfig.json)
    #[arg(long)]
    pub setup_config: Option<PathBuf>,

    /// Path to package metadata (default: <root>/package.json)
    #[arg(long)]
    pub package: Option<PathBuf>,

    /// JSON file with an object of override values
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// Override a single value (KEY=VALUE, VALUE parsed as JSON when possible)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Mark the build as production
    #[arg(long)]
    pub production: bool,
}

impl SourceArgs {
    /// Effective setup config path
    pub fn setup_path(&self) -> PathBuf {
        self.setup_config
            .clone()
            .unwrap_or_else(|| self.root.join(SETUP_CONFIG_FILE))
    }

    /// Effective package metadata path
    pub fn package_path(&self) -> PathBuf {
        self.package
            .clone()
            .unwrap_or_else(|| self.root.join(PACKAGE_FILE))
    }

    /// Load every source named by the arguments
    pub fn load_inputs(&self) -> ConfigResult<ComposeInputs> {
        Ok(ComposeInputs {
            setup: load_setup_config(&self.setup_path()),
            package: load_package_metadata(&self.package_path())?,
            overrides: self.build_overrides()?,
        })
    }

    /// Override layer: overrides file, then `--production`, then `--set` values.
    ///
    /// `None` when no override was requested at all.
    pub fn build_overrides(&self) -> ConfigResult<Option<Map<String, Value>>> {
        if self.overrides.is_none() && !self.production && self.set.is_empty() {
            return Ok(None);
        }

        let mut layer = match &self.overrides {
            Some(path) => load_overrides_file(path)?,
            None => Map::new(),
        };

        if self.production {
            layer.insert("production".into(), Value::Bool(true));
        }

        for arg in &self.set {
            let (key, value) = parse_set(arg)?;
            layer.insert(key, value);
        }

        Ok(Some(layer))
    }
}

/// Parse one `KEY=VALUE` override.
///
/// The value is taken as JSON when it parses (`true`, `42`, `"quoted"`,
/// `{...}`), otherwise as a plain string.
pub fn parse_set(arg: &str) -> ConfigResult<(String, Value)> {
    let (key, raw) = arg
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidOverride(format!("expected KEY=VALUE, got '{}'", arg)))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::InvalidOverride(format!("empty key in '{}'", arg)));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

fn load_overrides_file(path: &Path) -> ConfigResult<Map<String, Value>> {
    let text = fs::read_to_string(path)
        .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

    match serde_json::from_str(&text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ConfigError::InvalidOverride(format!(
            "{}: expected a JSON object",
            path.display()
        ))),
        Err(e) => Err(ConfigError::ParseError(format!("{}: {}", path.display(), e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_parse_set_json_values() {
        assert_eq!(parse_set("production=true").unwrap(), ("production".into(), json!(true)));
        assert_eq!(parse_set("port=3000").unwrap(), ("port".into(), json!(3000)));
        assert_eq!(parse_set("name=\"quoted\"").unwrap(), ("name".into(), json!("quoted")));
    }

    #[test]
    fn test_parse_set_plain_string() {
        let (key, value) = parse_set("sitecoreApiHost=https://cm.example.com").unwrap();
        assert_eq!(key, "sitecoreApiHost");
        assert_eq!(value, json!("https://cm.example.com"));

        // Only the first '=' splits
        let (_, value) = parse_set("query=a=b").unwrap();
        assert_eq!(value, json!("a=b"));

        let (_, value) = parse_set("empty=").unwrap();
        assert_eq!(value, json!(""));
    }

    #[test]
    fn test_parse_set_rejects_malformed() {
        assert!(matches!(parse_set("noequals"), Err(ConfigError::InvalidOverride(_))));
        assert!(matches!(parse_set(" =value"), Err(ConfigError::InvalidOverride(_))));
    }

    #[test]
    fn test_no_overrides_is_none() {
        let args = SourceArgs::default();
        assert!(args.build_overrides().unwrap().is_none());
    }

    #[test]
    fn test_override_layer_order() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("overrides.json");
        fs::write(&file, r#"{"production": false, "sitecoreApiKey": "FROM_FILE", "extra": 1}"#)
            .unwrap();

        let args = SourceArgs {
            overrides: Some(file),
            production: true,
            set: vec!["sitecoreApiKey=FROM_SET".to_string()],
            ..Default::default()
        };

        let layer = args.build_overrides().unwrap().unwrap();
        assert_eq!(layer["production"], true);
        assert_eq!(layer["sitecoreApiKey"], "FROM_SET");
        assert_eq!(layer["extra"], 1);
    }

    #[test]
    fn test_overrides_file_must_be_object() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("overrides.json");
        fs::write(&file, "[1, 2]").unwrap();

        let args = SourceArgs {
            overrides: Some(file),
            ..Default::default()
        };
        assert!(matches!(args.build_overrides(), Err(ConfigError::InvalidOverride(_))));
    }

    #[test]
    fn test_paths_relative_to_root() {
        let args = SourceArgs {
            root: PathBuf::from("app"),
            ..Default::default()
        };
        assert_eq!(args.setup_path(), PathBuf::from("app/scjssconfig.json"));
        assert_eq!(args.package_path(), PathBuf::from("app/package.json"));

        let args = SourceArgs {
            package: Some(PathBuf::from("meta/package.json")),
            ..args
        };
        assert_eq!(args.package_path(), PathBuf::from("meta/package.json"));
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "jss-config",
            "generate",
            "--production",
            "--set",
            "a=1",
            "--set",
            "b=two",
            "-o",
            "out.ts",
        ])
        .unwrap();

        match cli.command {
            Command::Generate { sources, output, dry_run } => {
                assert!(sources.production);
                assert_eq!(sources.set, ["a=1", "b=two"]);
                assert_eq!(output, PathBuf::from("out.ts"));
                assert!(!dry_run);
                assert_eq!(sources.root, PathBuf::from("."));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_default_output() {
        let cli = Cli::try_parse_from(["jss-config", "generate"]).unwrap();
        match cli.command {
            Command::Generate { output, .. } => {
                assert_eq!(output, PathBuf::from(DEFAULT_OUTPUT_PATH));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
