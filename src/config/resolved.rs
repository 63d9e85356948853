//! Resolved environment configuration with provenance
//!
//! Merges the four layers, checks the inputs of the computed GraphQL
//! endpoint, and renders the `environment.ts` module the app imports.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;
use super::sources::{Loaded, PackageMetadata, SetupConfig};
use crate::error::{ConfigError, ConfigResult};

/// Where the environment module is written unless told otherwise
pub const DEFAULT_OUTPUT_PATH: &str = "src/environments/environment.ts";

const FILE_HEADER: &str = "/* tslint:disable */\n\
// Do not edit this file, it is auto-generated at build time!\n\
// See `jss-config generate` to modify the generation of this file.\n";

/// Origin of a configuration layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    Setup,
    Package,
    Overrides,
}

impl std::fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            ConfigOrigin::Builtin => "builtin",
            ConfigOrigin::Setup => "setup",
            ConfigOrigin::Package => "package",
            ConfigOrigin::Overrides => "overrides",
        })
    }
}

/// A contributing config source with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    /// Origin of this source
    pub origin: ConfigOrigin,

    /// File path (None for builtin/overrides)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/overrides)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl ConfigSource {
    fn from_loaded<T>(origin: ConfigOrigin, loaded: &Loaded<T>) -> Self {
        Self {
            origin,
            path: Some(loaded.path.to_string_lossy().to_string()),
            digest: Some(loaded.digest.clone()),
        }
    }
}

/// Everything the composer reads, passed in explicitly
#[derive(Debug, Clone, Default)]
pub struct ComposeInputs {
    /// Parsed `scjssconfig.json`, if one was found
    pub setup: Option<Loaded<SetupConfig>>,

    /// Parsed `package.json`, if one was found
    pub package: Option<Loaded<PackageMetadata>>,

    /// Caller-supplied values; these win over everything else
    pub overrides: Option<Map<String, Value>>,
}

/// Merged configuration plus the derived GraphQL endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedConfig {
    /// The merged configuration object, `graphQLEndpoint` included
    pub config: Map<String, Value>,

    /// Contributing sources in precedence order
    pub sources: Vec<ConfigSource>,
}

impl ResolvedConfig {
    /// Build the resolved config from layers.
    ///
    /// Fails with [`ConfigError::MissingEndpointInputs`] when the endpoint
    /// cannot be computed.
    pub fn build(inputs: ComposeInputs) -> ConfigResult<Self> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Layer 1: Built-in defaults
        layers.push(BuiltinDefaults::default().to_layer());
        sources.push(ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        });

        // Layer 2: scjssconfig.json
        if let Some(setup) = &inputs.setup {
            layers.push(setup.value.to_layer());
            sources.push(ConfigSource::from_loaded(ConfigOrigin::Setup, setup));
        }

        // Layer 3: package.json, only with a config section
        if let Some(package) = &inputs.package {
            if let Some(layer) = package.value.to_layer() {
                layers.push(layer);
                sources.push(ConfigSource::from_loaded(ConfigOrigin::Package, package));
            }
        }

        // Layer 4: overrides
        if let Some(overrides) = inputs.overrides {
            layers.push(overrides);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Overrides,
                path: None,
                digest: None,
            });
        }

        let mut config = merge_layers(layers);

        Self::validate_config(&config)?;
        let endpoint = Self::compute_graphql_endpoint(&config);
        config.insert("graphQLEndpoint".into(), Value::String(endpoint));

        Ok(Self { config, sources })
    }

    /// Both endpoint inputs must be present; the path must also be non-empty
    fn validate_config(config: &Map<String, Value>) -> ConfigResult<()> {
        let path_set = config.get("graphQLEndpointPath").is_some_and(is_truthy);
        let host_set = config.get("sitecoreApiHost").is_some_and(|v| !v.is_null());

        if !path_set || !host_set {
            return Err(ConfigError::MissingEndpointInputs);
        }
        Ok(())
    }

    /// `<host><path>?sc_apikey=<key>`, with no encoding applied
    fn compute_graphql_endpoint(config: &Map<String, Value>) -> String {
        let part = |key: &str| config.get(key).map(plain_text).unwrap_or_default();

        format!(
            "{}{}?sc_apikey={}",
            part("sitecoreApiHost"),
            part("graphQLEndpointPath"),
            part("sitecoreApiKey")
        )
    }

    /// The computed GraphQL endpoint
    pub fn graphql_endpoint(&self) -> Option<&str> {
        self.get_str("graphQLEndpoint")
    }

    /// Render the `environment.ts` module
    pub fn render(&self) -> ConfigResult<String> {
        let body = serde_json::to_string_pretty(&self.config)
            .map_err(|e| ConfigError::ParseError(format!("JSON serialization failed: {}", e)))?;

        Ok(format!("{}export const environment = {};\n", FILE_HEADER, body))
    }

    /// Write the rendered module to `path`, replacing any existing file.
    ///
    /// Returns the absolute path written.
    pub fn write_to(&self, path: &Path) -> ConfigResult<PathBuf> {
        let text = self.render()?;
        let path = absolute_path(path)?;

        info!("Writing runtime config to {}", path.display());

        fs::write(&path, text)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;
        Ok(path)
    }

    /// Get a top-level config value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// Get a config value as string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Get a config value as bool
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }
}

/// Compose the config and write it to `output` (default [`DEFAULT_OUTPUT_PATH`]).
///
/// Nothing is written if composition fails.
pub fn compose_and_write(inputs: ComposeInputs, output: Option<&Path>) -> ConfigResult<PathBuf> {
    let resolved = ResolvedConfig::build(inputs)?;
    resolved.write_to(output.unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_PATH)))
}

fn absolute_path(path: &Path) -> ConfigResult<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Truthiness the way build tooling treats loosely-typed config values
pub(super) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text of a value as spliced into the endpoint URL
fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
