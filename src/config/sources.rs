//! File-backed configuration sources (layers 2 and 3)
//!
//! - `scjssconfig.json`, written by `jss setup`, is optional in every sense:
//!   missing or unreadable means an empty layer.
//! - `package.json` is optional, but when it exists it must parse.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::resolved::is_truthy;
use crate::error::{ConfigError, ConfigResult};

/// Language used when package metadata does not name one
pub const DEFAULT_LANGUAGE: &str = "en";

/// A parsed source file together with where it came from
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub value: T,

    /// Path the file was read from
    pub path: PathBuf,

    /// SHA-256 digest of the raw file bytes
    pub digest: String,
}

/// `scjssconfig.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupConfig {
    pub sitecore: SitecoreSetup,
}

/// The `sitecore` section of `scjssconfig.json`.
///
/// Deploy settings also live here but play no part in the environment file.
/// Values are carried as found, whatever their JSON type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitecoreSetup {
    #[serde(default)]
    pub api_key: Option<Value>,

    #[serde(default)]
    pub layout_service_host: Option<Value>,
}

impl SetupConfig {
    /// Layer contributed by the setup file.
    ///
    /// A missing API key leaves the default in place. A missing host becomes
    /// null so it clears the default and fails validation.
    pub fn to_layer(&self) -> Map<String, Value> {
        let mut layer = Map::new();
        if let Some(api_key) = &self.sitecore.api_key {
            layer.insert("sitecoreApiKey".into(), api_key.clone());
        }
        layer.insert(
            "sitecoreApiHost".into(),
            self.sitecore.layout_service_host.clone().unwrap_or(Value::Null),
        );
        layer
    }
}

/// The subset of `package.json` this tool reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageMetadata {
    #[serde(default)]
    pub config: Option<PackageConfig>,
}

/// The `config` section of `package.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageConfig {
    #[serde(default, rename = "appName")]
    pub app_name: Option<Value>,

    #[serde(default)]
    pub language: Option<Value>,

    #[serde(default, rename = "graphQLEndpointPath")]
    pub graphql_endpoint_path: Option<Value>,
}

impl PackageMetadata {
    /// Layer contributed by package metadata, or `None` without a `config` section.
    ///
    /// A missing app name leaves the default in place. Falsy language and
    /// endpoint path values fall back to `"en"` and null.
    pub fn to_layer(&self) -> Option<Map<String, Value>> {
        let config = self.config.as_ref()?;

        let language = config
            .language
            .clone()
            .filter(is_truthy)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.into());
        let endpoint_path = config
            .graphql_endpoint_path
            .clone()
            .filter(is_truthy)
            .unwrap_or(Value::Null);

        let mut layer = Map::new();
        if let Some(app_name) = &config.app_name {
            layer.insert("jssAppName".into(), app_name.clone());
        }
        layer.insert("defaultLanguage".into(), language);
        layer.insert("graphQLEndpointPath".into(), endpoint_path);
        Some(layer)
    }
}

/// Load `scjssconfig.json`.
///
/// Never fails: a missing file is expected before `jss setup` has been run,
/// and a broken one is reported and skipped.
pub fn load_setup_config(path: &Path) -> Option<Loaded<SetupConfig>> {
    if !path.exists() {
        debug!(path = %path.display(), "setup config not found, skipping");
        return None;
    }

    match load_json_file::<SetupConfig>(path) {
        Ok(loaded) => Some(loaded),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable setup config");
            None
        }
    }
}

/// Load `package.json`. A missing file yields `Ok(None)`.
pub fn load_package_metadata(path: &Path) -> ConfigResult<Option<Loaded<PackageMetadata>>> {
    if !path.exists() {
        debug!(path = %path.display(), "package metadata not found, skipping");
        return Ok(None);
    }

    load_json_file(path).map(Some)
}

/// Read and parse a JSON file, returning the value and digest
fn load_json_file<T>(path: &Path) -> ConfigResult<Loaded<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let bytes = fs::read(path)
        .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let value = serde_json::from_slice(&bytes)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

    Ok(Loaded {
        value,
        path: path.to_path_buf(),
        digest,
    })
}
