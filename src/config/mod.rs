//! Configuration composition
//!
//! Builds the runtime environment config from four layers, lowest to
//! highest precedence:
//! 1. Built-in defaults
//! 2. Setup config (scjssconfig.json, written by `jss setup`)
//! 3. Package metadata (the `config` section of package.json)
//! 4. Caller-supplied overrides

mod defaults;
mod merge;
mod resolved;
mod sources;

pub use defaults::BuiltinDefaults;
pub use merge::{assign, merge_layers};
pub use resolved::{
    compose_and_write, ComposeInputs, ConfigOrigin, ConfigSource, ResolvedConfig,
    DEFAULT_OUTPUT_PATH,
};
pub use sources::{
    load_package_metadata, load_setup_config, Loaded, PackageConfig, PackageMetadata,
    SetupConfig, SitecoreSetup, DEFAULT_LANGUAGE,
};
