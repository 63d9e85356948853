//! JSS config generator - build-time environment config for JSS apps
//!
//! Merges built-in defaults, the `jss setup` output, package metadata and
//! caller overrides, computes the GraphQL endpoint, and writes the
//! `environment.ts` module the app imports at build time.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use config::{compose_and_write, ComposeInputs, ConfigOrigin, ResolvedConfig};
pub use error::{ConfigError, ConfigResult};
