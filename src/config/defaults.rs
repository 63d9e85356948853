//! Built-in environment defaults (layer 1)
//!
//! Hardcoded fallbacks for every value the app expects to find in
//! `environment.ts`.

use serde_json::{Map, Value};

/// Built-in default configuration values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinDefaults {
    /// Production build flag (default: false)
    pub production: bool,

    /// Sitecore API host (default: "", i.e. same origin)
    pub sitecore_api_host: String,

    /// API key placeholder used until `jss setup` has been run
    pub sitecore_api_key: String,

    /// JSS app name (default: "Unknown")
    pub jss_app_name: String,

    /// Layout service configuration name (default: "jss")
    pub sitecore_layout_service_config: String,

    /// Default language (default: "en")
    pub default_language: String,

    /// Route used when none is requested (default: "/")
    pub default_server_route: String,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            production: false,
            sitecore_api_host: String::new(),
            sitecore_api_key: "no-api-key-set".to_string(),
            jss_app_name: "Unknown".to_string(),
            sitecore_layout_service_config: "jss".to_string(),
            default_language: "en".to_string(),
            default_server_route: "/".to_string(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to a layer for merging.
    ///
    /// Key order here fixes the key order of the generated file.
    pub fn to_layer(&self) -> Map<String, Value> {
        let mut layer = Map::new();
        layer.insert("production".into(), Value::Bool(self.production));
        layer.insert("sitecoreApiHost".into(), self.sitecore_api_host.clone().into());
        layer.insert("sitecoreApiKey".into(), self.sitecore_api_key.clone().into());
        layer.insert("jssAppName".into(), self.jss_app_name.clone().into());
        layer.insert(
            "sitecoreLayoutServiceConfig".into(),
            self.sitecore_layout_service_config.clone().into(),
        );
        layer.insert("defaultLanguage".into(), self.default_language.clone().into());
        layer.insert("defaultServerRoute".into(), self.default_server_route.clone().into());
        layer
    }
}
