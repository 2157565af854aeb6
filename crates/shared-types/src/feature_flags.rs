use serde::{Deserialize, Serialize};

/// Optional integrations, switched on in `config.toml`.
///
/// Every flag defaults to `false` so a missing or partial config file
/// runs the plain server.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    #[serde(default)]
    pub telemetry: bool,
    #[serde(default)]
    pub rate_limit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Per-client ceiling used when `features.rate_limit` is on.
    #[serde(default = "default_max_requests")]
    pub max_requests_per_minute: u32,
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_max_requests() -> u32 {
    120
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_requests_per_minute: default_max_requests(),
        }
    }
}

/// Timing of debounced search sessions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Artificial delay before results are published. Zero outside demos.
    #[serde(default)]
    pub latency_ms: u64,
}

fn default_debounce_ms() -> u64 {
    250
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            latency_ms: 0,
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub search: SearchConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(!config.features.telemetry);
        assert!(!config.features.rate_limit);
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert_eq!(config.server.max_requests_per_minute, 120);
        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.search.latency_ms, 0);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [features]
            rate_limit = true

            [search]
            latency_ms = 500
            "#,
        )
        .unwrap();
        assert!(config.features.rate_limit);
        assert!(!config.features.telemetry);
        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.search.latency_ms, 500);
        assert_eq!(config.server, ServerSettings::default());
    }

    #[test]
    fn full_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [features]
            telemetry = true
            rate_limit = true

            [server]
            bind = "127.0.0.1:8080"
            max_requests_per_minute = 30

            [search]
            debounce_ms = 100
            latency_ms = 20
            "#,
        )
        .unwrap();
        assert!(config.features.telemetry);
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.server.max_requests_per_minute, 30);
        assert_eq!(config.search.debounce_ms, 100);
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let config: AppConfig = toml::from_str(
            r#"
            [features]
            stripe = true
            "#,
        )
        .unwrap();
        assert_eq!(config.features, FeatureFlags::default());
    }
}
