use shared_types::{AppConfig, FeatureFlags, SearchConfig, ServerSettings};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml` into the global `OnceLock`. Safe to call multiple
/// times; only the first call has effect.
///
/// Runs before logging is set up, so problems are reported on stderr.
/// A missing or unparseable file falls back to defaults.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => parse_config(&contents),
        Err(e) => {
            eprintln!("[config] {CONFIG_PATH} not found ({e}), using defaults");
            AppConfig::default()
        }
    })
}

fn parse_config(contents: &str) -> AppConfig {
    let config: AppConfig = toml::from_str(contents).unwrap_or_else(|e| {
        eprintln!("[config] Failed to parse {CONFIG_PATH}: {e}, using defaults");
        AppConfig::default()
    });
    eprintln!("[config] Feature flags: {:?}", config.features);
    config
}

/// The loaded config, or defaults if `load_config()` hasn't run.
pub fn app_config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

pub fn feature_flags() -> &'static FeatureFlags {
    &app_config().features
}

pub fn search_config() -> SearchConfig {
    app_config().search
}

/// Listen address: `PORT` overrides the port of `[server] bind`.
pub fn bind_address(settings: &ServerSettings) -> String {
    match std::env::var("PORT").ok().filter(|p| !p.trim().is_empty()) {
        Some(port) => {
            let host = settings
                .bind
                .rsplit_once(':')
                .map(|(host, _)| host)
                .unwrap_or("0.0.0.0");
            format!("{host}:{}", port.trim())
        }
        None => settings.bind.clone(),
    }
}

/// `JWT_SECRET`, required to serve.
pub fn jwt_secret() -> Result<String, String> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if !secret.trim().is_empty() => Ok(secret),
        _ => Err("JWT_SECRET must be set".to_string()),
    }
}
