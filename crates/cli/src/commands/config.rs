use std::env;
use std::fs;
use std::path::Path;

use botanica_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

use super::{CommandResult, EXIT_CONFIG_FAILURE};

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("config validation failed: {error}"),
                EXIT_CONFIG_FAILURE,
            )
        }
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let catalog_path = config
        .catalog
        .path
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<built-in sample>".to_string());
    let preferences = if config.storefront.default_preferences.is_empty() {
        "<none>".to_string()
    } else {
        config.storefront.default_preferences.join(", ")
    };

    let fields = [
        field(
            "server.bind_address",
            config.server.bind_address.clone(),
            &["BOTANICA_SERVER_BIND_ADDRESS"],
        ),
        field("server.port", config.server.port.to_string(), &["BOTANICA_SERVER_PORT"]),
        field(
            "server.graceful_shutdown_secs",
            config.server.graceful_shutdown_secs.to_string(),
            &["BOTANICA_SERVER_GRACEFUL_SHUTDOWN_SECS"],
        ),
        field("catalog.path", catalog_path, &["BOTANICA_CATALOG_PATH"]),
        field(
            "catalog.asset_dir",
            config.catalog.asset_dir.display().to_string(),
            &["BOTANICA_CATALOG_ASSET_DIR"],
        ),
        field(
            "storefront.brand_name",
            config.storefront.brand_name.clone(),
            &["BOTANICA_STOREFRONT_BRAND_NAME"],
        ),
        field(
            "storefront.recommendation_limit",
            config.storefront.recommendation_limit.to_string(),
            &["BOTANICA_STOREFRONT_RECOMMENDATION_LIMIT"],
        ),
        field(
            "storefront.default_preferences",
            preferences,
            &["BOTANICA_STOREFRONT_DEFAULT_PREFERENCES"],
        ),
        field(
            "timers.hero_interval_ms",
            config.timers.hero_interval_ms.to_string(),
            &["BOTANICA_TIMERS_HERO_INTERVAL_MS"],
        ),
        field(
            "timers.quote_interval_ms",
            config.timers.quote_interval_ms.to_string(),
            &["BOTANICA_TIMERS_QUOTE_INTERVAL_MS"],
        ),
        field(
            "timers.journey_interval_ms",
            config.timers.journey_interval_ms.to_string(),
            &["BOTANICA_TIMERS_JOURNEY_INTERVAL_MS"],
        ),
        field(
            "timers.splash_tick_ms",
            config.timers.splash_tick_ms.to_string(),
            &["BOTANICA_TIMERS_SPLASH_TICK_MS"],
        ),
        field(
            "sessions.idle_ttl_secs",
            config.sessions.idle_ttl_secs.to_string(),
            &["BOTANICA_SESSIONS_IDLE_TTL_SECS"],
        ),
        field(
            "sessions.max_sessions",
            config.sessions.max_sessions.to_string(),
            &["BOTANICA_SESSIONS_MAX_SESSIONS"],
        ),
        field(
            "logging.level",
            config.logging.level.clone(),
            &["BOTANICA_LOGGING_LEVEL", "BOTANICA_LOG_LEVEL"],
        ),
        field(
            "logging.format",
            format!("{:?}", config.logging.format).to_lowercase(),
            &["BOTANICA_LOGGING_FORMAT", "BOTANICA_LOG_FORMAT"],
        ),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in fields {
        let source = field_source(
            field.key,
            field.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(field.key, &field.value, source));
    }

    CommandResult::rendered(lines.join("\n"))
}

struct ConfigField {
    key: &'static str,
    value: String,
    /// Checked in order; the first one set wins.
    env_keys: &'static [&'static str],
}

fn field(key: &'static str, value: String, env_keys: &'static [&'static str]) -> ConfigField {
    ConfigField { key, value, env_keys }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(Path::display)
                .map(|path| path.to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
