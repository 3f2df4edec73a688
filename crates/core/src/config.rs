use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recommend::{
    DEFAULT_MAX_RECOMMENDATIONS, LISTING_PREFERENCES, MAX_RECOMMENDATION_LIMIT,
};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub storefront: StorefrontConfig,
    pub timers: TimerConfig,
    pub sessions: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// TOML catalog to load instead of the built-in collection.
    pub path: Option<PathBuf>,
    pub asset_dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct StorefrontConfig {
    pub brand_name: String,
    pub recommendation_limit: usize,
    pub default_preferences: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct TimerConfig {
    pub hero_interval_ms: u64,
    pub quote_interval_ms: u64,
    pub journey_interval_ms: u64,
    pub splash_tick_ms: u64,
}

/// Limits for server-held presentation sessions.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Seconds without activity before a session is evicted.
    pub idle_ttl_secs: u64,
    pub max_sessions: usize,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub catalog_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8080,
                graceful_shutdown_secs: 15,
            },
            catalog: CatalogConfig { path: None, asset_dir: PathBuf::from("public") },
            storefront: StorefrontConfig {
                brand_name: "Zen Botanica".to_string(),
                recommendation_limit: DEFAULT_MAX_RECOMMENDATIONS,
                default_preferences: LISTING_PREFERENCES.iter().map(ToString::to_string).collect(),
            },
            timers: TimerConfig {
                hero_interval_ms: 5_000,
                quote_interval_ms: 6_000,
                journey_interval_ms: 4_000,
                splash_tick_ms: 200,
            },
            sessions: SessionConfig::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl TimerConfig {
    pub fn hero_interval(&self) -> Duration {
        Duration::from_millis(self.hero_interval_ms)
    }

    pub fn quote_interval(&self) -> Duration {
        Duration::from_millis(self.quote_interval_ms)
    }

    pub fn journey_interval(&self) -> Duration {
        Duration::from_millis(self.journey_interval_ms)
    }

    pub fn splash_tick(&self) -> Duration {
        Duration::from_millis(self.splash_tick_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { idle_ttl_secs: 1_800, max_sessions: 10_000 }
    }
}

impl SessionConfig {
    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_secs)
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("botanica.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = Some(path);
            }
            if let Some(asset_dir) = catalog.asset_dir {
                self.catalog.asset_dir = asset_dir;
            }
        }

        if let Some(storefront) = patch.storefront {
            if let Some(brand_name) = storefront.brand_name {
                self.storefront.brand_name = brand_name;
            }
            if let Some(recommendation_limit) = storefront.recommendation_limit {
                self.storefront.recommendation_limit = recommendation_limit;
            }
            if let Some(default_preferences) = storefront.default_preferences {
                self.storefront.default_preferences = default_preferences;
            }
        }

        if let Some(timers) = patch.timers {
            if let Some(value) = timers.hero_interval_ms {
                self.timers.hero_interval_ms = value;
            }
            if let Some(value) = timers.quote_interval_ms {
                self.timers.quote_interval_ms = value;
            }
            if let Some(value) = timers.journey_interval_ms {
                self.timers.journey_interval_ms = value;
            }
            if let Some(value) = timers.splash_tick_ms {
                self.timers.splash_tick_ms = value;
            }
        }

        if let Some(sessions) = patch.sessions {
            if let Some(value) = sessions.idle_ttl_secs {
                self.sessions.idle_ttl_secs = value;
            }
            if let Some(value) = sessions.max_sessions {
                self.sessions.max_sessions = value;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("BOTANICA_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("BOTANICA_SERVER_PORT") {
            self.server.port = parse_u16("BOTANICA_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("BOTANICA_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("BOTANICA_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        if let Some(value) = read_env("BOTANICA_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(value));
        }
        if let Some(value) = read_env("BOTANICA_CATALOG_ASSET_DIR") {
            self.catalog.asset_dir = PathBuf::from(value);
        }

        if let Some(value) = read_env("BOTANICA_STOREFRONT_BRAND_NAME") {
            self.storefront.brand_name = value;
        }
        if let Some(value) = read_env("BOTANICA_STOREFRONT_RECOMMENDATION_LIMIT") {
            self.storefront.recommendation_limit =
                parse_usize("BOTANICA_STOREFRONT_RECOMMENDATION_LIMIT", &value)?;
        }
        if let Some(value) = read_env("BOTANICA_STOREFRONT_DEFAULT_PREFERENCES") {
            self.storefront.default_preferences = split_list(&value);
        }

        if let Some(value) = read_env("BOTANICA_TIMERS_HERO_INTERVAL_MS") {
            self.timers.hero_interval_ms = parse_u64("BOTANICA_TIMERS_HERO_INTERVAL_MS", &value)?;
        }
        if let Some(value) = read_env("BOTANICA_TIMERS_QUOTE_INTERVAL_MS") {
            self.timers.quote_interval_ms =
                parse_u64("BOTANICA_TIMERS_QUOTE_INTERVAL_MS", &value)?;
        }
        if let Some(value) = read_env("BOTANICA_TIMERS_JOURNEY_INTERVAL_MS") {
            self.timers.journey_interval_ms =
                parse_u64("BOTANICA_TIMERS_JOURNEY_INTERVAL_MS", &value)?;
        }
        if let Some(value) = read_env("BOTANICA_TIMERS_SPLASH_TICK_MS") {
            self.timers.splash_tick_ms = parse_u64("BOTANICA_TIMERS_SPLASH_TICK_MS", &value)?;
        }

        if let Some(value) = read_env("BOTANICA_SESSIONS_IDLE_TTL_SECS") {
            self.sessions.idle_ttl_secs = parse_u64("BOTANICA_SESSIONS_IDLE_TTL_SECS", &value)?;
        }
        if let Some(value) = read_env("BOTANICA_SESSIONS_MAX_SESSIONS") {
            self.sessions.max_sessions = parse_usize("BOTANICA_SESSIONS_MAX_SESSIONS", &value)?;
        }

        let log_level =
            read_env("BOTANICA_LOGGING_LEVEL").or_else(|| read_env("BOTANICA_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("BOTANICA_LOGGING_FORMAT").or_else(|| read_env("BOTANICA_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(bind_address) = overrides.bind_address {
            self.server.bind_address = bind_address;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = Some(catalog_path);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_server(&self.server)?;
        validate_catalog(&self.catalog)?;
        validate_storefront(&self.storefront)?;
        validate_timers(&self.timers)?;
        validate_sessions(&self.sessions)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// Config file locations checked when none is given explicitly.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["botanica.toml", "config/botanica.toml"];

pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from).find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.bind_address.trim().is_empty() {
        return Err(ConfigError::Validation("server.bind_address must not be empty".to_string()));
    }

    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if let Some(path) = &catalog.path {
        if !path.exists() {
            return Err(ConfigError::Validation(format!(
                "catalog.path `{}` does not exist (unset it to use the built-in collection)",
                path.display()
            )));
        }
    }

    Ok(())
}

fn validate_storefront(storefront: &StorefrontConfig) -> Result<(), ConfigError> {
    if storefront.brand_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "storefront.brand_name must not be empty".to_string(),
        ));
    }

    if !(1..=MAX_RECOMMENDATION_LIMIT).contains(&storefront.recommendation_limit) {
        return Err(ConfigError::Validation(format!(
            "storefront.recommendation_limit must be in range 1..={MAX_RECOMMENDATION_LIMIT}"
        )));
    }

    if storefront.default_preferences.iter().any(|preference| preference.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "storefront.default_preferences must not contain empty tags".to_string(),
        ));
    }

    Ok(())
}

fn validate_timers(timers: &TimerConfig) -> Result<(), ConfigError> {
    let rotations = [
        ("timers.hero_interval_ms", timers.hero_interval_ms),
        ("timers.quote_interval_ms", timers.quote_interval_ms),
        ("timers.journey_interval_ms", timers.journey_interval_ms),
    ];
    for (key, value) in rotations {
        if !(100..=60_000).contains(&value) {
            return Err(ConfigError::Validation(format!("{key} must be in range 100..=60000")));
        }
    }

    if !(50..=5_000).contains(&timers.splash_tick_ms) {
        return Err(ConfigError::Validation(
            "timers.splash_tick_ms must be in range 50..=5000".to_string(),
        ));
    }

    Ok(())
}

fn validate_sessions(sessions: &SessionConfig) -> Result<(), ConfigError> {
    if sessions.idle_ttl_secs == 0 {
        return Err(ConfigError::Validation(
            "sessions.idle_ttl_secs must be greater than zero".to_string(),
        ));
    }

    if sessions.max_sessions == 0 {
        return Err(ConfigError::Validation(
            "sessions.max_sessions must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    server: Option<ServerPatch>,
    catalog: Option<CatalogPatch>,
    storefront: Option<StorefrontPatch>,
    timers: Option<TimerPatch>,
    sessions: Option<SessionPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
    asset_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct StorefrontPatch {
    brand_name: Option<String>,
    recommendation_limit: Option<usize>,
    default_preferences: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct TimerPatch {
    hero_interval_ms: Option<u64>,
    quote_interval_ms: Option<u64>,
    journey_interval_ms: Option<u64>,
    splash_tick_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct SessionPatch {
    idle_ttl_secs: Option<u64>,
    max_sessions: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
