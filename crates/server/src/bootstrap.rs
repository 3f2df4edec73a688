use std::sync::Arc;

use botanica_core::catalog::{Catalog, CatalogError};
use botanica_core::config::{AppConfig, ConfigError, LoadOptions};
use botanica_core::content::{HERO_SLIDES, JOURNEY_STEPS, QUOTES};
use botanica_core::rotation::Rotator;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::scheduler::TimerService;
use crate::sessions::SessionStore;

/// The page carousels, each advanced by its own timer.
#[derive(Clone)]
pub struct Rotators {
    pub hero: Arc<Mutex<Rotator>>,
    pub quote: Arc<Mutex<Rotator>>,
    pub journey: Arc<Mutex<Rotator>>,
}

impl Default for Rotators {
    fn default() -> Self {
        Self {
            hero: Arc::new(Mutex::new(Rotator::new("hero", HERO_SLIDES.len()))),
            quote: Arc::new(Mutex::new(Rotator::new("quote", QUOTES.len()))),
            journey: Arc::new(Mutex::new(Rotator::new("journey", JOURNEY_STEPS.len()))),
        }
    }
}

pub struct Application {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub rotators: Rotators,
    pub sessions: SessionStore,
    pub timers: TimerService,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog load failed: {0}")]
    Catalog(#[from] CatalogError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let catalog = Catalog::load_or_sample(config.catalog.path.as_deref())?;
    let issues = catalog.validate();
    for issue in &issues {
        warn!(
            event_name = "system.bootstrap.catalog_issue",
            correlation_id = "bootstrap",
            product_id = %issue.product_id,
            field = issue.field,
            "{}",
            issue.message
        );
    }
    info!(
        event_name = "system.bootstrap.catalog_ready",
        correlation_id = "bootstrap",
        products = catalog.len(),
        issues = issues.len(),
        "catalog ready"
    );

    let sessions =
        SessionStore::with_limits(config.sessions.idle_ttl(), config.sessions.max_sessions);

    Ok(Application {
        config,
        catalog: Arc::new(catalog),
        rotators: Rotators::default(),
        sessions,
        timers: TimerService::new(),
    })
}

impl Application {
    /// Starts the carousel timers on the current runtime.
    pub fn start_timers(&mut self) {
        let timers = &self.config.timers;
        self.timers.register("hero", timers.hero_interval(), self.rotators.hero.clone());
        self.timers.register("quote", timers.quote_interval(), self.rotators.quote.clone());
        self.timers.register("journey", timers.journey_interval(), self.rotators.journey.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use botanica_core::config::{ConfigOverrides, LoadOptions};
    use tempfile::TempDir;

    use crate::bootstrap::{bootstrap, BootstrapError};

    #[tokio::test]
    async fn bootstrap_uses_builtin_catalog_by_default() {
        let mut app = bootstrap(LoadOptions::default()).await.expect("bootstrap succeeds");

        assert_eq!(app.catalog.len(), 6);
        assert_eq!(app.rotators.hero.lock().await.len(), 3);
        assert_eq!(app.rotators.quote.lock().await.len(), 6);
        assert_eq!(app.rotators.journey.lock().await.len(), 4);

        app.start_timers();
        assert_eq!(app.timers.len(), 3);
        app.timers.stop();
        assert!(app.timers.is_empty());
    }

    #[tokio::test]
    async fn bootstrap_fails_fast_when_catalog_is_missing() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                catalog_path: Some(PathBuf::from("/definitely/not/here/catalog.toml")),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await;

        let message = match result {
            Ok(_) => panic!("expected bootstrap failure"),
            Err(error) => error.to_string(),
        };
        assert!(message.contains("catalog.path"));
    }

    #[tokio::test]
    async fn bootstrap_reports_unreadable_catalog() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("catalog.toml");
        fs::write(&path, "products = \"not a list\"").expect("write catalog");

        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides { catalog_path: Some(path), ..ConfigOverrides::default() },
            ..LoadOptions::default()
        })
        .await;

        assert!(matches!(result, Err(BootstrapError::Catalog(_))));
    }
}
