pub mod catalog;
pub mod config;
pub mod content;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod guide;
pub mod recommend;
pub mod rotation;
pub mod shell;
pub mod splash;
pub mod timer;

pub use catalog::{Catalog, CatalogError, CatalogIssue};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::product::{parse_display_price, Product, ProductId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use filter::{filter_products, result_summary, FilterCriteria, PriceBand, PriceRange};
pub use guide::{Benefit, GuideMatch};
pub use recommend::{recommend, RankedProduct, RankingWeights, RecommendationRequest};
pub use rotation::Rotator;
pub use shell::{PresentationShell, ShellEffect, ShellEvent, ShellSnapshot, ShellState};
pub use splash::{SplashFrame, SplashPhase, SplashScreen, SplashTimings};
pub use timer::{Tick, TickOutcome};
