use botanica_core::domain::product::ProductId;
use botanica_core::recommend::{recommend, RecommendationRequest, MAX_RECOMMENDATION_LIMIT};
use serde::Serialize;

use super::{load_catalog, to_json, CommandResult, EXIT_INVALID_INPUT};

#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    pub exclude: Option<u32>,
    /// Explicit preference tags; empty falls back to the configured defaults.
    pub preferences: Vec<String>,
    pub no_preferences: bool,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct Recommendation<'a> {
    id: u32,
    name: &'a str,
    score: f64,
    matched_tags: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct RecommendReport<'a> {
    command: &'static str,
    preferences: Vec<String>,
    excluded: Option<u32>,
    results: Vec<Recommendation<'a>>,
}

pub fn run(options: &RecommendOptions) -> CommandResult {
    if let Some(limit) = options.limit {
        if !(1..=MAX_RECOMMENDATION_LIMIT).contains(&limit) {
            return CommandResult::failure(
                "recommend",
                "invalid_input",
                format!("--limit must be between 1 and {MAX_RECOMMENDATION_LIMIT}, got {limit}"),
                EXIT_INVALID_INPUT,
            );
        }
    }

    let (config, catalog) = match load_catalog("recommend") {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };

    let preferences: Vec<String> = if options.no_preferences {
        Vec::new()
    } else if options.preferences.is_empty() {
        config.storefront.default_preferences.clone()
    } else {
        options
            .preferences
            .iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    };

    let mut request = RecommendationRequest::new()
        .with_preferences(preferences.iter().cloned())
        .with_limit(options.limit.unwrap_or(config.storefront.recommendation_limit));
    if let Some(id) = options.exclude {
        request = request.excluding(ProductId(id));
    }

    let ranked = recommend(&catalog, &request);
    let report = RecommendReport {
        command: "recommend",
        preferences,
        excluded: options.exclude,
        results: ranked
            .into_iter()
            .map(|entry| Recommendation {
                id: entry.product.id.0,
                name: &entry.product.name,
                score: entry.score,
                matched_tags: entry.matched_tags,
            })
            .collect(),
    };

    to_json("recommend", &report)
}
