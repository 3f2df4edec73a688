//! Types for the recommendation ranker

use serde::Serialize;

use crate::domain::product::{Product, ProductId};

/// Request for product recommendations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    /// Product currently on screen, never recommended back
    pub exclude: Option<ProductId>,
    /// Preference tags, compared case-insensitively by containment
    pub preferences: Vec<String>,
    /// Maximum number of recommendations to return
    pub limit: usize,
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self { exclude: None, preferences: Vec::new(), limit: super::DEFAULT_MAX_RECOMMENDATIONS }
    }
}

impl RecommendationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn excluding(mut self, product_id: ProductId) -> Self {
        self.exclude = Some(product_id);
        self
    }

    pub fn with_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences = preferences.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Individual scoring components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct ScoreComponents {
    /// Rating contribution
    pub rating: f64,
    /// Bounded review-volume contribution
    pub reviews: f64,
    /// Number of product tags matching a preference
    pub preference_matches: usize,
    /// Preference contribution
    pub preference_bonus: f64,
}

/// A scored catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProduct<'a> {
    pub product: &'a Product,
    pub score: f64,
    pub components: ScoreComponents,
    /// Tags that matched a preference, in product tag order
    pub matched_tags: Vec<&'a str>,
}
