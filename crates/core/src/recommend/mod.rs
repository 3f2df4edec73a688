//! Product recommendations
//!
//! Ranks the catalog by rating, review volume and overlap with the visitor's
//! preference tags. The ranking is recomputed in full whenever the excluded
//! product or the preference set changes.

mod scoring;
mod types;

pub use scoring::{RankingWeights, ScoreCalculator};
pub use types::*;

use crate::catalog::Catalog;

/// Default scoring weights
pub const DEFAULT_WEIGHTS: RankingWeights = RankingWeights {
    rating: 10.0,
    review_divisor: 10.0,
    review_cap: 10.0,
    preference_bonus: 5.0,
};

/// Maximum recommendations to return
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 4;

/// Largest limit a caller may ask for
pub const MAX_RECOMMENDATION_LIMIT: usize = 12;

/// Preference tags used by the product listing page
pub const LISTING_PREFERENCES: [&str; 2] = ["wellness", "organic"];

/// Ranks `catalog` with the default weights.
pub fn recommend<'a>(
    catalog: &'a Catalog,
    request: &RecommendationRequest,
) -> Vec<RankedProduct<'a>> {
    ScoreCalculator::new().rank(catalog, request)
}
