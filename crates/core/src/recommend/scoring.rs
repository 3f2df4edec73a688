//! Scoring for product recommendations

use std::cmp::Ordering;

use super::types::*;
use crate::catalog::Catalog;
use crate::domain::product::Product;
use crate::filter::tags_cross_match;

/// Weights for scoring components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    /// Multiplier applied to the star rating (default: 10)
    pub rating: f64,
    /// Reviews are divided by this before capping (default: 10)
    pub review_divisor: f64,
    /// Upper bound of the review contribution (default: 10)
    pub review_cap: f64,
    /// Bonus per matching preference tag (default: 5)
    pub preference_bonus: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

/// Score calculator for recommendations
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    weights: RankingWeights,
}

impl ScoreCalculator {
    /// Create a new score calculator with default weights
    pub fn new() -> Self {
        Self { weights: RankingWeights::default() }
    }

    /// Create with custom weights
    pub fn with_weights(weights: RankingWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &RankingWeights {
        &self.weights
    }

    pub fn components(&self, product: &Product, preferences: &[String]) -> ScoreComponents {
        let preference_matches = matched_tags(product, preferences).len();

        ScoreComponents {
            rating: product.rating * self.weights.rating,
            reviews: (f64::from(product.reviews) / self.weights.review_divisor)
                .min(self.weights.review_cap),
            preference_matches,
            preference_bonus: preference_matches as f64 * self.weights.preference_bonus,
        }
    }

    pub fn calculate_total_score(&self, components: &ScoreComponents) -> f64 {
        components.rating + components.reviews + components.preference_bonus
    }

    /// Scores every candidate and returns the best `request.limit`, highest first.
    ///
    /// Equal scores keep catalog order.
    pub fn rank<'a>(
        &self,
        catalog: &'a Catalog,
        request: &RecommendationRequest,
    ) -> Vec<RankedProduct<'a>> {
        let mut ranked: Vec<RankedProduct<'a>> = catalog
            .products()
            .iter()
            .filter(|product| Some(product.id) != request.exclude)
            .map(|product| {
                let components = self.components(product, &request.preferences);
                RankedProduct {
                    product,
                    score: self.calculate_total_score(&components),
                    components,
                    matched_tags: matched_tags(product, &request.preferences),
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked.truncate(request.limit);
        ranked
    }
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn matched_tags<'a>(product: &'a Product, preferences: &[String]) -> Vec<&'a str> {
    product
        .tags
        .iter()
        .filter(|tag| preferences.iter().any(|preference| tags_cross_match(tag, preference)))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductId;
    use crate::recommend::LISTING_PREFERENCES;

    fn ids(ranked: &[RankedProduct<'_>]) -> Vec<u32> {
        ranked.iter().map(|entry| entry.product.id.0).collect()
    }

    #[test]
    fn test_score_formula() {
        let catalog = Catalog::sample();
        let calculator = ScoreCalculator::new();
        let immune = catalog.find(&ProductId(5)).expect("immune boost");
        let preferences: Vec<String> = LISTING_PREFERENCES.iter().map(|p| p.to_string()).collect();

        let components = calculator.components(immune, &preferences);
        // 4.8 * 10 + min(134 / 10, 10) + 2 * 5
        assert!((components.rating - 48.0).abs() < 1e-9);
        assert!((components.reviews - 10.0).abs() < 1e-9);
        assert_eq!(components.preference_matches, 2);
        assert!((calculator.calculate_total_score(&components) - 68.0).abs() < 1e-9);
    }

    #[test]
    fn test_review_contribution_below_cap() {
        let catalog = Catalog::sample();
        let stress = catalog.find(&ProductId(3)).expect("stress relief");
        let components = ScoreCalculator::new().components(stress, &[]);
        assert!((components.reviews - 8.9).abs() < 1e-9);
        assert_eq!(components.preference_matches, 0);
    }

    #[test]
    fn test_listing_preferences_ranking() {
        let catalog = Catalog::sample();
        let request = RecommendationRequest::new().with_preferences(LISTING_PREFERENCES);
        let ranked = ScoreCalculator::new().rank(&catalog, &request);

        assert_eq!(ids(&ranked), vec![5, 1, 4, 2]);
        assert_eq!(ranked[0].matched_tags, vec!["Wellness", "Organic"]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::sample();
        let ranked = ScoreCalculator::new().rank(&catalog, &RecommendationRequest::new());

        // Tranquil Evening (1) and Immune Boost (5) both score 58.
        assert_eq!(ids(&ranked), vec![2, 6, 1, 5]);
    }

    #[test]
    fn test_excluded_product_never_returned() {
        let catalog = Catalog::sample();
        for excluded in 1..=6 {
            let request = RecommendationRequest::new()
                .excluding(ProductId(excluded))
                .with_preferences(LISTING_PREFERENCES);
            let ranked = ScoreCalculator::new().rank(&catalog, &request);
            assert_eq!(ranked.len(), 4);
            assert!(ranked.iter().all(|entry| entry.product.id != ProductId(excluded)));
        }
    }

    #[test]
    fn test_output_length_is_bounded_by_catalog() {
        let products = Catalog::sample().products()[..3].to_vec();
        let catalog = Catalog::new(products).expect("valid ids");

        let all = ScoreCalculator::new().rank(&catalog, &RecommendationRequest::new());
        assert_eq!(all.len(), 3);

        let excluding_present = RecommendationRequest::new().excluding(ProductId(2));
        assert_eq!(ScoreCalculator::new().rank(&catalog, &excluding_present).len(), 2);

        let excluding_absent = RecommendationRequest::new().excluding(ProductId(99));
        assert_eq!(ScoreCalculator::new().rank(&catalog, &excluding_absent).len(), 3);
    }

    #[test]
    fn test_custom_weights() {
        let catalog = Catalog::sample();
        let calculator = ScoreCalculator::with_weights(RankingWeights {
            rating: 0.0,
            review_divisor: 1.0,
            review_cap: 1000.0,
            preference_bonus: 0.0,
        });
        let ranked = calculator.rank(&catalog, &RecommendationRequest::new().with_limit(2));

        // Pure review volume: Morning Clarity (203) then Digestive Harmony (156).
        assert_eq!(ids(&ranked), vec![2, 4]);
    }
}
