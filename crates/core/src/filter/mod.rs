//! Catalog filtering for the product listing.
//!
//! Every criterion is a predicate; a product is visible when it satisfies all of
//! them. The result keeps catalog order and an empty result is a valid outcome.

mod criteria;

pub use criteria::{
    category_label, CategoryDefinition, FilterCriteria, PriceBand, PriceRange, ALL_CATEGORIES,
    CATEGORIES, PRICE_BANDS,
};

use crate::catalog::Catalog;
use crate::domain::product::Product;

pub fn filter_products<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a Product> {
    let search = criteria.search.to_lowercase();
    let category = criteria.category.to_lowercase();

    catalog
        .products()
        .iter()
        .filter(|product| search.is_empty() || matches_search(product, &search))
        .filter(|product| criteria.is_all_categories() || matches_category(product, &category))
        .filter(|product| within_price_range(product, &criteria.price_range))
        .filter(|product| criteria.availability.map_or(true, |wanted| product.in_stock == wanted))
        .collect()
}

/// `needle` must already be lowercased.
fn matches_search(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
        || product.ingredients.iter().any(|ingredient| ingredient.to_lowercase().contains(needle))
}

/// Tag and category match when either contains the other, ignoring case.
pub fn tags_cross_match(tag: &str, other: &str) -> bool {
    let tag = tag.to_lowercase();
    let other = other.to_lowercase();
    tag.contains(&other) || other.contains(&tag)
}

fn matches_category(product: &Product, category: &str) -> bool {
    product.tags.iter().any(|tag| tags_cross_match(tag, category))
}

fn within_price_range(product: &Product, range: &PriceRange) -> bool {
    product.price_value().is_some_and(|price| range.contains(price))
}

/// Heading shown above the listing, e.g. `1 Product Found`.
pub fn result_summary(count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} Product{suffix} Found")
}
