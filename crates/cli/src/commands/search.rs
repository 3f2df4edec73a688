use botanica_core::filter::{filter_products, result_summary, FilterCriteria, PriceRange};
use serde::Serialize;

use super::{load_catalog, to_json, CommandResult, EXIT_INVALID_INPUT};

/// Listing filters as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub query: Option<String>,
    pub category: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub availability: Option<bool>,
}

impl SearchOptions {
    pub fn criteria(&self) -> Result<FilterCriteria, String> {
        let price_range = PriceRange::parse_bounds(self.min.as_deref(), self.max.as_deref())
            .map_err(|message| format!("--{message}"))?;

        let mut criteria = FilterCriteria::default()
            .with_price_range(price_range)
            .with_availability(self.availability);
        if let Some(query) = &self.query {
            criteria = criteria.with_search(query.trim());
        }
        let category = self.category.as_deref().map(str::trim).unwrap_or_default();
        if !category.is_empty() {
            criteria = criteria.with_category(category);
        }
        Ok(criteria)
    }
}

#[derive(Debug, Serialize)]
struct SearchHit<'a> {
    id: u32,
    name: &'a str,
    price: &'a str,
    in_stock: bool,
}

#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    command: &'static str,
    summary: String,
    filtered: bool,
    count: usize,
    products: Vec<SearchHit<'a>>,
}

pub fn run(options: &SearchOptions) -> CommandResult {
    let criteria = match options.criteria() {
        Ok(criteria) => criteria,
        Err(message) => {
            return CommandResult::failure("search", "invalid_input", message, EXIT_INVALID_INPUT)
        }
    };
    let (_, catalog) = match load_catalog("search") {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };

    let matches = filter_products(&catalog, &criteria);
    let report = SearchReport {
        command: "search",
        summary: result_summary(matches.len()),
        filtered: criteria.is_filtered(),
        count: matches.len(),
        products: matches
            .iter()
            .map(|product| SearchHit {
                id: product.id.0,
                name: &product.name,
                price: &product.price,
                in_stock: product.in_stock,
            })
            .collect(),
    };

    to_json("search", &report)
}

#[cfg(test)]
mod tests {
    use super::SearchOptions;

    #[test]
    fn criteria_rejects_inverted_price_bounds() {
        let options = SearchOptions {
            min: Some("40".to_string()),
            max: Some("$20".to_string()),
            ..SearchOptions::default()
        };

        let error = options.criteria().expect_err("min above max is rejected");
        assert!(error.contains("--min"));
    }

    #[test]
    fn criteria_ignores_blank_category_and_keeps_defaults() {
        let options =
            SearchOptions { category: Some("  ".to_string()), ..SearchOptions::default() };

        let criteria = options.criteria().expect("blank filters are accepted");
        assert!(criteria.is_all_categories());
        assert!(!criteria.is_filtered());
    }
}
