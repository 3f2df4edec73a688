//! Query-string parameters shared by the listing page and the products API.

use botanica_core::filter::{FilterCriteria, PriceRange};
use botanica_core::shell::ViewMode;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub available: Option<bool>,
    pub view: Option<String>,
}

impl ListingQuery {
    pub fn criteria(&self) -> Result<FilterCriteria, String> {
        let price_range = PriceRange::parse_bounds(self.min.as_deref(), self.max.as_deref())?;

        let mut criteria = FilterCriteria::default()
            .with_price_range(price_range)
            .with_availability(self.available);
        if let Some(search) = &self.search {
            criteria = criteria.with_search(search.clone());
        }
        if let Some(category) = self.category.as_deref().map(str::trim) {
            if !category.is_empty() {
                criteria = criteria.with_category(category);
            }
        }
        Ok(criteria)
    }

    pub fn view_mode(&self) -> Result<ViewMode, String> {
        match self.view.as_deref().map(str::trim) {
            None | Some("") => Ok(ViewMode::default()),
            Some(raw) => raw.parse(),
        }
    }
}

/// Splits a comma-separated parameter, dropping blanks.
pub fn split_csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use botanica_core::filter::{FilterCriteria, PriceRange};
    use botanica_core::shell::ViewMode;
    use rust_decimal::Decimal;

    use super::{split_csv, ListingQuery};

    #[test]
    fn empty_query_yields_cleared_criteria() {
        let query = ListingQuery::default();
        assert_eq!(query.criteria(), Ok(FilterCriteria::default()));
        assert_eq!(query.view_mode(), Ok(ViewMode::Grid));
    }

    #[test]
    fn query_fields_map_onto_criteria() {
        let query = ListingQuery {
            search: Some("ginger".to_string()),
            category: Some("immunity".to_string()),
            min: Some("$25".to_string()),
            max: Some("35".to_string()),
            available: Some(true),
            view: Some("list".to_string()),
        };

        let criteria = query.criteria().expect("valid query");
        assert_eq!(criteria.search, "ginger");
        assert_eq!(criteria.category, "immunity");
        assert_eq!(criteria.price_range, PriceRange::new(Decimal::from(25), Decimal::from(35)));
        assert_eq!(criteria.availability, Some(true));
        assert_eq!(query.view_mode(), Ok(ViewMode::List));
    }

    #[test]
    fn malformed_bounds_are_rejected() {
        let query = ListingQuery { min: Some("cheap".to_string()), ..ListingQuery::default() };
        assert!(query.criteria().is_err());

        let inverted = ListingQuery {
            min: Some("50".to_string()),
            max: Some("10".to_string()),
            ..ListingQuery::default()
        };
        assert!(inverted.criteria().is_err());
    }

    #[test]
    fn csv_values_are_trimmed() {
        assert_eq!(split_csv(Some(" wellness, ,organic ")), vec!["wellness", "organic"]);
        assert!(split_csv(None).is_empty());
    }
}
