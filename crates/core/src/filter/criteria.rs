use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::parse_display_price;

pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryDefinition {
    pub id: &'static str,
    pub label: &'static str,
}

pub const CATEGORIES: &[CategoryDefinition] = &[
    CategoryDefinition { id: ALL_CATEGORIES, label: "All Products" },
    CategoryDefinition { id: "sleep", label: "Sleep & Relaxation" },
    CategoryDefinition { id: "energy", label: "Energy & Focus" },
    CategoryDefinition { id: "wellness", label: "Wellness & Balance" },
    CategoryDefinition { id: "clarity", label: "Mental Clarity" },
    CategoryDefinition { id: "immunity", label: "Immune Support" },
    CategoryDefinition { id: "digestive", label: "Digestive Health" },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceBand {
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
}

impl PriceBand {
    pub fn range(&self) -> PriceRange {
        PriceRange::new(Decimal::from(self.min), Decimal::from(self.max))
    }
}

pub const PRICE_BANDS: &[PriceBand] = &[
    PriceBand { label: "Under $25", min: 0, max: 25 },
    PriceBand { label: "$25 - $35", min: 25, max: 35 },
    PriceBand { label: "$35 - $50", min: 35, max: 50 },
    PriceBand { label: "Over $50", min: 50, max: 1000 },
];

/// Inclusive price bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }

    pub fn band(&self) -> Option<&'static PriceBand> {
        PRICE_BANDS.iter().find(|band| band.range() == *self)
    }

    /// Builds a range from optional user-supplied bounds such as `20` or `$35.00`.
    ///
    /// A missing or blank bound keeps the default. Unparseable bounds and a
    /// minimum above the maximum are rejected.
    pub fn parse_bounds(min: Option<&str>, max: Option<&str>) -> Result<Self, String> {
        let defaults = Self::default();
        let min = parse_bound("min", min)?.unwrap_or(defaults.min);
        let max = parse_bound("max", max)?.unwrap_or(defaults.max);
        if min > max {
            return Err(format!("min ({min}) must not exceed max ({max})"));
        }
        Ok(Self::new(min, max))
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<Decimal>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_display_price(value)
            .map(Some)
            .ok_or_else(|| format!("{name} must be a price, got `{value}`")),
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(Decimal::ZERO, Decimal::from(1000u32))
    }
}

/// The active filter parameters of a product listing.
///
/// Criteria are immutable values: every change produces a new value that is fed
/// back into [`super::filter_products`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub category: String,
    pub price_range: PriceRange,
    /// `None` means no availability constraint.
    pub availability: Option<bool>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            price_range: PriceRange::default(),
            availability: None,
        }
    }
}

impl FilterCriteria {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = price_range;
        self
    }

    pub fn with_availability(mut self, availability: Option<bool>) -> Self {
        self.availability = availability;
        self
    }

    /// Selecting the band that is already active clears the price constraint.
    pub fn toggle_price_band(self, band: &PriceBand) -> Self {
        let range = band.range();
        if self.price_range == range {
            self.with_price_range(PriceRange::default())
        } else {
            self.with_price_range(range)
        }
    }

    /// Selecting the availability that is already active clears it.
    pub fn toggle_availability(self, available: bool) -> Self {
        if self.availability == Some(available) {
            self.with_availability(None)
        } else {
            self.with_availability(Some(available))
        }
    }

    pub fn is_all_categories(&self) -> bool {
        self.category.eq_ignore_ascii_case(ALL_CATEGORIES)
    }

    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty()
            || !self.is_all_categories()
            || self.price_range != PriceRange::default()
            || self.availability.is_some()
    }
}

pub fn category_label(id: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|category| category.id.eq_ignore_ascii_case(id))
        .map(|category| category.label)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{category_label, FilterCriteria, PriceRange, PRICE_BANDS};

    #[test]
    fn default_criteria_are_not_filtered() {
        let criteria = FilterCriteria::default();
        assert!(!criteria.is_filtered());
        assert!(criteria.is_all_categories());
        assert_eq!(criteria.price_range, PriceRange::new(Decimal::ZERO, Decimal::from(1000u32)));
    }

    #[test]
    fn any_changed_criterion_marks_results_filtered() {
        assert!(FilterCriteria::default().with_search("mint").is_filtered());
        assert!(FilterCriteria::default().with_category("sleep").is_filtered());
        assert!(FilterCriteria::default().with_availability(Some(true)).is_filtered());
        assert!(FilterCriteria::default().toggle_price_band(&PRICE_BANDS[1]).is_filtered());
        assert!(!FilterCriteria::default().with_category("ALL").is_filtered());
    }

    #[test]
    fn clicking_active_price_band_clears_it() {
        let band = &PRICE_BANDS[0];
        let selected = FilterCriteria::default().toggle_price_band(band);
        assert_eq!(selected.price_range.band(), Some(band));

        let cleared = selected.toggle_price_band(band);
        assert_eq!(cleared.price_range, PriceRange::default());
        assert_eq!(cleared.price_range.band(), None);
    }

    #[test]
    fn clicking_other_price_band_switches_selection() {
        let switched = FilterCriteria::default()
            .toggle_price_band(&PRICE_BANDS[0])
            .toggle_price_band(&PRICE_BANDS[3]);
        assert_eq!(switched.price_range.band(), Some(&PRICE_BANDS[3]));
    }

    #[test]
    fn clicking_active_availability_clears_it() {
        let in_stock = FilterCriteria::default().toggle_availability(true);
        assert_eq!(in_stock.availability, Some(true));
        assert_eq!(in_stock.clone().toggle_availability(false).availability, Some(false));
        assert_eq!(in_stock.toggle_availability(true).availability, None);
    }

    #[test]
    fn price_range_bounds_are_inclusive() {
        let range = PRICE_BANDS[0].range();
        assert!(range.contains(Decimal::ZERO));
        assert!(range.contains(Decimal::from(25u32)));
        assert!(!range.contains(Decimal::new(2501, 2)));
    }

    #[test]
    fn parsed_bounds_default_when_blank() {
        assert_eq!(PriceRange::parse_bounds(None, Some("  ")), Ok(PriceRange::default()));
        assert_eq!(
            PriceRange::parse_bounds(Some("$20"), Some("35.50")),
            Ok(PriceRange::new(Decimal::from(20u32), Decimal::new(3550, 2)))
        );
    }

    #[test]
    fn parsed_bounds_reject_bad_input() {
        let error = PriceRange::parse_bounds(Some("cheap"), None).expect_err("not a price");
        assert!(error.starts_with("min must be a price"));

        let error = PriceRange::parse_bounds(Some("40"), Some("$20")).expect_err("inverted");
        assert!(error.contains("must not exceed"));
    }

    #[test]
    fn category_labels_resolve_case_insensitively() {
        assert_eq!(category_label("Sleep"), Some("Sleep & Relaxation"));
        assert_eq!(category_label("tea"), None);
    }
}
