use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Display price, e.g. `$24.99`.
    pub price: String,
    pub original_price: String,
    pub image: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub rating: f64,
    pub reviews: u32,
    pub brewing_time: String,
    pub temperature: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub origin: String,
    pub in_stock: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Selection-guide benefit ids such as `sleep` or `digestion`.
    #[serde(default)]
    pub guide_benefits: Vec<String>,
}

impl Product {
    pub fn price_value(&self) -> Option<Decimal> {
        parse_display_price(&self.price)
    }

    pub fn original_price_value(&self) -> Option<Decimal> {
        parse_display_price(&self.original_price)
    }

    /// The struck-through original price is shown only when it differs from the selling price.
    pub fn shows_original_price(&self) -> bool {
        self.original_price != self.price
    }
}

/// Parses a currency-formatted display string, stripping a leading `$`.
pub fn parse_display_price(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    Decimal::from_str(digits).ok()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::parse_display_price;

    #[test]
    fn display_price_strips_leading_currency_symbol() {
        assert_eq!(parse_display_price("$24.99"), Some(Decimal::new(2499, 2)));
        assert_eq!(parse_display_price(" 32.99 "), Some(Decimal::new(3299, 2)));
    }

    #[test]
    fn unparseable_display_price_yields_none() {
        assert_eq!(parse_display_price("free"), None);
        assert_eq!(parse_display_price("$"), None);
    }
}
