//! The in-memory product catalog.
//!
//! A catalog is built once at startup, either from the built-in Zen Botanica
//! collection or from a TOML file, and is never mutated afterwards.

mod sample;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A data-quality finding that does not prevent the catalog from loading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogIssue {
    pub product_id: ProductId,
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if product.id.0 == 0 {
                return Err(DomainError::InvalidProduct {
                    id: product.id,
                    reason: "identifier must be a positive integer".to_string(),
                });
            }
            if !seen.insert(product.id) {
                return Err(DomainError::DuplicateProduct(product.id));
            }
        }

        Ok(Self { products })
    }

    /// The six-tea collection the storefront ships with.
    pub fn sample() -> Self {
        Self { products: sample::sample_products() }
    }

    pub fn from_toml_str(raw: &str, origin: &Path) -> Result<Self, CatalogError> {
        let file = toml::from_str::<CatalogFile>(raw)
            .map_err(|source| CatalogError::ParseFile { path: origin.to_path_buf(), source })?;
        Ok(Self::new(file.products)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let catalog = Self::from_toml_str(&raw, path)?;
        info!(
            event_name = "catalog.loaded",
            path = %path.display(),
            product_count = catalog.len(),
            "catalog loaded from file"
        );
        Ok(catalog)
    }

    /// Loads from `path` when given, otherwise falls back to the built-in collection.
    pub fn load_or_sample(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::sample()),
        }
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.find(product_id).is_some()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        for product in &self.products {
            if product.name.trim().is_empty() {
                issues.push(CatalogIssue {
                    product_id: product.id,
                    field: "name",
                    message: "name is empty".to_string(),
                });
            }
            if product.price_value().is_none() {
                issues.push(CatalogIssue {
                    product_id: product.id,
                    field: "price",
                    message: format!("price `{}` is not a currency amount", product.price),
                });
            }
            if product.original_price_value().is_none() {
                issues.push(CatalogIssue {
                    product_id: product.id,
                    field: "original_price",
                    message: format!(
                        "original price `{}` is not a currency amount",
                        product.original_price
                    ),
                });
            }
            for id in &product.guide_benefits {
                if crate::guide::benefit(id).is_none() {
                    issues.push(CatalogIssue {
                        product_id: product.id,
                        field: "guide_benefits",
                        message: format!("unknown guide benefit `{id}`"),
                    });
                }
            }
            if !(0.0..=5.0).contains(&product.rating) {
                issues.push(CatalogIssue {
                    product_id: product.id,
                    field: "rating",
                    message: format!("rating {} is outside 0..=5", product.rating),
                });
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::{Catalog, CatalogError};
    use crate::domain::product::ProductId;
    use crate::errors::DomainError;

    #[test]
    fn sample_catalog_has_six_unique_teas() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.len(), 6);
        assert!(Catalog::new(catalog.products().to_vec()).is_ok());
        assert!(catalog.validate().is_empty());
    }

    #[test]
    fn only_stress_relief_is_out_of_stock() {
        let catalog = Catalog::sample();
        let out_of_stock: Vec<_> =
            catalog.products().iter().filter(|product| !product.in_stock).collect();
        assert_eq!(out_of_stock.len(), 1);
        assert_eq!(out_of_stock[0].name, "Stress Relief Blend");
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let mut products = Catalog::sample().products().to_vec();
        products[1].id = ProductId(1);

        assert_eq!(Catalog::new(products), Err(DomainError::DuplicateProduct(ProductId(1))));
    }

    #[test]
    fn zero_identifier_is_rejected() {
        let mut products = Catalog::sample().products().to_vec();
        products[0].id = ProductId(0);

        assert!(matches!(
            Catalog::new(products),
            Err(DomainError::InvalidProduct { id: ProductId(0), .. })
        ));
    }

    #[test]
    fn validate_reports_unparseable_prices_and_ratings() {
        let mut products = Catalog::sample().products().to_vec();
        products[2].price = "call us".to_string();
        products[4].rating = 7.5;
        let catalog = Catalog::new(products).expect("ids are unique");

        let issues = catalog.validate();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].product_id, ProductId(3));
        assert_eq!(issues[0].field, "price");
        assert_eq!(issues[1].product_id, ProductId(5));
        assert_eq!(issues[1].field, "rating");
    }

    #[test]
    fn validate_reports_unknown_guide_benefits() {
        let mut products = Catalog::sample().products().to_vec();
        products[0].guide_benefits.push("longevity".to_string());
        let catalog = Catalog::new(products).expect("ids are unique");

        let issues = catalog.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].product_id, ProductId(1));
        assert_eq!(issues[0].field, "guide_benefits");
        assert!(issues[0].message.contains("longevity"));
    }

    #[test]
    fn catalog_loads_from_toml_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("catalog.toml");
        fs::write(
            &path,
            r#"
[[products]]
id = 10
name = "Hibiscus Glow"
description = "Tart hibiscus with rosehip"
price = "$19.50"
original_price = "$19.50"
image = "/hibiscus.png"
rating = 4.2
reviews = 12
brewing_time = "5 min"
temperature = "95°C"
origin = "Organic"
in_stock = true
tags = ["Antioxidant", "Organic"]
"#,
        )
        .expect("write catalog");

        let catalog = Catalog::load(&path).expect("catalog should load");
        let product = catalog.find(&ProductId(10)).expect("product 10");
        assert_eq!(product.name, "Hibiscus Glow");
        assert!(product.ingredients.is_empty());
        assert!(!product.shows_original_price());
    }

    #[test]
    fn malformed_catalog_file_reports_parse_error() {
        let result = Catalog::from_toml_str("[[products]]\nid = \"one\"", Path::new("bad.toml"));
        assert!(matches!(result, Err(CatalogError::ParseFile { .. })));
    }

    #[test]
    fn missing_path_falls_back_to_sample() {
        let catalog = Catalog::load_or_sample(None).expect("sample catalog");
        assert_eq!(catalog, Catalog::sample());
    }
}
