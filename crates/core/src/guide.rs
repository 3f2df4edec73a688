//! "Find your tea" selection guide.
//!
//! Visitors toggle wellness benefits; a tea is shown when it carries any of the
//! selected benefits. With nothing selected every tea is shown.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::domain::product::Product;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Benefit {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const BENEFITS: &[Benefit] = &[
    Benefit { id: "relaxation", label: "Relaxation", icon: "🧘" },
    Benefit { id: "energy", label: "Energy", icon: "⚡" },
    Benefit { id: "focus", label: "Focus", icon: "🎯" },
    Benefit { id: "digestion", label: "Digestion", icon: "🌿" },
    Benefit { id: "immunity", label: "Immunity", icon: "🛡️" },
    Benefit { id: "sleep", label: "Sleep", icon: "🌙" },
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GuideMatch<'a> {
    pub product: &'a Product,
    pub benefits: Vec<&'static Benefit>,
}

pub fn benefit(id: &str) -> Option<&'static Benefit> {
    BENEFITS.iter().find(|benefit| benefit.id == id)
}

/// Adds `id` to the selection, or removes it when already selected.
pub fn toggle_benefit(selected: &mut Vec<String>, id: &str) {
    if let Some(position) = selected.iter().position(|existing| existing == id) {
        selected.remove(position);
    } else {
        selected.push(id.to_string());
    }
}

/// Teas carrying any selected benefit, in catalog order.
///
/// Benefits come from each product's `guide_benefits`; a product without any
/// never appears in the guide.
pub fn matching<'a>(catalog: &'a Catalog, selected: &[String]) -> Vec<GuideMatch<'a>> {
    catalog
        .products()
        .iter()
        .filter(|product| !product.guide_benefits.is_empty())
        .filter(|product| {
            selected.is_empty()
                || selected.iter().any(|wanted| product.guide_benefits.contains(wanted))
        })
        .map(|product| GuideMatch {
            product,
            benefits: product.guide_benefits.iter().filter_map(|id| benefit(id)).collect(),
        })
        .collect()
}
