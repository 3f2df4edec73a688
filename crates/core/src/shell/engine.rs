use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::domain::product::ProductId;
use crate::filter::{filter_products, result_summary, FilterCriteria, PRICE_BANDS};
use crate::shell::states::{ShellEffect, ShellEvent, ShellState, TransitionOutcome, ViewMode};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ShellTransitionError {
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),
    #[error("price band {0} does not exist")]
    UnknownPriceBand(usize),
}

/// Per-session state of the product listing: filter criteria, the filters panel,
/// the detail modal, favorites and layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentationShell {
    criteria: FilterCriteria,
    filters_open: bool,
    modal: Option<ProductId>,
    favorites: BTreeSet<ProductId>,
    view_mode: ViewMode,
    visible: Vec<ProductId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShellSnapshot {
    pub state: ShellState,
    pub criteria: FilterCriteria,
    pub filtered: bool,
    pub summary: String,
    pub visible: Vec<ProductId>,
    pub favorites: Vec<ProductId>,
    pub modal_product: Option<ProductId>,
    pub scroll_locked: bool,
    pub filters_open: bool,
    pub view_mode: ViewMode,
}

/// Derives the next criteria for `event`, or `None` when the event does not touch
/// the filters.
pub fn reduce_criteria(
    criteria: &FilterCriteria,
    event: &ShellEvent,
) -> Result<Option<FilterCriteria>, ShellTransitionError> {
    let next = match event {
        ShellEvent::SearchChanged { text } => criteria.clone().with_search(text.clone()),
        ShellEvent::CategorySelected { category } => {
            criteria.clone().with_category(category.clone())
        }
        ShellEvent::PriceBandClicked { band } => {
            let definition =
                PRICE_BANDS.get(*band).ok_or(ShellTransitionError::UnknownPriceBand(*band))?;
            criteria.clone().toggle_price_band(definition)
        }
        ShellEvent::AvailabilityClicked { available } => {
            criteria.clone().toggle_availability(*available)
        }
        ShellEvent::ClearFilters => FilterCriteria::default(),
        ShellEvent::ToggleFilters
        | ShellEvent::ViewDetails { .. }
        | ShellEvent::CloseModal { .. }
        | ShellEvent::ToggleFavorite { .. }
        | ShellEvent::SetViewMode { .. } => return Ok(None),
    };

    Ok(Some(next))
}

impl PresentationShell {
    pub fn new(catalog: &Catalog) -> Self {
        let criteria = FilterCriteria::default();
        let visible = visible_ids(catalog, &criteria);
        Self {
            criteria,
            filters_open: false,
            modal: None,
            favorites: BTreeSet::new(),
            view_mode: ViewMode::default(),
            visible,
        }
    }

    pub fn state(&self) -> ShellState {
        if self.modal.is_some() {
            ShellState::ModalOpen
        } else if self.filters_open {
            ShellState::FiltersOpen
        } else {
            ShellState::Idle
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn visible(&self) -> &[ProductId] {
        &self.visible
    }

    pub fn modal_product(&self) -> Option<ProductId> {
        self.modal
    }

    /// Page scroll is suspended exactly while the detail modal is open.
    pub fn scroll_locked(&self) -> bool {
        self.modal.is_some()
    }

    pub fn filters_open(&self) -> bool {
        self.filters_open
    }

    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.favorites.contains(product_id)
    }

    pub fn favorites(&self) -> &BTreeSet<ProductId> {
        &self.favorites
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn apply(
        &mut self,
        catalog: &Catalog,
        event: ShellEvent,
    ) -> Result<TransitionOutcome, ShellTransitionError> {
        let from = self.state();
        let mut effects = Vec::new();

        if let Some(criteria) = reduce_criteria(&self.criteria, &event)? {
            self.visible = visible_ids(catalog, &criteria);
            self.criteria = criteria;
            effects.push(ShellEffect::RefilterProducts);
        }

        match &event {
            ShellEvent::ToggleFilters => self.filters_open = !self.filters_open,
            ShellEvent::ViewDetails { product_id } => {
                if !catalog.contains(product_id) {
                    return Err(ShellTransitionError::UnknownProduct(*product_id));
                }
                if self.modal.is_none() {
                    effects.push(ShellEffect::LockScroll);
                }
                self.modal = Some(*product_id);
            }
            ShellEvent::CloseModal { .. } => {
                if self.modal.take().is_some() {
                    effects.push(ShellEffect::RestoreScroll);
                }
            }
            ShellEvent::ToggleFavorite { product_id } => {
                if !catalog.contains(product_id) {
                    return Err(ShellTransitionError::UnknownProduct(*product_id));
                }
                if !self.favorites.remove(product_id) {
                    self.favorites.insert(*product_id);
                }
            }
            ShellEvent::SetViewMode { mode } => self.view_mode = *mode,
            ShellEvent::SearchChanged { .. }
            | ShellEvent::CategorySelected { .. }
            | ShellEvent::PriceBandClicked { .. }
            | ShellEvent::AvailabilityClicked { .. }
            | ShellEvent::ClearFilters => {}
        }

        Ok(TransitionOutcome {
            from,
            to: self.state(),
            event,
            effects,
            visible: self.visible.clone(),
        })
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            state: self.state(),
            criteria: self.criteria.clone(),
            filtered: self.criteria.is_filtered(),
            summary: result_summary(self.visible.len()),
            visible: self.visible.clone(),
            favorites: self.favorites.iter().copied().collect(),
            modal_product: self.modal,
            scroll_locked: self.scroll_locked(),
            filters_open: self.filters_open,
            view_mode: self.view_mode,
        }
    }
}

fn visible_ids(catalog: &Catalog, criteria: &FilterCriteria) -> Vec<ProductId> {
    filter_products(catalog, criteria).into_iter().map(|product| product.id).collect()
}
