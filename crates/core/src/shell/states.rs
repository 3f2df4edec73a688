use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellState {
    Idle,
    FiltersOpen,
    ModalOpen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalCloseReason {
    Explicit,
    Backdrop,
    RouteChange,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            other => Err(format!("unsupported view mode `{other}` (expected grid|list)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShellEvent {
    SearchChanged { text: String },
    CategorySelected { category: String },
    /// Index into the fixed price band list.
    PriceBandClicked { band: usize },
    AvailabilityClicked { available: bool },
    ClearFilters,
    ToggleFilters,
    ViewDetails { product_id: ProductId },
    CloseModal { reason: ModalCloseReason },
    ToggleFavorite { product_id: ProductId },
    SetViewMode { mode: ViewMode },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellEffect {
    RefilterProducts,
    LockScroll,
    RestoreScroll,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub from: ShellState,
    pub to: ShellState,
    pub event: ShellEvent,
    pub effects: Vec<ShellEffect>,
    /// Products visible after the event, in catalog order.
    pub visible: Vec<ProductId>,
}
