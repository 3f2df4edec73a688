//! Server-rendered storefront pages.
//!
//! HTML Endpoints:
//! - `GET /`                 home page (hero, collection, selection guide, journey, quotes)
//! - `GET /products`         filtered product listing
//! - `GET /products/{id}`    listing with the product detail modal open

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use botanica_core::catalog::Catalog;
use botanica_core::config::StorefrontConfig;
use botanica_core::content::{BENEFIT_CARDS, HERO_SLIDES, JOURNEY_STEPS, MINDFUL_MOMENTS, QUOTES};
use botanica_core::domain::product::{Product, ProductId};
use botanica_core::filter::{
    filter_products, result_summary, FilterCriteria, PriceRange, ALL_CATEGORIES, CATEGORIES,
    PRICE_BANDS,
};
use botanica_core::guide::{self, BENEFITS};
use botanica_core::recommend::{recommend, RecommendationRequest};
use botanica_core::shell::ViewMode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};
use tracing::{debug, warn};

use crate::bootstrap::Rotators;
use crate::listing::{split_csv, ListingQuery};

#[derive(Clone)]
pub struct StorefrontState {
    catalog: Arc<Catalog>,
    storefront: Arc<StorefrontConfig>,
    rotators: Rotators,
    templates: Arc<Tera>,
}

impl StorefrontState {
    pub fn new(catalog: Arc<Catalog>, storefront: StorefrontConfig, rotators: Rotators) -> Self {
        Self { catalog, storefront: Arc::new(storefront), rotators, templates: init_templates() }
    }
}

/// Target of a listing link; rendered into a query string by the `listing_href` macro.
#[derive(Clone, Debug, Serialize)]
struct ListingLink {
    path: String,
    search: String,
    category: String,
    min: Decimal,
    max: Decimal,
    available: Option<bool>,
    view: &'static str,
}

impl ListingLink {
    fn new(criteria: &FilterCriteria, view: ViewMode) -> Self {
        Self {
            path: "/products".to_string(),
            search: criteria.search.clone(),
            category: criteria.category.clone(),
            min: criteria.price_range.min,
            max: criteria.price_range.max,
            available: criteria.availability,
            view: view.as_str(),
        }
    }

    fn detail(mut self, product_id: ProductId) -> Self {
        self.path = format!("/products/{product_id}");
        self
    }
}

#[derive(Debug, Serialize)]
struct ProductCard<'a> {
    product: &'a Product,
    link: ListingLink,
}

#[derive(Debug, Serialize)]
struct ToggleOption {
    label: &'static str,
    active: bool,
    link: ListingLink,
}

#[derive(Debug, Serialize)]
struct GuideToggle {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    selected: bool,
    href: String,
}

#[derive(Debug, Serialize)]
struct GuideCard<'a> {
    product: &'a Product,
    benefits: Vec<&'static str>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub benefits: Option<String>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

fn init_templates() -> Arc<Tera> {
    let mut tera = match Tera::new("templates/storefront/**/*") {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "Failed to load storefront templates from filesystem");
            Tera::default()
        }
    };

    if tera.get_template_names().next().is_none() {
        let embedded = vec![
            ("macros.html", include_str!("../../../templates/storefront/macros.html")),
            ("base.html", include_str!("../../../templates/storefront/base.html")),
            ("index.html", include_str!("../../../templates/storefront/index.html")),
            ("products.html", include_str!("../../../templates/storefront/products.html")),
        ];
        if let Err(e) = tera.add_raw_templates(embedded) {
            warn!(error = %e, "Failed to register built-in storefront templates");
        }
    }

    Arc::new(tera)
}

pub fn router(state: StorefrontState) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/products", get(products_page))
        .route("/products/{id}", get(product_detail_page))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// HTML Handlers
// ---------------------------------------------------------------------------

async fn home_page(
    State(state): State<StorefrontState>,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let hero_index = state.rotators.hero.lock().await.current();
    let quote_index = state.rotators.quote.lock().await.current();
    let journey_index = state.rotators.journey.lock().await.current();

    let selected: Vec<String> = split_csv(query.benefits.as_deref())
        .into_iter()
        .filter(|id| guide::benefit(id).is_some())
        .collect();
    let guide_benefits: Vec<GuideToggle> = BENEFITS
        .iter()
        .map(|benefit| {
            let mut toggled = selected.clone();
            guide::toggle_benefit(&mut toggled, benefit.id);
            GuideToggle {
                id: benefit.id,
                label: benefit.label,
                icon: benefit.icon,
                selected: selected.iter().any(|id| id == benefit.id),
                href: if toggled.is_empty() {
                    "/".to_string()
                } else {
                    format!("/?benefits={}", toggled.join(","))
                },
            }
        })
        .collect();
    let guide_matches: Vec<GuideCard<'_>> = guide::matching(&state.catalog, &selected)
        .into_iter()
        .map(|entry| GuideCard {
            product: entry.product,
            benefits: entry.benefits.iter().map(|benefit| benefit.label).collect(),
        })
        .collect();

    let cleared = FilterCriteria::default();
    let showcase: Vec<ProductCard<'_>> = state
        .catalog
        .products()
        .iter()
        .map(|product| ProductCard {
            product,
            link: ListingLink::new(&cleared, ViewMode::default()).detail(product.id),
        })
        .collect();
    let recommendations = recommendation_cards(
        &state,
        RecommendationRequest::new().with_limit(state.storefront.recommendation_limit),
        &cleared,
        ViewMode::default(),
    );

    let mut context = Context::new();
    context.insert("brand", &state.storefront.brand_name);
    context.insert("hero", &HERO_SLIDES.get(hero_index).or(HERO_SLIDES.first()));
    context.insert("hero_index", &hero_index);
    context.insert("hero_count", &HERO_SLIDES.len());
    context.insert("benefit_cards", BENEFIT_CARDS);
    context.insert("showcase", &showcase);
    context.insert("guide_benefits", &guide_benefits);
    context.insert("guide_matches", &guide_matches);
    context.insert("journey_steps", JOURNEY_STEPS);
    context.insert("journey_index", &journey_index);
    context.insert("quote", &QUOTES.get(quote_index).or(QUOTES.first()));
    context.insert("moments", MINDFUL_MOMENTS);
    context.insert("recommendations", &recommendations);

    render(&state.templates, "index.html", &context)
}

async fn products_page(
    State(state): State<StorefrontState>,
    Query(query): Query<ListingQuery>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    render_listing(&state, &query, None)
}

async fn product_detail_page(
    State(state): State<StorefrontState>,
    Path(id): Path<u32>,
    Query(query): Query<ListingQuery>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let product_id = ProductId(id);
    let product = state.catalog.find(&product_id).ok_or_else(|| {
        (StatusCode::NOT_FOUND, Html(format!("<h1>Not Found</h1><p>No tea with id {id}.</p>")))
    })?;
    debug!(event_name = "storefront.product.viewed", product_id = %product_id, "product opened");

    render_listing(&state, &query, Some(product))
}

fn render_listing(
    state: &StorefrontState,
    query: &ListingQuery,
    modal: Option<&Product>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let criteria = query.criteria().map_err(bad_request)?;
    let view = query.view_mode().map_err(bad_request)?;
    let products = filter_products(&state.catalog, &criteria);

    let categories: Vec<ToggleOption> = CATEGORIES
        .iter()
        .map(|category| ToggleOption {
            label: category.label,
            active: if category.id == ALL_CATEGORIES {
                criteria.is_all_categories()
            } else {
                criteria.category == category.id
            },
            link: ListingLink::new(&criteria.clone().with_category(category.id), view),
        })
        .collect();
    let price_bands: Vec<ToggleOption> = PRICE_BANDS
        .iter()
        .map(|band| ToggleOption {
            label: band.label,
            active: criteria.price_range == band.range(),
            link: ListingLink::new(&criteria.clone().toggle_price_band(band), view),
        })
        .collect();
    let availability: Vec<ToggleOption> = [("In Stock", true), ("Out of Stock", false)]
        .into_iter()
        .map(|(label, available)| ToggleOption {
            label,
            active: criteria.availability == Some(available),
            link: ListingLink::new(&criteria.clone().toggle_availability(available), view),
        })
        .collect();
    let modes = [("Grid View", ViewMode::Grid), ("List View", ViewMode::List)];
    let view_options: Vec<ToggleOption> = modes
        .into_iter()
        .map(|(label, mode)| ToggleOption {
            label,
            active: view == mode,
            link: ListingLink::new(&criteria, mode),
        })
        .collect();

    let current = ListingLink::new(&criteria, view);
    let cards: Vec<ProductCard<'_>> = products
        .iter()
        .map(|&product| ProductCard { product, link: current.clone().detail(product.id) })
        .collect();

    let mut request = RecommendationRequest::new()
        .with_preferences(state.storefront.default_preferences.iter().cloned())
        .with_limit(state.storefront.recommendation_limit);
    if let Some(product) = modal {
        request = request.excluding(product.id);
    }
    let recommendations = recommendation_cards(state, request, &criteria, view);

    let mut context = Context::new();
    context.insert("brand", &state.storefront.brand_name);
    context.insert("current", &current);
    context.insert("clear_link", &ListingLink::new(&FilterCriteria::default(), view));
    context.insert("categories", &categories);
    context.insert("price_bands", &price_bands);
    context.insert("availability", &availability);
    let filters_open =
        criteria.price_range != PriceRange::default() || criteria.availability.is_some();
    context.insert("filters_open", &filters_open);
    context.insert("view_options", &view_options);
    context.insert("summary", &result_summary(products.len()));
    context.insert("filtered", &criteria.is_filtered());
    context.insert("products", &cards);
    context.insert("recommendations", &recommendations);
    context.insert("modal", &modal);

    render(&state.templates, "products.html", &context)
}

fn recommendation_cards<'a>(
    state: &'a StorefrontState,
    request: RecommendationRequest,
    criteria: &FilterCriteria,
    view: ViewMode,
) -> Vec<ProductCard<'a>> {
    recommend(&state.catalog, &request)
        .into_iter()
        .map(|ranked| ProductCard {
            product: ranked.product,
            link: ListingLink::new(criteria, view).detail(ranked.product.id),
        })
        .collect()
}

fn render(
    templates: &Tera,
    name: &str,
    context: &Context,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let html = templates.render(name, context).map_err(|e| {
        warn!(
            event_name = "storefront.render.error",
            template = name,
            error = ?e,
            "template render failed"
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Template Error</h1><p>The page could not be rendered.</p>".to_string()),
        )
    })?;

    Ok(Html(html))
}

fn bad_request(message: String) -> (StatusCode, Html<String>) {
    let body = format!("<h1>Bad Request</h1><p>{}</p>", tera::escape_html(&message));
    (StatusCode::BAD_REQUEST, Html(body))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use botanica_core::catalog::Catalog;
    use botanica_core::config::AppConfig;
    use tower::ServiceExt;

    use super::{router, StorefrontState};
    use crate::bootstrap::Rotators;

    fn app() -> Router {
        router(StorefrontState::new(
            Arc::new(Catalog::sample()),
            AppConfig::default().storefront,
            Rotators::default(),
        ))
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).expect("request builds");
        let response = app.clone().oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body collects");
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn home_page_renders_every_section() {
        let (status, html) = get(&app(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Zen Botanica"));
        assert!(html.contains("Tranquil Evening Blend"));
        assert!(html.contains("In the silence between sips, we find our truest selves."));
        assert!(html.contains("Find Your Perfect Tea"));
        assert!(html.contains("You Might Also Love"));
    }

    #[tokio::test]
    async fn home_page_guide_honors_selected_benefits() {
        let (status, html) = get(&app(), "/?benefits=digestion").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Perfect for: Digestion"));
        assert!(!html.contains("Perfect for: Sleep"));
    }

    #[tokio::test]
    async fn listing_shows_summary_and_filtered_badge() {
        let (status, html) = get(&app(), "/products?search=ginger").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("2 Products Found"));
        assert!(html.contains("Filtered Results"));
        assert!(html.contains("Digestive Harmony"));
    }

    #[tokio::test]
    async fn unfiltered_listing_has_no_badge() {
        let (_, html) = get(&app(), "/products").await;

        assert!(html.contains("6 Products Found"));
        assert!(!html.contains("Filtered Results"));
    }

    #[tokio::test]
    async fn empty_result_offers_clear_filters() {
        let (status, html) = get(&app(), "/products?search=espresso").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("0 Products Found"));
        assert!(html.contains("No Products Found"));
        assert!(html.contains("Clear All Filters"));
    }

    #[tokio::test]
    async fn detail_page_opens_modal_for_known_product() {
        let app = app();

        let (status, html) = get(&app, "/products/3").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("aria-modal=\"true\""));
        assert!(html.contains("Ashwagandha"));

        let (status, _) = get(&app, "/products/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_listing_query_is_rejected() {
        let (status, html) = get(&app(), "/products?max=lots").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(html.contains("max must be a price"));
    }
}
