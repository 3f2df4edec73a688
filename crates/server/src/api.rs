//! JSON API for the storefront.
//!
//! Endpoints:
//! - `GET    /api/v1/products`                 filtered catalog
//! - `GET    /api/v1/products/{id}`            one product
//! - `GET    /api/v1/recommendations`          ranked recommendations
//! - `GET    /api/v1/guide`                    selection guide matches
//! - `GET    /api/v1/splash`                   deterministic splash timeline
//! - `POST   /api/v1/sessions`                 open a listing session
//! - `GET    /api/v1/sessions/{id}`            session snapshot
//! - `POST   /api/v1/sessions/{id}/events`     apply a listing event
//! - `DELETE /api/v1/sessions/{id}`            close a listing session

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use botanica_core::catalog::Catalog;
use botanica_core::config::StorefrontConfig;
use botanica_core::domain::product::{Product, ProductId};
use botanica_core::errors::{ApplicationError, DomainError, InterfaceError};
use botanica_core::filter::{filter_products, result_summary, FilterCriteria};
use botanica_core::guide::{self, Benefit};
use botanica_core::recommend::{
    recommend, RankedProduct, RecommendationRequest, ScoreComponents, MAX_RECOMMENDATION_LIMIT,
};
use botanica_core::shell::{ShellEvent, ShellSnapshot, TransitionOutcome};
use botanica_core::splash::{SplashFrame, SplashScreen, SplashTimings};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::listing::{split_csv, ListingQuery};
use crate::sessions::{SessionError, SessionStore};

#[derive(Clone)]
pub struct ApiState {
    catalog: Arc<Catalog>,
    storefront: Arc<StorefrontConfig>,
    splash_tick: Duration,
    sessions: SessionStore,
}

impl ApiState {
    pub fn new(
        catalog: Arc<Catalog>,
        storefront: StorefrontConfig,
        splash_tick: Duration,
        sessions: SessionStore,
    ) -> Self {
        Self { catalog, storefront: Arc::new(storefront), splash_tick, sessions }
    }
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub message: &'static str,
    pub correlation_id: String,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub count: usize,
    pub filtered: bool,
    pub summary: String,
    pub criteria: FilterCriteria,
    pub products: Vec<Product>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    pub exclude: Option<u32>,
    pub preferences: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationEntry {
    pub product: Product,
    pub score: f64,
    pub components: ScoreComponents,
    pub matched_tags: Vec<String>,
}

impl From<RankedProduct<'_>> for RecommendationEntry {
    fn from(ranked: RankedProduct<'_>) -> Self {
        Self {
            product: ranked.product.clone(),
            score: ranked.score,
            components: ranked.components,
            matched_tags: ranked.matched_tags.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GuideQuery {
    pub benefits: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GuideEntry {
    pub product: Product,
    pub benefits: Vec<Benefit>,
}

#[derive(Debug, Serialize)]
pub struct GuideResponse {
    pub selected: Vec<String>,
    pub matches: Vec<GuideEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SplashQuery {
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SplashResponse {
    pub seed: u64,
    pub frames: Vec<SplashFrame>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub snapshot: ShellSnapshot,
}

#[derive(Debug, Serialize)]
pub struct SessionEventResponse {
    pub session_id: Uuid,
    pub outcome: TransitionOutcome,
    pub snapshot: ShellSnapshot,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/products", get(list_products))
        .route("/api/v1/products/{id}", get(get_product))
        .route("/api/v1/recommendations", get(recommendations))
        .route("/api/v1/guide", get(selection_guide))
        .route("/api/v1/splash", get(splash_timeline))
        .route("/api/v1/sessions", post(create_session))
        .route("/api/v1/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/v1/sessions/{id}/events", post(apply_session_event))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Catalog handlers
// ---------------------------------------------------------------------------

async fn list_products(
    State(state): State<ApiState>,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Json<ProductListResponse>> {
    let criteria = query.criteria().map_err(bad_request)?;
    let products: Vec<Product> =
        filter_products(&state.catalog, &criteria).into_iter().cloned().collect();

    Ok(Json(ProductListResponse {
        count: products.len(),
        filtered: criteria.is_filtered(),
        summary: result_summary(products.len()),
        criteria,
        products,
    }))
}

async fn get_product(
    State(state): State<ApiState>,
    Path(id): Path<u32>,
) -> ApiResult<Json<Product>> {
    let product_id = ProductId(id);
    state
        .catalog
        .find(&product_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| reject(ApplicationError::from(DomainError::UnknownProduct(product_id))))
}

async fn recommendations(
    State(state): State<ApiState>,
    Query(query): Query<RecommendationQuery>,
) -> ApiResult<Json<Vec<RecommendationEntry>>> {
    let limit = query.limit.unwrap_or(state.storefront.recommendation_limit);
    if !(1..=MAX_RECOMMENDATION_LIMIT).contains(&limit) {
        return Err(bad_request(format!("limit must be in range 1..={MAX_RECOMMENDATION_LIMIT}")));
    }

    let mut request = RecommendationRequest::new()
        .with_preferences(split_csv(query.preferences.as_deref()))
        .with_limit(limit);
    if let Some(exclude) = query.exclude {
        request = request.excluding(ProductId(exclude));
    }

    let ranked = recommend(&state.catalog, &request);
    Ok(Json(ranked.into_iter().map(RecommendationEntry::from).collect()))
}

async fn selection_guide(
    State(state): State<ApiState>,
    Query(query): Query<GuideQuery>,
) -> ApiResult<Json<GuideResponse>> {
    let selected = split_csv(query.benefits.as_deref());
    if let Some(unknown) = selected.iter().find(|id| guide::benefit(id).is_none()) {
        return Err(bad_request(format!("unknown benefit `{unknown}`")));
    }

    let matches = guide::matching(&state.catalog, &selected)
        .into_iter()
        .map(|entry| GuideEntry {
            product: entry.product.clone(),
            benefits: entry.benefits.into_iter().copied().collect(),
        })
        .collect();

    Ok(Json(GuideResponse { selected, matches }))
}

async fn splash_timeline(
    State(state): State<ApiState>,
    Query(query): Query<SplashQuery>,
) -> Json<SplashResponse> {
    let seed = query.seed.unwrap_or_else(rand::random);
    let timings = SplashTimings { tick: state.splash_tick, ..SplashTimings::default() };
    Json(SplashResponse { seed, frames: SplashScreen::timeline(timings, seed) })
}

// ---------------------------------------------------------------------------
// Session handlers
// ---------------------------------------------------------------------------

async fn create_session(State(state): State<ApiState>) -> (StatusCode, Json<SessionResponse>) {
    let (session_id, snapshot) = state.sessions.create(&state.catalog).await;
    (StatusCode::CREATED, Json(SessionResponse { session_id, snapshot }))
}

async fn get_session(
    State(state): State<ApiState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<SessionResponse>> {
    let snapshot = state.sessions.snapshot(session_id).await.map_err(session_error)?;
    Ok(Json(SessionResponse { session_id, snapshot }))
}

async fn apply_session_event(
    State(state): State<ApiState>,
    Path(session_id): Path<Uuid>,
    Json(event): Json<ShellEvent>,
) -> ApiResult<Json<SessionEventResponse>> {
    let (outcome, snapshot) =
        state.sessions.apply(session_id, &state.catalog, event).await.map_err(session_error)?;
    Ok(Json(SessionEventResponse { session_id, outcome, snapshot }))
}

async fn delete_session(
    State(state): State<ApiState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.sessions.remove(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_error(SessionError::UnknownSession(session_id)))
    }
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn correlation_id() -> String {
    Uuid::new_v4().to_string()
}

fn bad_request(message: String) -> (StatusCode, Json<ApiError>) {
    interface_error(InterfaceError::BadRequest { message, correlation_id: correlation_id() })
}

fn reject(error: ApplicationError) -> (StatusCode, Json<ApiError>) {
    interface_error(error.into_interface(correlation_id()))
}

fn session_error(error: SessionError) -> (StatusCode, Json<ApiError>) {
    match error {
        SessionError::UnknownSession(session_id) => interface_error(InterfaceError::NotFound {
            message: format!("session {session_id} does not exist"),
            correlation_id: session_id.to_string(),
        }),
        SessionError::Transition(error) => {
            reject(ApplicationError::from(DomainError::ShellTransition(error)))
        }
    }
}

fn interface_error(error: InterfaceError) -> (StatusCode, Json<ApiError>) {
    let status = match &error {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        warn!(
            event_name = "storefront.api.error",
            correlation_id = error.correlation_id(),
            error = %error,
            "api request failed"
        );
    } else {
        info!(
            event_name = "storefront.api.rejected",
            correlation_id = error.correlation_id(),
            error = %error,
            "api request rejected"
        );
    }

    (
        status,
        Json(ApiError {
            error: error.to_string(),
            message: error.user_message(),
            correlation_id: error.correlation_id().to_string(),
        }),
    )
}
