use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use botanica_core::catalog::Catalog;
use chrono::Utc;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    catalog: Arc<Catalog>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub catalog: HealthCheck,
    pub checked_at: String,
}

pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { catalog })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog = catalog_check(&state.catalog);
    let ready = catalog.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "botanica-server runtime initialized".to_string(),
        },
        catalog,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn catalog_check(catalog: &Catalog) -> HealthCheck {
    if catalog.is_empty() {
        return HealthCheck { status: "degraded", detail: "catalog has no products".to_string() };
    }

    let issues = catalog.validate();
    if issues.is_empty() {
        HealthCheck { status: "ready", detail: format!("{} products loaded", catalog.len()) }
    } else {
        HealthCheck {
            status: "degraded",
            detail: format!("{} catalog issue(s), first: {}", issues.len(), issues[0].message),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, Json};
    use botanica_core::catalog::Catalog;

    use crate::health::{health, HealthState};

    #[tokio::test]
    async fn health_returns_ready_for_a_valid_catalog() {
        let (status, Json(payload)) =
            health(State(HealthState { catalog: Arc::new(Catalog::sample()) })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.catalog.status, "ready");
        assert_eq!(payload.catalog.detail, "6 products loaded");
        assert_eq!(payload.service.status, "ready");
    }

    #[tokio::test]
    async fn health_returns_service_unavailable_for_an_empty_catalog() {
        let catalog = Catalog::new(Vec::new()).expect("empty catalog is constructible");

        let (status, Json(payload)) = health(State(HealthState { catalog: Arc::new(catalog) })).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.catalog.status, "degraded");
        assert_eq!(payload.service.status, "ready");
    }

    #[tokio::test]
    async fn health_reports_catalog_integrity_issues() {
        let mut products = Catalog::sample().products().to_vec();
        products[0].price = "free".to_string();
        let catalog = Catalog::new(products).expect("ids are still unique");

        let (status, Json(payload)) = health(State(HealthState { catalog: Arc::new(catalog) })).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(payload.catalog.detail.contains("catalog issue"));
    }
}
