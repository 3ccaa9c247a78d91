//! HTTP API of the delivery backend.
//!
//! REST endpoints for customers, restaurants, products, orders and sales
//! reports, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod pagination;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use domain::store::Store;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: Store>(state: Arc<AppState<S>>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/customers", post(routes::customers::create::<S>))
        .route("/api/customers", get(routes::customers::list::<S>))
        .route("/api/customers/{id}", get(routes::customers::get::<S>))
        .route("/api/customers/{id}", put(routes::customers::update::<S>))
        .route(
            "/api/customers/{id}",
            delete(routes::customers::deactivate::<S>),
        )
        .route("/api/restaurants", post(routes::restaurants::create::<S>))
        .route("/api/restaurants", get(routes::restaurants::list::<S>))
        .route("/api/restaurants/{id}", get(routes::restaurants::get::<S>))
        .route(
            "/api/restaurants/{id}",
            put(routes::restaurants::update::<S>),
        )
        .route(
            "/api/restaurants/{id}/status",
            patch(routes::restaurants::set_status::<S>),
        )
        .route(
            "/api/restaurants/{id}/products",
            get(routes::restaurants::products::<S>),
        )
        .route("/api/products", post(routes::products::create::<S>))
        .route("/api/products", get(routes::products::search::<S>))
        .route(
            "/api/products/category/{category}",
            get(routes::products::by_category::<S>),
        )
        .route("/api/products/{id}", get(routes::products::get::<S>))
        .route("/api/products/{id}", put(routes::products::update::<S>))
        .route("/api/products/{id}", delete(routes::products::delete::<S>))
        .route(
            "/api/products/{id}/availability",
            patch(routes::products::set_availability::<S>),
        )
        .route("/api/orders", post(routes::orders::create::<S>))
        .route("/api/orders", get(routes::orders::list::<S>))
        .route("/api/orders/{id}", get(routes::orders::get::<S>))
        .route("/api/orders/{id}", delete(routes::orders::cancel::<S>))
        .route(
            "/api/orders/{id}/status",
            patch(routes::orders::update_status::<S>),
        )
        .route(
            "/api/orders/customer/{id}",
            get(routes::orders::by_customer::<S>),
        )
        .route(
            "/api/orders/restaurant/{id}",
            get(routes::orders::by_restaurant::<S>),
        )
        .route(
            "/api/reports/sales-by-restaurant",
            get(routes::reports::sales_by_restaurant::<S>),
        )
        .route(
            "/api/reports/orders-in-period",
            get(routes::reports::orders_in_period::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state over the given store.
pub fn create_default_state<S: Store>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState::new(store))
}
