use axum::routing::get;
use axum::Router;

use backend_application::AppState;

use crate::handlers::{analytics_handlers, ops_handlers};
use crate::middleware::cors_headers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/analytics",
            get(analytics_handlers::get_summary)
                .post(analytics_handlers::record_try_on)
                .options(analytics_handlers::preflight)
                .fallback(analytics_handlers::method_not_allowed),
        )
        .route(
            "/api/analytics/range",
            get(analytics_handlers::list_events_in_range)
                .options(analytics_handlers::preflight)
                .fallback(analytics_handlers::method_not_allowed),
        )
        .route(
            "/api/analytics/daily",
            get(analytics_handlers::get_daily_activity)
                .options(analytics_handlers::preflight)
                .fallback(analytics_handlers::method_not_allowed),
        )
        .route("/metrics", get(ops_handlers::metrics_prometheus))
        .layer(axum::middleware::from_fn(cors_headers))
        .with_state(state)
}
