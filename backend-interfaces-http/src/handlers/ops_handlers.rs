use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::IntoResponse;

use backend_application::AppState;

pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let fallback_events = state.stores.fallback().len().await;
    let payload = state.metrics.render_prometheus(fallback_events);
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload).into_response()
}
