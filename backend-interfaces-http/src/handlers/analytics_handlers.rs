use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use tracing::warn;

use backend_application::commands::record_commands;
use backend_application::queries::{activity_queries, summary_queries};
use backend_application::AppState;
use backend_domain::{
    AnalyticsSummary, DailyActivity, DailyActivityQuery, DateRangeQuery, TryOnEvent,
};

use crate::error::HttpError;
use crate::middleware::{parse_try_on, request_context};

#[derive(Serialize)]
pub struct RecordResponse {
    pub success: bool,
}

pub async fn record_try_on(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RecordResponse>, HttpError> {
    let payload = parse_try_on(&headers, &body).map_err(|err| {
        warn!("failed to parse try-on body: {}", err);
        state.metrics.record_rejected();
        HttpError::BadRequest("Invalid request body".to_string())
    })?;
    record_commands::record_try_on(&state, payload, request_context(&headers))
        .await
        .map_err(|err| HttpError::from_app(err, "Failed to log event"))?;
    Ok(Json(RecordResponse { success: true }))
}

pub async fn get_summary(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsSummary>, HttpError> {
    let summary = summary_queries::get_summary(&state)
        .await
        .map_err(|err| HttpError::from_app(err, "Failed to get analytics"))?;
    Ok(Json(summary))
}

pub async fn list_events_in_range(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<TryOnEvent>>, HttpError> {
    let events = activity_queries::list_events_in_range(&state, query)
        .await
        .map_err(|err| HttpError::from_app(err, "Failed to get analytics"))?;
    Ok(Json(events))
}

pub async fn get_daily_activity(
    State(state): State<AppState>,
    Query(query): Query<DailyActivityQuery>,
) -> Result<Json<DailyActivity>, HttpError> {
    let activity = activity_queries::get_daily_activity(&state, query)
        .await
        .map_err(|err| HttpError::from_app(err, "Failed to get analytics"))?;
    Ok(Json(activity))
}

pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> HttpError {
    HttpError::MethodNotAllowed
}
