use tracing::{debug, error};

use backend_domain::{summarize, AnalyticsSummary};

use crate::{AppError, AppState};

pub async fn get_summary(state: &AppState) -> Result<AnalyticsSummary, AppError> {
    let (source, events) = state.stores.snapshot().await.map_err(|err| {
        error!("failed to load events for summary: {:#}", err);
        AppError::Internal(err)
    })?;
    state.metrics.record_read(source);
    debug!(source = source.as_str(), events = events.len(), "summarizing try-on events");
    Ok(summarize(&events))
}
