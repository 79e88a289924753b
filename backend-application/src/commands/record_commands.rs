use tracing::{debug, warn};

use backend_domain::{
    append_with_cap, current_millis, normalize_optional_text, EventStore, RequestContext,
    StoreSource, TryOnEvent, TryOnPayload, TryOnSubmission, RETENTION_CAP,
};

use crate::{AppError, AppState};

pub fn validate_payload(payload: TryOnPayload) -> Result<TryOnSubmission, AppError> {
    let outfit_id = payload.outfit_id.filter(|value| !value.trim().is_empty());
    let outfit_name = payload.outfit_name.filter(|value| !value.trim().is_empty());
    match (outfit_id, outfit_name) {
        (Some(outfit_id), Some(outfit_name)) => Ok(TryOnSubmission {
            outfit_id,
            outfit_name,
            session_id: normalize_optional_text(payload.session_id),
        }),
        _ => Err(AppError::BadRequest("Missing required fields".to_string())),
    }
}

/// Records one try-on. Durable backend first; any durable failure sends this
/// single write to the fallback collection instead.
pub async fn record_try_on(
    state: &AppState,
    payload: TryOnPayload,
    context: RequestContext,
) -> Result<StoreSource, AppError> {
    let submission = match validate_payload(payload) {
        Ok(submission) => submission,
        Err(err) => {
            state.metrics.record_rejected();
            return Err(err);
        }
    };
    let event = TryOnEvent::new(submission, context, current_millis());

    if let Some(store) = state.stores.durable().await {
        match append_event(&store, event.clone()).await {
            Ok(len) => {
                debug!(outfit_id = %event.outfit_id, len, "try-on recorded in durable store");
                state.metrics.record_event(StoreSource::Durable);
                return Ok(StoreSource::Durable);
            }
            Err(err) => {
                warn!("durable append failed, recording to fallback: {:#}", err);
                state.stores.invalidate().await;
            }
        }
    }

    let fallback = state.stores.fallback();
    let len = append_event(fallback.as_ref(), event.clone())
        .await
        .map_err(AppError::Internal)?;
    debug!(outfit_id = %event.outfit_id, len, "try-on recorded in fallback store");
    state.metrics.record_event(StoreSource::Fallback);
    Ok(StoreSource::Fallback)
}

async fn append_event<S: EventStore + ?Sized>(
    store: &S,
    event: TryOnEvent,
) -> anyhow::Result<usize> {
    let mut events = store.load().await?;
    append_with_cap(&mut events, event, RETENTION_CAP);
    store.save(&events).await?;
    Ok(events.len())
}
