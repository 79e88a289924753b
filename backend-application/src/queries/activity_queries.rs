use chrono::Utc;
use tracing::error;

use backend_domain::{
    daily_activity, events_in_range, parse_date, DailyActivity, DailyActivityQuery, DateRangeQuery,
    TryOnEvent,
};

use crate::{AppError, AppState};

const DEFAULT_DAYS: u32 = 7;
const MAX_DAYS: u32 = 365;

pub async fn list_events_in_range(
    state: &AppState,
    query: DateRangeQuery,
) -> Result<Vec<TryOnEvent>, AppError> {
    let start = required_date(query.start_date.as_deref(), "startDate")?;
    let end = required_date(query.end_date.as_deref(), "endDate")?;

    let (source, events) = state.stores.snapshot().await.map_err(|err| {
        error!("failed to load events for range query: {:#}", err);
        AppError::Internal(err)
    })?;
    state.metrics.record_read(source);
    Ok(events_in_range(&events, start, end))
}

pub async fn get_daily_activity(
    state: &AppState,
    query: DailyActivityQuery,
) -> Result<DailyActivity, AppError> {
    let days = query.days.unwrap_or(DEFAULT_DAYS).clamp(1, MAX_DAYS);
    let (source, events) = state.stores.snapshot().await.map_err(|err| {
        error!("failed to load events for daily activity: {:#}", err);
        AppError::Internal(err)
    })?;
    state.metrics.record_read(source);
    Ok(daily_activity(&events, days, Utc::now().date_naive()))
}

fn required_date(value: Option<&str>, field: &str) -> Result<chrono::NaiveDate, AppError> {
    let Some(raw) = value.filter(|raw| !raw.trim().is_empty()) else {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    };
    parse_date(raw).map_err(|err| AppError::BadRequest(format!("invalid {}: {}", field, err)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::sample_event;
    use crate::{EventStores, MemoryEventStore, Metrics};
    use backend_domain::{utc_date, EventStore, RuntimeConfig};

    async fn state_with_events(events: &[TryOnEvent]) -> AppState {
        let fallback = Arc::new(MemoryEventStore::new());
        fallback.save(events).await.expect("seed");
        AppState {
            config: RuntimeConfig::default(),
            stores: Arc::new(EventStores::fallback_only(fallback)),
            metrics: Arc::new(Metrics::default()),
        }
    }

    fn range(start: Option<&str>, end: Option<&str>) -> DateRangeQuery {
        DateRangeQuery {
            start_date: start.map(ToString::to_string),
            end_date: end.map(ToString::to_string),
        }
    }

    #[tokio::test]
    async fn range_query_filters_by_date() {
        // 2024-03-09, 2024-03-10, 2024-05-01
        let state = state_with_events(&[
            sample_event("a", 1_709_942_400_000),
            sample_event("b", 1_710_028_800_000),
            sample_event("c", 1_714_564_800_000),
        ])
        .await;
        let events = list_events_in_range(&state, range(Some("2024-03-10"), Some("2024-04-30")))
            .await
            .expect("range");
        let ids: Vec<&str> = events.iter().map(|e| e.outfit_id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[tokio::test]
    async fn range_query_requires_valid_dates() {
        let state = state_with_events(&[]).await;
        for query in [
            range(None, Some("2024-03-10")),
            range(Some("2024-03-10"), None),
            range(Some("yesterday"), Some("2024-03-10")),
        ] {
            let err = list_events_in_range(&state, query).await.expect_err("reject");
            assert!(matches!(err, AppError::BadRequest(_)));
        }
    }

    #[tokio::test]
    async fn daily_activity_defaults_to_a_week_and_clamps() {
        let now = backend_domain::current_millis();
        let state = state_with_events(&[sample_event("a", now), sample_event("b", now)]).await;

        let week = get_daily_activity(&state, DailyActivityQuery::default())
            .await
            .expect("activity");
        assert_eq!(week.days.len(), DEFAULT_DAYS as usize);
        assert_eq!(week.days.get(&utc_date(now)), Some(&2));
        assert_eq!(week.average_per_day, 2.0);

        let clamped = get_daily_activity(&state, DailyActivityQuery { days: Some(0) })
            .await
            .expect("activity");
        assert_eq!(clamped.days.len(), 1);
    }
}
