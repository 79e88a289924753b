use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Duration, NaiveDate};

use crate::entities::{
    AnalyticsSummary, DailyActivity, OutfitAnalytics, TryOnEvent, RECENT_EVENTS_LIMIT,
};
use crate::utils::DATE_FORMAT;

pub fn summarize(events: &[TryOnEvent]) -> AnalyticsSummary {
    let total_try_ons = events.len() as u64;

    // Entries keep first-encountered order so the stable sort below breaks ties by it.
    let mut outfits: Vec<OutfitAnalytics> = Vec::new();
    let mut outfit_index: HashMap<&str, usize> = HashMap::new();
    let mut sessions: HashSet<&str> = HashSet::new();
    let mut try_ons_by_date: BTreeMap<String, u64> = BTreeMap::new();

    for event in events {
        match outfit_index.get(event.outfit_id.as_str()) {
            Some(&idx) => {
                let entry = &mut outfits[idx];
                entry.try_on_count += 1;
                entry.last_try_on = entry.last_try_on.max(event.timestamp);
                entry.outfit_name = event.outfit_name.clone();
            }
            None => {
                outfit_index.insert(event.outfit_id.as_str(), outfits.len());
                outfits.push(OutfitAnalytics {
                    outfit_id: event.outfit_id.clone(),
                    outfit_name: event.outfit_name.clone(),
                    try_on_count: 1,
                    last_try_on: event.timestamp,
                });
            }
        }

        if let Some(session_id) = event.session_id.as_deref() {
            if !session_id.is_empty() {
                sessions.insert(session_id);
            }
        }

        *try_ons_by_date.entry(event.date.clone()).or_insert(0) += 1;
    }

    let unique_outfits = outfits.len() as u64;
    let unique_sessions = sessions.len() as u64;
    let conversion_rate = if unique_sessions > 0 {
        total_try_ons as f64 / unique_sessions as f64
    } else {
        0.0
    };

    outfits.sort_by(|a, b| b.try_on_count.cmp(&a.try_on_count));

    let recent_events = events
        .iter()
        .rev()
        .take(RECENT_EVENTS_LIMIT)
        .cloned()
        .collect();

    AnalyticsSummary {
        total_try_ons,
        unique_outfits,
        unique_sessions,
        conversion_rate,
        most_popular_outfits: outfits,
        try_ons_by_date,
        recent_events,
    }
}

/// Events dated within `[start, end]`, inclusive, in insertion order.
pub fn events_in_range(events: &[TryOnEvent], start: NaiveDate, end: NaiveDate) -> Vec<TryOnEvent> {
    let start = start.format(DATE_FORMAT).to_string();
    let end = end.format(DATE_FORMAT).to_string();
    events
        .iter()
        .filter(|event| event.date >= start && event.date <= end)
        .cloned()
        .collect()
}

/// Zero-filled counts for the `days` dates ending at `today`.
pub fn daily_counts(events: &[TryOnEvent], days: u32, today: NaiveDate) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<String, u64> = (0..days)
        .map(|offset| {
            let date = today - Duration::days(i64::from(offset));
            (date.format(DATE_FORMAT).to_string(), 0)
        })
        .collect();
    for event in events {
        if let Some(count) = counts.get_mut(&event.date) {
            *count += 1;
        }
    }
    counts
}

pub fn average_per_day(events: &[TryOnEvent]) -> f64 {
    if events.is_empty() {
        return 0.0;
    }
    let dates: HashSet<&str> = events.iter().map(|event| event.date.as_str()).collect();
    events.len() as f64 / dates.len() as f64
}

pub fn daily_activity(events: &[TryOnEvent], days: u32, today: NaiveDate) -> DailyActivity {
    DailyActivity {
        days: daily_counts(events, days, today),
        average_per_day: average_per_day(events),
    }
}
