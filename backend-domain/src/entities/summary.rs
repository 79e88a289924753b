use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::TryOnEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitAnalytics {
    pub outfit_id: String,
    pub outfit_name: String,
    pub try_on_count: u64,
    pub last_try_on: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_try_ons: u64,
    pub unique_outfits: u64,
    pub unique_sessions: u64,
    pub conversion_rate: f64,
    pub most_popular_outfits: Vec<OutfitAnalytics>,
    pub try_ons_by_date: BTreeMap<String, u64>,
    pub recent_events: Vec<TryOnEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub days: BTreeMap<String, u64>,
    pub average_per_day: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyActivityQuery {
    pub days: Option<u32>,
}
