// Event entity
// Represents one recorded try-on interaction

use serde::{Deserialize, Serialize};

use crate::utils::utc_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnEvent {
    pub timestamp: i64,
    pub outfit_id: String,
    pub outfit_name: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

impl TryOnEvent {
    /// Stamps a validated submission. `date` is always derived from `timestamp`.
    pub fn new(submission: TryOnSubmission, context: RequestContext, timestamp: i64) -> Self {
        Self {
            timestamp,
            outfit_id: submission.outfit_id,
            outfit_name: submission.outfit_name,
            date: utc_date(timestamp),
            session_id: submission.session_id,
            user_agent: context.user_agent,
            referrer: context.referrer,
        }
    }
}

/// Client-supplied fields of a try-on, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnSubmission {
    pub outfit_id: String,
    pub outfit_name: String,
    pub session_id: Option<String>,
}

/// Raw POST body. Every field is optional so a missing field is a
/// validation failure instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnPayload {
    #[serde(default)]
    pub outfit_id: Option<String>,
    #[serde(default)]
    pub outfit_name: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}
