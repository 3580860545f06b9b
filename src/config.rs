//! Handler configuration
//!
//! Conference data (agenda, tracks, date) comes from an
//! [`AgendaSource`](crate::agenda::AgendaSource); this holds the knobs of the
//! dialog itself.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::BookingResult;

/// Intent name the booking handler answers to by default
pub const DEFAULT_INTENT_NAME: &str = "CheckConferenceAgenda";

/// Configuration of the session booking dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingConfig {
    /// Intent name to register the booking handler under
    pub intent_name: String,
    /// Accepted session times
    pub business_hours: BusinessHours,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            intent_name: DEFAULT_INTENT_NAME.to_string(),
            business_hours: BusinessHours::default(),
        }
    }
}

impl BookingConfig {
    pub fn from_json(json: &str) -> BookingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read configuration from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> BookingResult<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }
}

/// Hours during which a session time is accepted, inclusive on both ends
///
/// The shipped message advertises 9am to 6pm while the enforced window is
/// hours 8 through 17. Both defaults are kept as they were released; change
/// them together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessHours {
    pub earliest_hour: i32,
    pub latest_hour: i32,
    /// Reprompt shown when the hour is outside the window
    pub message: String,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            earliest_hour: 8,
            latest_hour: 17,
            message: "The conference hours are from 9am to 6pm. Can you specify a time during this range?"
                .to_string(),
        }
    }
}

impl BusinessHours {
    pub fn contains(&self, hour: i32) -> bool {
        (self.earliest_hour..=self.latest_hour).contains(&hour)
    }
}
