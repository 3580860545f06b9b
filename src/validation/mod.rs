//! Slot validation for session booking
//!
//! Checks run in a fixed order (track, date, time) and stop at the first
//! violation. Slots that are not supplied yet are skipped.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::agenda::AgendaCatalog;
use crate::config::BusinessHours;
use crate::value_objects::{SlotName, ValidationResult};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%A, %B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Validates the slots of a booking turn against the conference rules
#[derive(Debug, Clone)]
pub struct SlotValidator {
    tracks: Vec<String>,
    conference_date: NaiveDate,
    business_hours: BusinessHours,
}

impl SlotValidator {
    pub fn new(tracks: Vec<String>, conference_date: NaiveDate, business_hours: BusinessHours) -> Self {
        Self {
            tracks,
            conference_date,
            business_hours,
        }
    }

    /// Build a validator for the conference described by a catalog
    pub fn for_catalog(catalog: &AgendaCatalog, business_hours: BusinessHours) -> Self {
        Self::new(catalog.tracks().to_vec(), catalog.conference_date(), business_hours)
    }

    /// Validate the supplied slots, reporting the first violation
    pub fn validate(
        &self,
        session_type: Option<&str>,
        session_date: Option<&str>,
        session_time: Option<&str>,
    ) -> ValidationResult {
        if let Some(session_type) = session_type {
            let wanted = session_type.to_lowercase();
            if !self.tracks.iter().any(|t| t.to_lowercase() == wanted) {
                debug!(session_type, tracks = ?self.tracks, "Unknown track");
                return ValidationResult::invalid(
                    SlotName::SessionType,
                    format!(
                        "We cannot find a track named {}. The available tracks are {}",
                        session_type,
                        human_list(&self.tracks)
                    ),
                );
            }
        }

        if let Some(session_date) = session_date {
            debug!(session_date, "Validating date");
            match parse_date(session_date) {
                None => {
                    return ValidationResult::invalid(
                        SlotName::SessionDate,
                        format!(
                            "I did not understand that, what date would you like to check? e.g. {}",
                            self.conference_date
                        ),
                    );
                }
                Some(date) if date != self.conference_date => {
                    return ValidationResult::invalid(
                        SlotName::SessionDate,
                        format!(
                            "Sorry, we only have one day agenda for this demo. Please input the conference day {}.",
                            self.conference_date
                        ),
                    );
                }
                Some(_) => {}
            }
        }

        if let Some(session_time) = session_time {
            debug!(session_time, "Validating time");
            // Malformed times use the prompt defined on the bot model
            let Some((hour, _minute)) = parse_time(session_time) else {
                return ValidationResult::invalid_default(SlotName::SessionTime);
            };
            if !self.business_hours.contains(hour) {
                return ValidationResult::invalid(
                    SlotName::SessionTime,
                    self.business_hours.message.clone(),
                );
            }
        }

        ValidationResult::Valid
    }
}

/// Parse a calendar date from the common ways users and hosts write one
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Some(datetime.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|datetime| datetime.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        })
}

/// Split an `HH:MM` time into hour and minute
///
/// The input must be exactly five characters with a single colon and integer
/// halves. Minutes are not range-checked.
pub fn parse_time(input: &str) -> Option<(i32, i32)> {
    if input.chars().count() != 5 {
        return None;
    }
    let (hour, minute) = input.split_once(':')?;
    if minute.contains(':') {
        return None;
    }
    Some((hour.parse().ok()?, minute.parse().ok()?))
}

/// "A", "A and B", "A, B and C"
fn human_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
