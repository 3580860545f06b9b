//! Error types for the session booking domain
//!
//! User-input problems are not errors here: they come back from the validator as
//! [`ValidationResult`](crate::value_objects::ValidationResult) values and turn into
//! re-elicitation. `BookingError` covers the failures a turn cannot recover from.

/// Result alias used across the crate
pub type BookingResult<T> = Result<T, BookingError>;

/// Unrecoverable failures in the booking domain
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// No handler is registered for the requested intent
    #[error("Intent with name {0} not supported")]
    UnsupportedIntent(String),

    /// An agenda entry failed load-time validation
    #[error("Invalid agenda session at index {index}: {reason}")]
    InvalidSession { index: usize, reason: String },

    /// Sessions of one track and date are not ascending by start time
    #[error("Agenda out of order for track {track} on {date}: {start} follows {previous}")]
    AgendaOutOfOrder {
        track: String,
        date: String,
        start: String,
        previous: String,
    },

    /// The data provider supplied a conference date that does not parse
    #[error("Invalid conference date: {0}")]
    InvalidConferenceDate(String),

    /// The data provider supplied no tracks
    #[error("Agenda source returned an empty track list")]
    EmptyTrackList,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
