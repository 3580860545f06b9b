//! Conference agenda
//!
//! The agenda is read-only data acquired once per process from an
//! [`AgendaSource`] and shared between turns through an [`AgendaCatalog`].
//! Entries are validated when the agenda is built, so lookups never see a
//! malformed session:
//! - every session has a name, a track, a `YYYY-MM-DD` date and `HH:MM` times
//! - sessions of the same track and date are ascending by start time

pub mod matcher;
pub mod source;

pub use matcher::{build_options, find_session};
pub use source::{AgendaDocument, AgendaSource, JsonFileAgendaSource, StaticAgendaSource};

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::error::{BookingError, BookingResult};
use crate::value_objects::{Session, SessionRecord};

/// An ordered, validated sequence of sessions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Agenda {
    sessions: Vec<Session>,
}

impl Agenda {
    /// Validate the records and build an agenda, preserving their order
    pub fn new(records: Vec<SessionRecord>) -> BookingResult<Self> {
        let mut sessions = Vec::with_capacity(records.len());
        // (lower-cased track, date) -> last start seen
        let mut last_start: HashMap<(String, String), String> = HashMap::new();

        for (index, record) in records.into_iter().enumerate() {
            let session = Session::try_from(record)
                .map_err(|reason| BookingError::InvalidSession { index, reason })?;

            let key = (session.track().to_lowercase(), session.date().to_string());
            if let Some(previous) = last_start.get(&key) {
                if session.start() < previous.as_str() {
                    return Err(BookingError::AgendaOutOfOrder {
                        track: session.track().to_string(),
                        date: session.date().to_string(),
                        start: session.start().to_string(),
                        previous: previous.clone(),
                    });
                }
            }
            last_start.insert(key, session.start().to_string());
            sessions.push(session);
        }

        Ok(Self { sessions })
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Everything the dialog needs to know about the conference
#[derive(Debug, Clone)]
pub struct AgendaCatalog {
    agenda: Agenda,
    tracks: Vec<String>,
    conference_date: NaiveDate,
}

impl AgendaCatalog {
    /// Assemble a catalog from already-fetched parts
    pub fn new(
        agenda: Agenda,
        tracks: Vec<String>,
        conference_date: NaiveDate,
    ) -> BookingResult<Self> {
        let tracks: Vec<String> = tracks
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if tracks.is_empty() {
            return Err(BookingError::EmptyTrackList);
        }

        for session in agenda.sessions() {
            let known = tracks
                .iter()
                .any(|t| t.eq_ignore_ascii_case(session.track()));
            if !known {
                warn!(
                    session = session.name(),
                    track = session.track(),
                    "Agenda session belongs to a track that is not offered"
                );
            }
        }

        Ok(Self {
            agenda,
            tracks,
            conference_date,
        })
    }

    /// Fetch agenda, tracks and conference date from a data source
    pub async fn load(source: &dyn AgendaSource) -> BookingResult<Self> {
        let agenda = source.fetch_agenda().await?;
        let tracks = source.fetch_tracks().await?;
        let conference_date = source.fetch_conference_date().await?;

        info!(
            sessions = agenda.len(),
            tracks = tracks.len(),
            %conference_date,
            "Loaded conference agenda"
        );

        Self::new(agenda, tracks, conference_date)
    }

    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    /// Track names as they should be displayed
    pub fn tracks(&self) -> &[String] {
        &self.tracks
    }

    /// Lower-cased track names, used for matching user input
    pub fn allowed_types(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.to_lowercase()).collect()
    }

    /// The single day the agenda covers
    pub fn conference_date(&self) -> NaiveDate {
        self.conference_date
    }
}
