//! Agenda data sources
//!
//! A source supplies the three pieces of conference data the dialog reads:
//! the agenda, the offered tracks and the conference day.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::OnceCell;
use tracing::debug;

use super::Agenda;
use crate::error::{BookingError, BookingResult};
use crate::value_objects::SessionRecord;

const CONFERENCE_2017: &str = include_str!("../../data/conference_2017.json");

/// Provider of read-only conference data
#[async_trait]
pub trait AgendaSource: Send + Sync {
    /// The full, validated agenda
    async fn fetch_agenda(&self) -> BookingResult<Agenda>;

    /// Display names of the offered tracks
    async fn fetch_tracks(&self) -> BookingResult<Vec<String>>;

    /// The single supported conference day
    async fn fetch_conference_date(&self) -> BookingResult<NaiveDate>;
}

/// Serialized form of a conference agenda
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaDocument {
    pub tracks: Vec<String>,
    pub conference_date: String,
    pub sessions: Vec<SessionRecord>,
}

impl AgendaDocument {
    pub fn from_json(json: &str) -> BookingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn agenda(&self) -> BookingResult<Agenda> {
        Agenda::new(self.sessions.clone())
    }

    fn conference_date(&self) -> BookingResult<NaiveDate> {
        NaiveDate::parse_from_str(&self.conference_date, "%Y-%m-%d")
            .map_err(|_| BookingError::InvalidConferenceDate(self.conference_date.clone()))
    }
}

/// Source backed by an in-memory document
#[derive(Debug, Clone)]
pub struct StaticAgendaSource {
    document: AgendaDocument,
}

impl StaticAgendaSource {
    pub fn new(document: AgendaDocument) -> Self {
        Self { document }
    }

    pub fn from_json(json: &str) -> BookingResult<Self> {
        Ok(Self::new(AgendaDocument::from_json(json)?))
    }

    /// The bundled agenda of the 8 November 2017 conference
    pub fn conference_2017() -> BookingResult<Self> {
        Self::from_json(CONFERENCE_2017)
    }
}

#[async_trait]
impl AgendaSource for StaticAgendaSource {
    async fn fetch_agenda(&self) -> BookingResult<Agenda> {
        self.document.agenda()
    }

    async fn fetch_tracks(&self) -> BookingResult<Vec<String>> {
        Ok(self.document.tracks.clone())
    }

    async fn fetch_conference_date(&self) -> BookingResult<NaiveDate> {
        self.document.conference_date()
    }
}

/// Source backed by a JSON agenda document on disk
///
/// The file is read once, on the first fetch; later fetches answer from that
/// same document.
#[derive(Debug)]
pub struct JsonFileAgendaSource {
    path: PathBuf,
    document: OnceCell<AgendaDocument>,
}

impl JsonFileAgendaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: OnceCell::new(),
        }
    }

    async fn document(&self) -> BookingResult<&AgendaDocument> {
        self.document
            .get_or_try_init(|| async {
                debug!(path = %self.path.display(), "Reading agenda document");
                let json = tokio::fs::read_to_string(&self.path).await?;
                AgendaDocument::from_json(&json)
            })
            .await
    }
}

#[async_trait]
impl AgendaSource for JsonFileAgendaSource {
    async fn fetch_agenda(&self) -> BookingResult<Agenda> {
        self.document().await?.agenda()
    }

    async fn fetch_tracks(&self) -> BookingResult<Vec<String>> {
        Ok(self.document().await?.tracks.clone())
    }

    async fn fetch_conference_date(&self) -> BookingResult<NaiveDate> {
        self.document().await?.conference_date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_agenda_is_valid() {
        let source = StaticAgendaSource::conference_2017().unwrap();

        let agenda = tokio_test::block_on(source.fetch_agenda()).unwrap();
        assert_eq!(agenda.len(), 27);

        let tracks = tokio_test::block_on(source.fetch_tracks()).unwrap();
        assert_eq!(tracks, vec!["Inspire Me", "Tech Specific", "Seminar"]);

        let date = tokio_test::block_on(source.fetch_conference_date()).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2017, 11, 8).unwrap());
    }

    #[test]
    fn test_bad_conference_date_is_rejected() {
        let source = StaticAgendaSource::from_json(
            r#"{"tracks": ["Seminar"], "conferenceDate": "8th of November", "sessions": []}"#,
        )
        .unwrap();

        let result = tokio_test::block_on(source.fetch_conference_date());
        assert!(matches!(result, Err(BookingError::InvalidConferenceDate(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = JsonFileAgendaSource::new("/nonexistent/agenda.json");
        let result = source.fetch_tracks().await;
        assert!(matches!(result, Err(BookingError::Io(_))));
    }

    #[tokio::test]
    async fn test_file_is_read_once() {
        let path = std::env::temp_dir().join(format!("agenda-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(
            &path,
            r#"{"tracks": ["Seminar"], "conferenceDate": "2017-11-08", "sessions": []}"#,
        )
        .await
        .unwrap();

        let source = JsonFileAgendaSource::new(&path);
        assert_eq!(source.fetch_tracks().await.unwrap(), vec!["Seminar"]);

        tokio::fs::write(
            &path,
            r#"{"tracks": ["Keynote"], "conferenceDate": "2018-01-01", "sessions": []}"#,
        )
        .await
        .unwrap();

        assert_eq!(source.fetch_tracks().await.unwrap(), vec!["Seminar"]);
        assert_eq!(
            source.fetch_conference_date().await.unwrap(),
            NaiveDate::from_ymd_opt(2017, 11, 8).unwrap()
        );

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
