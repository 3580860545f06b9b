//! Session lookup and choice building

use tracing::debug;

use super::Agenda;
use crate::value_objects::{Button, Session};

/// Find the next session of a track on a date starting strictly after `time`
///
/// Returns `None` when no track is given: the lookup needs one. Track names
/// match case-insensitively, dates exactly. Start times compare as `HH:MM`
/// strings; the agenda's per-track ordering makes the first hit the
/// chronologically next session.
pub fn find_session<'a>(
    session_type: Option<&str>,
    session_date: &str,
    session_time: &str,
    agenda: &'a Agenda,
) -> Option<&'a Session> {
    let session_type = session_type?.to_lowercase();

    agenda.sessions().iter().find(|s| {
        s.track().to_lowercase() == session_type
            && s.date() == session_date
            && s.start() > session_time
    })
}

/// One button per track that has a session after `time` on `date`
///
/// Buttons read `"<track> at <start>"` and carry the track key as given.
/// Tracks without a match are left out.
pub fn build_options<S: AsRef<str>>(
    session_date: &str,
    session_time: &str,
    agenda: &Agenda,
    types: &[S],
) -> Vec<Button> {
    types
        .iter()
        .filter_map(|session_type| {
            let session_type = session_type.as_ref();
            let session = find_session(Some(session_type), session_date, session_time, agenda)?;
            debug!(session_name = session.name(), "Option built");
            Some(Button::new(
                format!("{} at {}", session.track(), session.start()),
                session_type,
            ))
        })
        .collect()
}
