//! Dialog management and fulfillment for booking a conference session
//!
//! Each turn is decided from the request alone, first match wins:
//! 1. fulfillment turn: close the dialog as fulfilled
//! 2. invalid slot: clear it and elicit it again
//! 3. date and time known, track unknown: list what runs next and elicit the track
//! 4. everything known, not yet confirmed: ask for confirmation
//! 5. otherwise: delegate to the host's own slot filling

use std::sync::Arc;
use tracing::{debug, info};

use super::IntentHandler;
use crate::actions::DialogResponse;
use crate::agenda::{AgendaCatalog, build_options, find_session};
use crate::commands::IntentRequest;
use crate::config::BookingConfig;
use crate::error::BookingResult;
use crate::validation::SlotValidator;
use crate::value_objects::{
    Button, ConfirmationStatus, FulfillmentState, Message, ResponseCard, SlotName,
    ValidationResult,
};

const TRACK_QUESTION: &str = "What track would you like to attend?";
const BOOKED_MESSAGE: &str = "Thank you. We have booked the session for you.";

/// Turn controller for the session booking intent
#[derive(Debug, Clone)]
pub struct SessionBookingHandler {
    intent_name: String,
    catalog: Arc<AgendaCatalog>,
    validator: SlotValidator,
}

impl SessionBookingHandler {
    /// Create a handler over a loaded catalog
    pub fn new(catalog: Arc<AgendaCatalog>, config: &BookingConfig) -> Self {
        let validator = SlotValidator::for_catalog(&catalog, config.business_hours.clone());
        Self {
            intent_name: config.intent_name.clone(),
            catalog,
            validator,
        }
    }

    /// Decide the next dialog action for one turn
    pub fn handle_turn(&self, request: IntentRequest) -> DialogResponse {
        let IntentRequest {
            current_intent,
            session_attributes,
            invocation_source,
            ..
        } = request;
        let intent_name = current_intent.name;
        let mut slots = current_intent.slots;

        debug!(
            session_date = ?slots.session_date,
            session_time = ?slots.session_time,
            session_type = ?slots.session_type,
            "book_session"
        );

        if !invocation_source.is_dialog_code_hook() {
            info!("Session booked");
            return DialogResponse::close(
                session_attributes,
                FulfillmentState::Fulfilled,
                Some(Message::plain_text(BOOKED_MESSAGE)),
                Some(rating_card()),
            );
        }

        let verdict = self.validator.validate(
            slots.session_type.as_deref(),
            slots.session_date.as_deref(),
            slots.session_time.as_deref(),
        );
        if let ValidationResult::Invalid { slot, reprompt } = verdict {
            slots.clear(slot);
            return DialogResponse::elicit_slot(
                session_attributes,
                intent_name,
                slots,
                slot,
                reprompt.to_message(),
                None,
            );
        }

        // A valid date is the conference day, whatever spelling the user chose;
        // agenda lookups compare against its YYYY-MM-DD form.
        let date = slots
            .session_date
            .as_ref()
            .map(|_| self.catalog.conference_date().to_string());
        let agenda = self.catalog.agenda();
        match (
            slots.session_type.clone(),
            date,
            slots.session_time.clone(),
        ) {
            (None, Some(date), Some(time)) => {
                let types = self.catalog.allowed_types();
                let digest = self.digest(&date, &time, &types);
                let card = ResponseCard::new(
                    "Specify Track",
                    TRACK_QUESTION,
                    build_options(&date, &time, agenda, &types),
                );

                DialogResponse::elicit_slot(
                    session_attributes,
                    intent_name,
                    slots,
                    SlotName::SessionType,
                    Some(Message::plain_text(digest)),
                    Some(card),
                )
            }
            (Some(session_type), Some(date), Some(time))
                if current_intent.confirmation_status == ConfirmationStatus::None =>
            {
                match find_session(Some(session_type.as_str()), &date, &time, agenda) {
                    Some(session) => DialogResponse::confirm_intent(
                        session_attributes,
                        intent_name,
                        slots,
                        Some(Message::plain_text(format!(
                            "Session {} in the {} track at {} on {}",
                            session.name(),
                            session.track(),
                            session.start(),
                            session.date()
                        ))),
                        Some(confirmation_card()),
                    ),
                    None => {
                        debug!(%session_type, %date, %time, "No session left to confirm");
                        slots.clear(SlotName::SessionTime);
                        DialogResponse::elicit_slot(
                            session_attributes,
                            intent_name,
                            slots,
                            SlotName::SessionTime,
                            Some(Message::plain_text(format!(
                                "There is no {session_type} session after {time} on {date}. What time would you like to attend?"
                            ))),
                            None,
                        )
                    }
                }
            }
            _ => DialogResponse::delegate(session_attributes, slots),
        }
    }

    /// What each track has coming up after `time` on `date`
    fn digest(&self, date: &str, time: &str, types: &[String]) -> String {
        let mut content = String::from("Sessions found: \n");
        for session_type in types {
            let line = match find_session(Some(session_type.as_str()), date, time, self.catalog.agenda()) {
                Some(s) => format!(
                    "-{} track: {} from {} to {}\n",
                    s.track(),
                    s.name(),
                    s.start(),
                    s.end()
                ),
                None => format!("-{session_type} track: None\n"),
            };
            content.push_str(&line);
        }
        content.push('\n');
        content.push_str(TRACK_QUESTION);
        content
    }
}

impl IntentHandler for SessionBookingHandler {
    fn intent_name(&self) -> &str {
        &self.intent_name
    }

    fn handle(&self, request: IntentRequest) -> BookingResult<DialogResponse> {
        Ok(self.handle_turn(request))
    }
}

fn confirmation_card() -> ResponseCard {
    ResponseCard::new(
        "Confirm attendance",
        "Do you want to book the session?",
        vec![Button::new("yes", "yes"), Button::new("no", "no")],
    )
}

fn rating_card() -> ResponseCard {
    ResponseCard::new(
        "Rate the session",
        "What do you think about this session?",
        vec![
            Button::new("Great!", "1"),
            Button::new("Fine.", "0"),
            Button::new("Boring :(", "-1"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::DialogAction;
    use crate::agenda::StaticAgendaSource;
    use crate::value_objects::SlotSet;

    fn handler() -> SessionBookingHandler {
        let source = StaticAgendaSource::conference_2017().unwrap();
        let catalog = tokio_test::block_on(AgendaCatalog::load(&source)).unwrap();
        SessionBookingHandler::new(Arc::new(catalog), &BookingConfig::default())
    }

    fn turn(session_type: Option<&str>, date: Option<&str>, time: Option<&str>) -> IntentRequest {
        IntentRequest::dialog_turn(
            "CheckConferenceAgenda",
            SlotSet::new(session_type, date, time),
        )
    }

    #[test]
    fn test_digest_lists_every_track() {
        let handler = handler();
        let types = vec![
            "inspire me".to_string(),
            "tech specific".to_string(),
            "seminar".to_string(),
        ];
        let digest = handler.digest("2017-11-08", "16:45", &types);

        assert_eq!(
            digest,
            "Sessions found: \n\
             -Inspire Me track: The Path for Women to Rule the Technology World from 17:00 to 17:30\n\
             -Tech Specific track: Optimizing Scrolling Performance of UITableView&UICollectionView from 17:00 to 17:30\n\
             -Seminar track: How to Build a Team; Diversity & Gender Inclusivity from 17:00 to 17:30\n\
             \nWhat track would you like to attend?"
        );
    }

    #[test]
    fn test_digest_marks_missing_tracks() {
        let handler = handler();
        let types = vec!["tech specific".to_string(), "seminar".to_string()];
        let digest = handler.digest("2017-11-08", "17:00", &types);

        assert!(digest.contains("-tech specific track: None\n"));
        assert!(digest.contains("-seminar track: None\n"));
    }

    #[test]
    fn test_invalid_track_is_cleared_and_elicited() {
        let response = handler().handle_turn(turn(Some("keynote"), Some("2017-11-08"), None));

        match response.dialog_action {
            DialogAction::ElicitSlot {
                slots,
                slot_to_elicit,
                message,
                response_card,
                ..
            } => {
                assert_eq!(slot_to_elicit, SlotName::SessionType);
                assert_eq!(slots.session_type, None);
                assert_eq!(slots.session_date.as_deref(), Some("2017-11-08"));
                assert!(message.unwrap().content.starts_with("We cannot find a track named keynote"));
                assert!(response_card.is_none());
            }
            other => panic!("expected ElicitSlot, got {other:?}"),
        }
    }

    #[test]
    fn test_no_session_to_confirm_elicits_time() {
        let response = handler().handle_turn(turn(Some("seminar"), Some("2017-11-08"), Some("17:30")));

        match response.dialog_action {
            DialogAction::ElicitSlot {
                slots,
                slot_to_elicit,
                message,
                ..
            } => {
                assert_eq!(slot_to_elicit, SlotName::SessionTime);
                assert_eq!(slots.session_time, None);
                assert_eq!(slots.session_type.as_deref(), Some("seminar"));
                assert_eq!(
                    message.unwrap().content,
                    "There is no seminar session after 17:30 on 2017-11-08. What time would you like to attend?"
                );
            }
            other => panic!("expected ElicitSlot, got {other:?}"),
        }
    }

    #[test]
    fn test_spelled_out_date_lists_tracks() {
        let response = handler().handle_turn(turn(None, Some("November 8, 2017"), Some("10:15")));

        match response.dialog_action {
            DialogAction::ElicitSlot {
                slots,
                slot_to_elicit,
                message,
                response_card,
                ..
            } => {
                assert_eq!(slot_to_elicit, SlotName::SessionType);
                assert_eq!(slots.session_date.as_deref(), Some("November 8, 2017"));
                let content = message.unwrap().content;
                assert!(content.contains("-Seminar track: Augmented Reality: Past, Present & Future from 12:30 to 13:00\n"));
                assert!(!content.contains("track: None"));
                assert_eq!(response_card.unwrap().buttons().len(), 3);
            }
            other => panic!("expected ElicitSlot, got {other:?}"),
        }
    }

    #[test]
    fn test_us_date_reaches_confirmation() {
        let response = handler().handle_turn(turn(Some("seminar"), Some("11/08/2017"), Some("10:15")));

        match response.dialog_action {
            DialogAction::ConfirmIntent { slots, message, .. } => {
                assert_eq!(
                    message.unwrap().content,
                    "Session Augmented Reality: Past, Present & Future in the Seminar track at 12:30 on 2017-11-08"
                );
                assert_eq!(slots.session_time.as_deref(), Some("10:15"));
            }
            other => panic!("expected ConfirmIntent, got {other:?}"),
        }
    }

    #[test]
    fn test_confirmed_intent_delegates() {
        let request = turn(Some("seminar"), Some("2017-11-08"), Some("12:00"))
            .with_confirmation(ConfirmationStatus::Confirmed);
        let response = handler().handle_turn(request);

        assert_eq!(response.dialog_action.kind(), "Delegate");
    }

    #[test]
    fn test_type_only_delegates() {
        let response = handler().handle_turn(turn(Some("Seminar"), None, None));
        assert_eq!(response.dialog_action.kind(), "Delegate");
    }
}
