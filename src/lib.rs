//! Session booking dialog domain
//!
//! This domain runs the slot-filling dialog for booking a conference session.
//! Given one turn's partially filled slots it:
//! - validates the track, date and time the user supplied
//! - looks up the next session of a track after a given time
//! - offers the tracks with upcoming sessions as choice buttons
//! - decides whether to re-prompt, elicit a slot, confirm, delegate or close
//!
//! Turns are independent: the only state is the read-only
//! [`AgendaCatalog`] loaded once from an [`AgendaSource`] and the opaque
//! session attributes the host passes in and out.

pub mod actions;
pub mod agenda;
pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod validation;
pub mod value_objects;

// Re-export main types
pub use actions::{DialogAction, DialogResponse};

pub use agenda::{
    Agenda, AgendaCatalog, AgendaDocument, AgendaSource, JsonFileAgendaSource,
    StaticAgendaSource, build_options, find_session,
};

pub use commands::{BotInfo, CurrentIntent, IntentRequest, SessionAttributes};

pub use config::{BookingConfig, BusinessHours};

pub use error::{BookingError, BookingResult};

pub use handlers::{IntentHandler, IntentRouter, SessionBookingHandler};

pub use validation::SlotValidator;

pub use value_objects::{
    Button, ConfirmationStatus, ContentType, FulfillmentState, InvocationSource, Message,
    Reprompt, ResponseCard, Session, SessionRecord, SlotName, SlotSet, ValidationResult,
};
