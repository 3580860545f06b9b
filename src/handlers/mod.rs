//! Intent handlers and the dispatch boundary
//!
//! The [`IntentRouter`] maps intent names to handlers. A request for an intent
//! nobody registered fails the whole turn with
//! [`BookingError::UnsupportedIntent`]; the host is expected to show its own
//! generic failure.

pub mod book_session;

pub use book_session::SessionBookingHandler;

use std::collections::HashMap;
use tracing::{debug, debug_span};
use uuid::Uuid;

use crate::actions::DialogResponse;
use crate::commands::IntentRequest;
use crate::error::{BookingError, BookingResult};

/// Handles every turn of one intent
pub trait IntentHandler: Send + Sync {
    /// The intent name this handler answers to
    fn intent_name(&self) -> &str;

    /// Decide the next dialog action for a turn
    fn handle(&self, request: IntentRequest) -> BookingResult<DialogResponse>;
}

/// Routes turns to the handler registered for their intent
#[derive(Default)]
pub struct IntentRouter {
    handlers: HashMap<String, Box<dyn IntentHandler>>,
}

impl IntentRouter {
    /// Create a router with no handlers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its intent name, replacing any previous one
    pub fn register(&mut self, handler: impl IntentHandler + 'static) -> &mut Self {
        self.handlers
            .insert(handler.intent_name().to_string(), Box::new(handler));
        self
    }

    /// Intent names with a registered handler
    pub fn intents(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Dispatch a turn to its intent's handler
    pub fn dispatch(&self, request: IntentRequest) -> BookingResult<DialogResponse> {
        let turn_id = Uuid::new_v4();
        let span = debug_span!(
            "turn",
            %turn_id,
            user_id = %request.user_id,
            intent = %request.intent_name()
        );
        let _guard = span.enter();

        if let Some(bot) = &request.bot {
            debug!(bot = %bot.name, "Turn received");
        }
        debug!(
            user_id = %request.user_id,
            intent_name = %request.intent_name(),
            "dispatch"
        );

        let handler = self
            .handlers
            .get(request.intent_name())
            .ok_or_else(|| BookingError::UnsupportedIntent(request.intent_name().to_string()))?;

        handler.handle(request)
    }

    /// Dispatch a turn given and answered as JSON
    pub fn dispatch_json(&self, request: &str) -> BookingResult<String> {
        let request: IntentRequest = serde_json::from_str(request)?;
        let response = self.dispatch(request)?;
        Ok(serde_json::to_string(&response)?)
    }
}
