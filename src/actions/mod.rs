//! Dialog actions returned to the host runtime
//!
//! Every turn produces exactly one [`DialogResponse`]: the session attributes to
//! carry forward plus the [`DialogAction`] the host should perform next.

use serde::Serialize;
use tracing::debug;

use crate::commands::SessionAttributes;
use crate::value_objects::{FulfillmentState, Message, ResponseCard, SlotName, SlotSet};

/// The next step of the conversation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum DialogAction {
    /// Ask the user for one slot
    ElicitSlot {
        intent_name: String,
        slots: SlotSet,
        slot_to_elicit: SlotName,
        message: Option<Message>,
        response_card: Option<ResponseCard>,
    },
    /// Ask the user to confirm the filled intent
    ConfirmIntent {
        intent_name: String,
        slots: SlotSet,
        message: Option<Message>,
        response_card: Option<ResponseCard>,
    },
    /// Let the host pick the next slot using its own prompts
    Delegate { slots: SlotSet },
    /// End the conversation
    Close {
        fulfillment_state: FulfillmentState,
        message: Option<Message>,
        response_card: Option<ResponseCard>,
    },
}

impl DialogAction {
    /// Wire name of the action type
    pub fn kind(&self) -> &'static str {
        match self {
            DialogAction::ElicitSlot { .. } => "ElicitSlot",
            DialogAction::ConfirmIntent { .. } => "ConfirmIntent",
            DialogAction::Delegate { .. } => "Delegate",
            DialogAction::Close { .. } => "Close",
        }
    }

    pub fn message(&self) -> Option<&Message> {
        match self {
            DialogAction::ElicitSlot { message, .. }
            | DialogAction::ConfirmIntent { message, .. }
            | DialogAction::Close { message, .. } => message.as_ref(),
            DialogAction::Delegate { .. } => None,
        }
    }

    pub fn response_card(&self) -> Option<&ResponseCard> {
        match self {
            DialogAction::ElicitSlot { response_card, .. }
            | DialogAction::ConfirmIntent { response_card, .. }
            | DialogAction::Close { response_card, .. } => response_card.as_ref(),
            DialogAction::Delegate { .. } => None,
        }
    }

    /// Slots sent back to the host, absent for `Close`
    pub fn slots(&self) -> Option<&SlotSet> {
        match self {
            DialogAction::ElicitSlot { slots, .. }
            | DialogAction::ConfirmIntent { slots, .. }
            | DialogAction::Delegate { slots } => Some(slots),
            DialogAction::Close { .. } => None,
        }
    }
}

/// Response to one turn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogResponse {
    pub session_attributes: SessionAttributes,
    pub dialog_action: DialogAction,
}

impl DialogResponse {
    pub fn elicit_slot(
        session_attributes: SessionAttributes,
        intent_name: impl Into<String>,
        slots: SlotSet,
        slot_to_elicit: SlotName,
        message: Option<Message>,
        response_card: Option<ResponseCard>,
    ) -> Self {
        debug!(%slot_to_elicit, "elicit_slot");
        Self {
            session_attributes,
            dialog_action: DialogAction::ElicitSlot {
                intent_name: intent_name.into(),
                slots,
                slot_to_elicit,
                message,
                response_card,
            },
        }
    }

    pub fn confirm_intent(
        session_attributes: SessionAttributes,
        intent_name: impl Into<String>,
        slots: SlotSet,
        message: Option<Message>,
        response_card: Option<ResponseCard>,
    ) -> Self {
        debug!("confirm_intent");
        Self {
            session_attributes,
            dialog_action: DialogAction::ConfirmIntent {
                intent_name: intent_name.into(),
                slots,
                message,
                response_card,
            },
        }
    }

    pub fn delegate(session_attributes: SessionAttributes, slots: SlotSet) -> Self {
        debug!("delegate");
        Self {
            session_attributes,
            dialog_action: DialogAction::Delegate { slots },
        }
    }

    pub fn close(
        session_attributes: SessionAttributes,
        fulfillment_state: FulfillmentState,
        message: Option<Message>,
        response_card: Option<ResponseCard>,
    ) -> Self {
        debug!(?fulfillment_state, "close");
        Self {
            session_attributes,
            dialog_action: DialogAction::Close {
                fulfillment_state,
                message,
                response_card,
            },
        }
    }
}
