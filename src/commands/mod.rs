//! Inbound turn requests delivered by the host runtime

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::value_objects::{ConfirmationStatus, InvocationSource, SlotSet};

/// Opaque attributes the host carries between turns
pub type SessionAttributes = HashMap<String, String>;

/// One turn of a conversation as delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    pub current_intent: CurrentIntent,
    /// `null` on the wire reads as an empty bag
    #[serde(default, deserialize_with = "null_as_empty")]
    pub session_attributes: SessionAttributes,
    pub invocation_source: InvocationSource,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<BotInfo>,
}

impl IntentRequest {
    /// Build a mid-conversation validation turn
    pub fn dialog_turn(intent_name: impl Into<String>, slots: SlotSet) -> Self {
        Self {
            current_intent: CurrentIntent {
                name: intent_name.into(),
                slots,
                confirmation_status: ConfirmationStatus::None,
            },
            session_attributes: SessionAttributes::new(),
            invocation_source: InvocationSource::DialogCodeHook,
            user_id: String::new(),
            bot: None,
        }
    }

    /// Build the fulfillment turn
    pub fn fulfillment_turn(intent_name: impl Into<String>, slots: SlotSet) -> Self {
        Self {
            invocation_source: InvocationSource::FulfillmentCodeHook,
            ..Self::dialog_turn(intent_name, slots)
        }
    }

    pub fn with_confirmation(mut self, status: ConfirmationStatus) -> Self {
        self.current_intent.confirmation_status = status;
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_session_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.session_attributes.insert(key.into(), value.into());
        self
    }

    pub fn intent_name(&self) -> &str {
        &self.current_intent.name
    }
}

/// The intent the host believes the user is pursuing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentIntent {
    pub name: String,
    #[serde(default)]
    pub slots: SlotSet,
    #[serde(default)]
    pub confirmation_status: ConfirmationStatus,
}

/// The bot the request was addressed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotInfo {
    pub name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<SessionAttributes, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<SessionAttributes>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_request() {
        let request: IntentRequest = serde_json::from_str(
            r#"{
                "currentIntent": {
                    "name": "CheckConferenceAgenda",
                    "slots": {"SessionType": null, "SessionDate": "2017-11-08", "SessionTime": "10:15"},
                    "confirmationStatus": "None"
                },
                "bot": {"name": "ConferenceAgenda", "alias": "$LATEST", "version": "$LATEST"},
                "userId": "user-1",
                "inputTranscript": "10:15",
                "invocationSource": "DialogCodeHook",
                "sessionAttributes": null
            }"#,
        )
        .unwrap();

        assert_eq!(request.intent_name(), "CheckConferenceAgenda");
        assert!(request.invocation_source.is_dialog_code_hook());
        assert!(request.session_attributes.is_empty());
        assert_eq!(request.current_intent.slots.session_time.as_deref(), Some("10:15"));
        assert_eq!(request.bot.unwrap().name, "ConferenceAgenda");
    }

    #[test]
    fn test_missing_confirmation_status_defaults_to_none() {
        let request: IntentRequest = serde_json::from_str(
            r#"{"currentIntent": {"name": "CheckConferenceAgenda", "slots": {}},
                "invocationSource": "FulfillmentCodeHook",
                "sessionAttributes": {"lastTrack": "seminar"}}"#,
        )
        .unwrap();

        assert_eq!(request.current_intent.confirmation_status, ConfirmationStatus::None);
        assert_eq!(request.session_attributes["lastTrack"], "seminar");
        assert_eq!(request.user_id, "");
    }

    #[test]
    fn test_fulfillment_turn_builder() {
        let request = IntentRequest::fulfillment_turn("CheckConferenceAgenda", SlotSet::default())
            .with_user("user-2");

        assert_eq!(request.invocation_source, InvocationSource::FulfillmentCodeHook);
        assert_eq!(request.user_id, "user-2");
    }
}
