//! Value objects for the session booking domain

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of buttons a response card can carry
pub const MAX_CARD_BUTTONS: usize = 5;

/// Content type of generic response cards on the wire
pub const GENERIC_CARD_CONTENT_TYPE: &str = "application/vnd.amazonaws.card.generic";

/// The slots of the session booking intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotName {
    /// The conference track
    SessionType,
    /// The conference day
    SessionDate,
    /// Earliest start time the user is interested in
    SessionTime,
}

impl SlotName {
    /// Wire name of the slot
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotName::SessionType => "SessionType",
            SlotName::SessionDate => "SessionDate",
            SlotName::SessionTime => "SessionTime",
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current values of the intent's slots. `None` means not yet supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SlotSet {
    #[serde(default)]
    pub session_type: Option<String>,
    #[serde(default)]
    pub session_date: Option<String>,
    #[serde(default)]
    pub session_time: Option<String>,
}

impl SlotSet {
    /// Create a slot set from the three optional values
    pub fn new(
        session_type: Option<&str>,
        session_date: Option<&str>,
        session_time: Option<&str>,
    ) -> Self {
        Self {
            session_type: session_type.map(str::to_string),
            session_date: session_date.map(str::to_string),
            session_time: session_time.map(str::to_string),
        }
    }

    /// Value of a slot, if supplied
    pub fn get(&self, slot: SlotName) -> Option<&str> {
        match slot {
            SlotName::SessionType => self.session_type.as_deref(),
            SlotName::SessionDate => self.session_date.as_deref(),
            SlotName::SessionTime => self.session_time.as_deref(),
        }
    }

    /// Forget the value of a slot so the host asks for it again
    pub fn clear(&mut self, slot: SlotName) {
        match slot {
            SlotName::SessionType => self.session_type = None,
            SlotName::SessionDate => self.session_date = None,
            SlotName::SessionTime => self.session_time = None,
        }
    }
}

/// A session entry as it appears in agenda documents, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub name: String,
    pub track: String,
    pub date: String,
    pub start: String,
    pub end: String,
}

/// A validated, immutable agenda session
///
/// `date` is `YYYY-MM-DD`; `start` and `end` are zero-padded 24-hour `HH:MM`, so
/// plain string comparison orders them chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    name: String,
    track: String,
    date: String,
    start: String,
    end: String,
}

impl Session {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn track(&self) -> &str {
        &self.track
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }
}

impl TryFrom<SessionRecord> for Session {
    type Error = String;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        if record.name.trim().is_empty() {
            return Err("session name is empty".to_string());
        }
        if record.track.trim().is_empty() {
            return Err(format!("session '{}' has no track", record.name));
        }
        if record.date.len() != 10 || NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").is_err() {
            return Err(format!(
                "session '{}' has date '{}', expected YYYY-MM-DD",
                record.name, record.date
            ));
        }
        for time in [&record.start, &record.end] {
            if time.len() != 5 || NaiveTime::parse_from_str(time, "%H:%M").is_err() {
                return Err(format!(
                    "session '{}' has time '{}', expected HH:MM",
                    record.name, time
                ));
            }
        }
        if record.end <= record.start {
            return Err(format!(
                "session '{}' ends at {} before it starts at {}",
                record.name, record.end, record.start
            ));
        }

        Ok(Self {
            name: record.name,
            track: record.track,
            date: record.date,
            start: record.start,
            end: record.end,
        })
    }
}

/// Content type of a dialog message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    PlainText,
}

/// A displayable message sent back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content_type: ContentType,
    pub content: String,
}

impl Message {
    /// Create a plain text message
    pub fn plain_text(content: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::PlainText,
            content: content.into(),
        }
    }
}

/// A choice button on a response card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub text: String,
    pub value: String,
}

impl Button {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }
}

/// A card of choice buttons shown alongside a prompt
///
/// Never holds more than [`MAX_CARD_BUTTONS`] buttons; extra options are dropped.
/// Serializes to the generic card envelope the host expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "GenericCard")]
pub struct ResponseCard {
    title: String,
    subtitle: String,
    buttons: Vec<Button>,
}

impl ResponseCard {
    /// Build a card, keeping at most the first five options
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        options: impl IntoIterator<Item = Button>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            buttons: options.into_iter().take(MAX_CARD_BUTTONS).collect(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenericCard {
    content_type: &'static str,
    version: u32,
    generic_attachments: Vec<GenericAttachment>,
}

#[derive(Serialize)]
struct GenericAttachment {
    title: String,
    #[serde(rename = "subTitle")]
    subtitle: String,
    buttons: Vec<Button>,
}

impl From<ResponseCard> for GenericCard {
    fn from(card: ResponseCard) -> Self {
        Self {
            content_type: GENERIC_CARD_CONTENT_TYPE,
            version: 1,
            generic_attachments: vec![GenericAttachment {
                title: card.title,
                subtitle: card.subtitle,
                buttons: card.buttons,
            }],
        }
    }
}

/// What the host should say when re-eliciting an invalid slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reprompt {
    /// Show this text
    Message(String),
    /// Use the prompt configured on the bot model for the slot
    UseDefault,
}

impl Reprompt {
    /// The wire message, `None` when the host default should be used
    pub fn to_message(&self) -> Option<Message> {
        match self {
            Reprompt::Message(text) => Some(Message::plain_text(text.clone())),
            Reprompt::UseDefault => None,
        }
    }
}

/// Verdict of validating the slots of one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid { slot: SlotName, reprompt: Reprompt },
}

impl ValidationResult {
    pub(crate) fn invalid(slot: SlotName, message: impl Into<String>) -> Self {
        ValidationResult::Invalid {
            slot,
            reprompt: Reprompt::Message(message.into()),
        }
    }

    pub(crate) fn invalid_default(slot: SlotName) -> Self {
        ValidationResult::Invalid {
            slot,
            reprompt: Reprompt::UseDefault,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The first slot that failed validation
    pub fn violated_slot(&self) -> Option<SlotName> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid { slot, .. } => Some(*slot),
        }
    }

    /// The reprompt text, if the validator supplied one
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationResult::Invalid {
                reprompt: Reprompt::Message(text),
                ..
            } => Some(text),
            _ => None,
        }
    }
}

/// Whether the user has confirmed the intent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfirmationStatus {
    #[default]
    None,
    Confirmed,
    Denied,
}

/// Why the host invoked the handler
///
/// Any source other than `DialogCodeHook` is treated as the fulfillment turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvocationSource {
    DialogCodeHook,
    FulfillmentCodeHook,
    Other(String),
}

impl InvocationSource {
    pub fn is_dialog_code_hook(&self) -> bool {
        matches!(self, InvocationSource::DialogCodeHook)
    }
}

impl From<String> for InvocationSource {
    fn from(source: String) -> Self {
        match source.as_str() {
            "DialogCodeHook" => InvocationSource::DialogCodeHook,
            "FulfillmentCodeHook" => InvocationSource::FulfillmentCodeHook,
            _ => InvocationSource::Other(source),
        }
    }
}

impl From<InvocationSource> for String {
    fn from(source: InvocationSource) -> Self {
        match source {
            InvocationSource::DialogCodeHook => "DialogCodeHook".to_string(),
            InvocationSource::FulfillmentCodeHook => "FulfillmentCodeHook".to_string(),
            InvocationSource::Other(other) => other,
        }
    }
}

/// Outcome reported when closing the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FulfillmentState {
    Fulfilled,
    Failed,
}
