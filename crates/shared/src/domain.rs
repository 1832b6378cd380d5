use serde::{Deserialize, Serialize};

pub const NO_SUBJECT: &str = "No Subject";
pub const UNKNOWN_SENDER: &str = "Unknown";
pub const NO_PREVIEW: &str = "No preview available";

/// An unread mailbox entry as returned by the listing endpoint.
///
/// Every field may be absent on the wire; display defaults are applied at
/// render time, never written back into the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, rename = "from")]
    pub sender: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl Message {
    pub fn subject_or_default(&self) -> &str {
        self.subject.as_deref().unwrap_or(NO_SUBJECT)
    }

    pub fn sender_or_default(&self) -> &str {
        self.sender.as_deref().unwrap_or(UNKNOWN_SENDER)
    }

    pub fn snippet_or_default(&self) -> &str {
        self.snippet.as_deref().unwrap_or(NO_PREVIEW)
    }

    /// Display key only. The positional fallback is not a stable identity.
    pub fn display_key(&self, index: usize) -> String {
        self.id.clone().unwrap_or_else(|| index.to_string())
    }
}

/// A mailbox entry annotated by the extraction backend with whether it
/// carries a schedulable event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingMessage {
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, rename = "from")]
    pub sender: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub has_scheduling: bool,
    #[serde(default)]
    pub scheduling_data: Option<EventDraft>,
}

impl SchedulingMessage {
    pub fn subject_or_default(&self) -> &str {
        self.subject.as_deref().unwrap_or(NO_SUBJECT)
    }

    pub fn sender_or_default(&self) -> &str {
        self.sender.as_deref().unwrap_or(UNKNOWN_SENDER)
    }

    pub fn snippet_or_default(&self) -> &str {
        self.snippet.as_deref().unwrap_or(NO_PREVIEW)
    }

    pub fn display_key(&self, index: usize) -> String {
        self.email_id.clone().unwrap_or_else(|| index.to_string())
    }
}

/// Structured event data extracted from a message body.
///
/// Forwarded verbatim to the schedule-event endpoint; the client never
/// validates or transforms these fields. Absent optional fields are skipped
/// on serialization so the submitted payload keeps its original shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,
}
