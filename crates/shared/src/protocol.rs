use serde::{Deserialize, Serialize};

use crate::domain::{EventDraft, Message, SchedulingMessage};

/// `GET /health` response. The probe only inspects the mailbox integration
/// flag; `status` is informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub mailbox_connected: bool,
}

/// `GET /fetch-emails` response. `count` is backend-reported and is the
/// number surfaced to the user, not recomputed from `emails`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchEmailsResponse {
    pub count: usize,
    pub emails: Vec<Message>,
}

/// `GET /scheduling-emails` response. Both counters are backend-reported;
/// the backend is the source of truth for how many messages it examined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingEmailsResponse {
    pub scheduling_count: usize,
    #[serde(default)]
    pub total_checked: usize,
    pub scheduling_emails: Vec<SchedulingMessage>,
}

/// `POST /schedule-event` request body. The draft is passed through as an
/// opaque payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEventRequest {
    pub scheduling_data: EventDraft,
}

/// `POST /schedule-event` response. A 2xx response may still report a
/// business-level failure via `success: false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEventResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
