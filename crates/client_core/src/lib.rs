use std::sync::Arc;

use shared::domain::{EventDraft, Message, SchedulingMessage};
use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

pub mod config;
pub mod transport;

pub use transport::{EmailSchedulerApi, HttpBackend, TransportError};

pub const BACKEND_UNAVAILABLE_BANNER: &str =
    "Backend API not available. Please ensure the backend is running.";
pub const MAILBOX_NOT_CONNECTED_BANNER: &str =
    "Mailbox service not connected. Please check your credentials.";
pub const EVENT_CREATED_BANNER: &str = "Event created successfully in your calendar!";

pub const FETCH_EMAILS_FALLBACK: &str = "Failed to fetch emails";
pub const FETCH_SCHEDULING_EMAILS_FALLBACK: &str = "Failed to fetch scheduling emails";
pub const SCHEDULE_EVENT_FALLBACK: &str = "Failed to schedule event";

/// The message currently inspected in the detail view. Either collection may
/// feed the selection; the reference is a copy of immutable fetched data, not
/// a live pointer into a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedEmail {
    Unread(Message),
    Scheduling(SchedulingMessage),
}

impl SelectedEmail {
    pub fn subject(&self) -> &str {
        match self {
            SelectedEmail::Unread(message) => message.subject_or_default(),
            SelectedEmail::Scheduling(message) => message.subject_or_default(),
        }
    }

    pub fn sender(&self) -> &str {
        match self {
            SelectedEmail::Unread(message) => message.sender_or_default(),
            SelectedEmail::Scheduling(message) => message.sender_or_default(),
        }
    }

    pub fn snippet(&self) -> &str {
        match self {
            SelectedEmail::Unread(message) => message.snippet_or_default(),
            SelectedEmail::Scheduling(message) => message.snippet_or_default(),
        }
    }

    pub fn scheduling_data(&self) -> Option<&EventDraft> {
        match self {
            SelectedEmail::Unread(_) => None,
            SelectedEmail::Scheduling(message) => message.scheduling_data.as_ref(),
        }
    }
}

/// The one shared mutable state container behind the UI.
///
/// Collections are replaced wholesale by their most recent completed fetch.
/// The two banners are independent single slots. The three in-flight flags
/// gate their corresponding controls; they are advisory, the actions do not
/// hard-block re-entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub fetched_emails: Vec<Message>,
    pub scheduling_emails: Vec<SchedulingMessage>,
    pub fetching_emails: bool,
    pub fetching_scheduling_emails: bool,
    pub submitting_event: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub selected_email: Option<SelectedEmail>,
    pub detail_open: bool,
}

/// Orchestration client owning all UI-facing state.
///
/// Actions take `&self`; concurrent outstanding requests are allowed and each
/// completion applies its result atomically under the state lock, so racing
/// fetches of the same kind resolve last-completion-wins. Failures never
/// escape an action: they are converted into banner state.
///
/// Consumers observe the state as read-only snapshots through [`subscribe`]
/// and mutate it only by invoking the named actions.
///
/// [`subscribe`]: SchedulerClient::subscribe
pub struct SchedulerClient<B: EmailSchedulerApi> {
    backend: B,
    state: Mutex<AppState>,
    snapshots: watch::Sender<AppState>,
}

impl<B: EmailSchedulerApi> SchedulerClient<B> {
    pub fn new(backend: B) -> Arc<Self> {
        let (snapshots, _) = watch::channel(AppState::default());
        Arc::new(Self {
            backend,
            state: Mutex::new(AppState::default()),
            snapshots,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.snapshots.subscribe()
    }

    pub async fn snapshot(&self) -> AppState {
        self.state.lock().await.clone()
    }

    /// Every state transition funnels through here: one lock scope, then a
    /// snapshot publish, so no partial update is ever observable.
    async fn mutate<R>(&self, apply: impl FnOnce(&mut AppState) -> R) -> R {
        let mut state = self.state.lock().await;
        let out = apply(&mut state);
        let _ = self.snapshots.send(state.clone());
        out
    }

    /// Startup gate. Run once per activation; not retried, and a failure does
    /// not block later user actions (those fail on their own terms).
    pub async fn check_health(&self) {
        match self.backend.health().await {
            Ok(health) if health.mailbox_connected => {
                debug!("health probe ok, mailbox integration connected");
            }
            Ok(_) => {
                warn!("health probe ok but mailbox integration disconnected");
                self.mutate(|state| state.error = Some(MAILBOX_NOT_CONNECTED_BANNER.to_string()))
                    .await;
            }
            Err(err) => {
                warn!(error = %err, "health probe failed");
                self.mutate(|state| state.error = Some(BACKEND_UNAVAILABLE_BANNER.to_string()))
                    .await;
            }
        }
    }

    /// Fetch all unread messages. On success the collection is replaced
    /// wholesale, in received order; on failure it is left untouched so a
    /// transient error never wipes previously loaded results.
    pub async fn fetch_emails(&self) {
        self.mutate(|state| {
            state.fetching_emails = true;
            state.error = None;
            state.success = None;
        })
        .await;

        let result = self.backend.fetch_emails().await;
        self.mutate(move |state| {
            match result {
                Ok(listing) => {
                    state.success = Some(format!(
                        "Successfully fetched {} unread emails",
                        listing.count
                    ));
                    state.fetched_emails = listing.emails;
                }
                Err(err) => {
                    warn!(error = %err, "fetch-emails failed");
                    state.error = Some(err.banner_message(FETCH_EMAILS_FALLBACK));
                }
            }
            state.fetching_emails = false;
        })
        .await;
    }

    /// Fetch the messages the extraction backend flagged as schedulable.
    /// Both reported counters come from the backend; the client does not
    /// recompute them.
    pub async fn fetch_scheduling_emails(&self) {
        self.mutate(|state| {
            state.fetching_scheduling_emails = true;
            state.error = None;
            state.success = None;
        })
        .await;

        let result = self.backend.fetch_scheduling_emails().await;
        self.mutate(move |state| {
            match result {
                Ok(listing) => {
                    state.success = Some(format!(
                        "Found {} emails with scheduling information out of {} checked",
                        listing.scheduling_count, listing.total_checked
                    ));
                    state.scheduling_emails = listing.scheduling_emails;
                }
                Err(err) => {
                    warn!(error = %err, "scheduling-emails fetch failed");
                    state.error = Some(err.banner_message(FETCH_SCHEDULING_EMAILS_FALLBACK));
                }
            }
            state.fetching_scheduling_emails = false;
        })
        .await;
    }

    /// Submit an extracted event draft to the calendar backend.
    ///
    /// Only the error banner is pre-cleared; a prior success banner keeps
    /// showing if this call fails. On a confirmed success the scheduling
    /// collection is refreshed from the backend instead of being mutated
    /// optimistically.
    pub async fn schedule_event(&self, draft: EventDraft) {
        self.mutate(|state| {
            state.submitting_event = true;
            state.error = None;
        })
        .await;

        let refresh = match self.backend.schedule_event(&draft).await {
            Ok(outcome) if outcome.success => {
                self.mutate(|state| {
                    state.success = Some(EVENT_CREATED_BANNER.to_string());
                    state.submitting_event = false;
                })
                .await;
                true
            }
            Ok(outcome) => {
                warn!("schedule-event rejected by backend");
                self.mutate(move |state| {
                    state.error = Some(
                        outcome
                            .message
                            .unwrap_or_else(|| SCHEDULE_EVENT_FALLBACK.to_string()),
                    );
                    state.submitting_event = false;
                })
                .await;
                false
            }
            Err(err) => {
                warn!(error = %err, "schedule-event failed");
                self.mutate(move |state| {
                    state.error = Some(err.banner_message(SCHEDULE_EVENT_FALLBACK));
                    state.submitting_event = false;
                })
                .await;
                false
            }
        };

        if refresh {
            self.fetch_scheduling_emails().await;
        }
    }

    /// Submit from the detail dialog: the dialog closes unconditionally at
    /// invocation time, not gated on the call's outcome.
    pub async fn schedule_event_from_detail(&self, draft: EventDraft) {
        self.mutate(|state| state.detail_open = false).await;
        self.schedule_event(draft).await;
    }

    /// Pure transition: select a message and open the detail view. Idempotent
    /// for a repeated selection.
    pub async fn view_email_details(&self, email: SelectedEmail) {
        self.mutate(move |state| {
            state.selected_email = Some(email);
            state.detail_open = true;
        })
        .await;
    }

    /// Pure transition: hide the detail view but keep the selection, so a
    /// re-open before a new selection shows the last-viewed message.
    pub async fn close_email_details(&self) {
        self.mutate(|state| state.detail_open = false).await;
    }

    pub async fn dismiss_error(&self) {
        self.mutate(|state| state.error = None).await;
    }

    pub async fn dismiss_success(&self) {
        self.mutate(|state| state.success = None).await;
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
