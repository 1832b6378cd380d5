//! Backend commands queued from UI actions to the backend worker.

use client_core::SelectedEmail;
use shared::domain::EventDraft;

pub enum BackendCommand {
    FetchEmails,
    FetchSchedulingEmails,
    ScheduleEvent {
        draft: EventDraft,
    },
    /// Same as `ScheduleEvent`, but also closes the detail dialog at
    /// invocation time regardless of the call's outcome.
    ScheduleEventFromDetail {
        draft: EventDraft,
    },
    ViewEmailDetails {
        email: SelectedEmail,
    },
    CloseEmailDetails,
    DismissError,
    DismissSuccess,
}
