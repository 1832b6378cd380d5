//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::FetchEmails => "fetch_emails",
        BackendCommand::FetchSchedulingEmails => "fetch_scheduling_emails",
        BackendCommand::ScheduleEvent { .. } => "schedule_event",
        BackendCommand::ScheduleEventFromDetail { .. } => "schedule_event_from_detail",
        BackendCommand::ViewEmailDetails { .. } => "view_email_details",
        BackendCommand::CloseEmailDetails => "close_email_details",
        BackendCommand::DismissError => "dismiss_error",
        BackendCommand::DismissSuccess => "dismiss_success",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}
