//! Runtime bridge: a dedicated thread running a tokio runtime that owns the
//! `SchedulerClient`, executes queued commands, and streams state snapshots
//! back to the UI thread.

use std::{sync::Arc, thread};

use client_core::{config::Settings, HttpBackend, SchedulerClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.send(UiEvent::BackendStartupFailed(format!(
                    "failed to build backend runtime: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let client = SchedulerClient::new(HttpBackend::new(settings.api_base_url));

            let mut snapshots = client.subscribe();
            let snapshot_tx = ui_tx.clone();
            tokio::spawn(async move {
                while snapshots.changed().await.is_ok() {
                    let state = snapshots.borrow_and_update().clone();
                    if snapshot_tx.send(UiEvent::State(state)).is_err() {
                        break;
                    }
                }
            });

            // Startup gate: probed once per activation, never retried, and
            // never blocking later user actions.
            client.check_health().await;

            // Blocking recv is fine here: command handlers run as spawned
            // tasks on the runtime's worker threads, so fetches stay
            // concurrent while this loop waits for the next command.
            while let Ok(command) = cmd_rx.recv() {
                let client = Arc::clone(&client);
                tokio::spawn(async move {
                    handle_command(client, command).await;
                });
            }
        });
    });
}

async fn handle_command(client: Arc<SchedulerClient<HttpBackend>>, command: BackendCommand) {
    match command {
        BackendCommand::FetchEmails => client.fetch_emails().await,
        BackendCommand::FetchSchedulingEmails => client.fetch_scheduling_emails().await,
        BackendCommand::ScheduleEvent { draft } => client.schedule_event(draft).await,
        BackendCommand::ScheduleEventFromDetail { draft } => {
            client.schedule_event_from_detail(draft).await
        }
        BackendCommand::ViewEmailDetails { email } => client.view_email_details(email).await,
        BackendCommand::CloseEmailDetails => client.close_email_details().await,
        BackendCommand::DismissError => client.dismiss_error().await,
        BackendCommand::DismissSuccess => client.dismiss_success().await,
    }
}
