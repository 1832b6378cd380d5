use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use client_core::{AppState, SelectedEmail};
use shared::domain::EventDraft;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

const ERROR_BANNER_FILL: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);
const ERROR_BANNER_STROKE: egui::Color32 = egui::Color32::from_rgb(175, 96, 96);
const SUCCESS_BANNER_FILL: egui::Color32 = egui::Color32::from_rgb(47, 92, 56);
const SUCCESS_BANNER_STROKE: egui::Color32 = egui::Color32::from_rgb(96, 160, 110);
const SCHEDULING_CHIP: egui::Color32 = egui::Color32::from_rgb(88, 101, 242);

/// The egui shell. It holds the latest orchestration snapshot and a status
/// line; every user action becomes a `BackendCommand`, never a direct state
/// edit, so the backend worker stays the single writer.
pub struct EmailSchedulerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    state: AppState,
    status: String,
}

impl EmailSchedulerApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: AppState::default(),
            status: "Connecting to backend".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::State(state) => {
                    self.state = state;
                    self.status = "Ready".to_string();
                }
                UiEvent::BackendStartupFailed(reason) => {
                    self.status = format!("Backend worker failed to start: {reason}");
                }
            }
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn show_banners(&mut self, ui: &mut egui::Ui) {
        let mut pending: Vec<BackendCommand> = Vec::new();

        if let Some(error) = self.state.error.clone() {
            banner_frame(ERROR_BANNER_FILL, ERROR_BANNER_STROKE).show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(&error).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            pending.push(BackendCommand::DismissError);
                        }
                    });
                });
            });
        }

        if let Some(success) = self.state.success.clone() {
            banner_frame(SUCCESS_BANNER_FILL, SUCCESS_BANNER_STROKE).show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(&success).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            pending.push(BackendCommand::DismissSuccess);
                        }
                    });
                });
            });
        }

        for cmd in pending {
            self.dispatch(cmd);
        }
    }

    fn show_fetch_controls(&mut self, ui: &mut egui::Ui) {
        let mut pending: Vec<BackendCommand> = Vec::new();

        ui.horizontal(|ui| {
            if ui
                .add_enabled(
                    !self.state.fetching_emails,
                    egui::Button::new("Fetch Unread Emails"),
                )
                .clicked()
            {
                pending.push(BackendCommand::FetchEmails);
            }
            if self.state.fetching_emails {
                ui.spinner();
                ui.weak("Fetching emails");
            }

            ui.add_space(12.0);

            if ui
                .add_enabled(
                    !self.state.fetching_scheduling_emails,
                    egui::Button::new("Find Scheduling Emails"),
                )
                .clicked()
            {
                pending.push(BackendCommand::FetchSchedulingEmails);
            }
            if self.state.fetching_scheduling_emails {
                ui.spinner();
                ui.weak("Analyzing emails");
            }
        });

        for cmd in pending {
            self.dispatch(cmd);
        }
    }

    fn show_unread_list(&mut self, ui: &mut egui::Ui) {
        ui.heading(format!("Unread Emails ({})", self.state.fetched_emails.len()));
        if self.state.fetched_emails.is_empty() {
            ui.weak("No unread emails loaded. Use \"Fetch Unread Emails\" to load them.");
            return;
        }

        let mut pending: Vec<BackendCommand> = Vec::new();
        for (index, email) in self.state.fetched_emails.iter().enumerate() {
            let row_id = email.display_key(index);
            egui::Frame::new()
                .fill(ui.visuals().faint_bg_color)
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.push_id(&row_id, |ui| {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(egui::RichText::new(email.subject_or_default()).strong());
                                ui.weak(email.sender_or_default());
                                ui.small(email.snippet_or_default());
                            });
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.button("View").clicked() {
                                        pending.push(BackendCommand::ViewEmailDetails {
                                            email: SelectedEmail::Unread(email.clone()),
                                        });
                                    }
                                },
                            );
                        });
                    });
                });
        }

        for cmd in pending {
            self.dispatch(cmd);
        }
    }

    fn show_scheduling_list(&mut self, ui: &mut egui::Ui) {
        ui.heading(format!(
            "Scheduling Emails ({})",
            self.state.scheduling_emails.len()
        ));
        if self.state.scheduling_emails.is_empty() {
            ui.weak("No scheduling emails found yet. Use \"Find Scheduling Emails\" to scan.");
            return;
        }

        let submitting = self.state.submitting_event;
        let mut pending: Vec<BackendCommand> = Vec::new();
        for (index, email) in self.state.scheduling_emails.iter().enumerate() {
            let row_id = email.display_key(index);
            egui::Frame::new()
                .fill(ui.visuals().faint_bg_color)
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.push_id(&row_id, |ui| {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.horizontal(|ui| {
                                    ui.label(
                                        egui::RichText::new(email.subject_or_default()).strong(),
                                    );
                                    if email.has_scheduling {
                                        ui.label(
                                            egui::RichText::new("Has Scheduling")
                                                .small()
                                                .color(egui::Color32::WHITE)
                                                .background_color(SCHEDULING_CHIP),
                                        );
                                    }
                                });
                                ui.weak(email.sender_or_default());
                                ui.small(email.snippet_or_default());
                                if let Some(draft) = &email.scheduling_data {
                                    ui.small(event_summary(draft));
                                }
                            });
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    let can_schedule =
                                        email.scheduling_data.is_some() && !submitting;
                                    if ui
                                        .add_enabled(can_schedule, egui::Button::new("Schedule"))
                                        .clicked()
                                    {
                                        if let Some(draft) = email.scheduling_data.clone() {
                                            pending.push(BackendCommand::ScheduleEvent { draft });
                                        }
                                    }
                                    if ui.button("View").clicked() {
                                        pending.push(BackendCommand::ViewEmailDetails {
                                            email: SelectedEmail::Scheduling(email.clone()),
                                        });
                                    }
                                },
                            );
                        });
                    });
                });
        }

        for cmd in pending {
            self.dispatch(cmd);
        }
    }

    fn show_detail_window(&mut self, ctx: &egui::Context) {
        if !self.state.detail_open {
            return;
        }
        let Some(selected) = self.state.selected_email.clone() else {
            return;
        };

        let mut pending: Vec<BackendCommand> = Vec::new();
        egui::Window::new("Email Details")
            .collapsible(false)
            .resizable(true)
            .default_width(480.0)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(selected.subject()).strong().size(16.0));
                ui.weak(format!("From: {}", selected.sender()));
                ui.separator();
                ui.label(selected.snippet());

                if let Some(draft) = selected.scheduling_data() {
                    ui.separator();
                    ui.label(egui::RichText::new("Detected Event").strong());
                    ui.label(event_summary(draft));
                    if let Some(location) = &draft.location {
                        ui.label(format!("Location: {location}"));
                    }
                    if let Some(participants) = &draft.participants {
                        ui.label(format!("Participants: {}", participants.join(", ")));
                    }
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if let Some(draft) = selected.scheduling_data() {
                        if ui
                            .add_enabled(
                                !self.state.submitting_event,
                                egui::Button::new("Schedule Event"),
                            )
                            .clicked()
                        {
                            pending.push(BackendCommand::ScheduleEventFromDetail {
                                draft: draft.clone(),
                            });
                        }
                    }
                    if ui.button("Close").clicked() {
                        pending.push(BackendCommand::CloseEmailDetails);
                    }
                });
            });

        for cmd in pending {
            self.dispatch(cmd);
        }
    }
}

impl eframe::App for EmailSchedulerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
                if self.state.submitting_event {
                    ui.spinner();
                    ui.small("Creating calendar event");
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Email Scheduler");
            ui.add_space(4.0);
            self.show_banners(ui);
            ui.add_space(4.0);
            self.show_fetch_controls(ui);
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.columns(2, |columns| {
                    self.show_unread_list(&mut columns[0]);
                    self.show_scheduling_list(&mut columns[1]);
                });
            });
        });

        self.show_detail_window(ctx);

        // Snapshots arrive on a channel, not through egui's input events, so
        // poll at a modest cadence even when idle.
        ctx.request_repaint_after(Duration::from_millis(120));
    }
}

fn banner_frame(fill: egui::Color32, stroke: egui::Color32) -> egui::Frame {
    egui::Frame::NONE
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, stroke))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
}

fn event_summary(draft: &EventDraft) -> String {
    format!(
        "{} on {} from {} to {}",
        draft.title, draft.date, draft.start_time, draft.end_time
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::Message;

    fn draft() -> EventDraft {
        EventDraft {
            title: "Team Sync".to_string(),
            date: "2025-03-14".to_string(),
            start_time: "10:00".to_string(),
            end_time: "10:30".to_string(),
            location: None,
            participants: None,
        }
    }

    #[test]
    fn event_summary_reads_naturally() {
        assert_eq!(
            event_summary(&draft()),
            "Team Sync on 2025-03-14 from 10:00 to 10:30"
        );
    }

    #[test]
    fn row_ids_disambiguate_duplicate_messages() {
        let email = Message {
            id: None,
            subject: Some("Lunch?".to_string()),
            sender: Some("sam@example.com".to_string()),
            snippet: None,
        };
        assert_ne!(email.display_key(0), email.display_key(1));
    }
}
