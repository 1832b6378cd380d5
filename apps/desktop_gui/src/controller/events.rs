//! Events flowing from the backend worker to the UI thread.

use client_core::AppState;

pub enum UiEvent {
    /// A fresh read-only snapshot of the orchestration state. The UI keeps
    /// only the latest one.
    State(AppState),
    /// The backend worker could not start at all; shown on the status line
    /// since no orchestration state will ever arrive.
    BackendStartupFailed(String),
}
