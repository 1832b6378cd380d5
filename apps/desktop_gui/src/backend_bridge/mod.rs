//! Bridge between the UI thread and the tokio worker that owns the
//! orchestration client.

pub mod commands;
pub mod runtime;
