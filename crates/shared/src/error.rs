use serde::{Deserialize, Serialize};

/// Failure payload the backend attaches to non-2xx responses.
///
/// The `error` field is optional on the wire; callers fall back to an
/// operation-specific message when it is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
