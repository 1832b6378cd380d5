//! HTTP transport to the scheduler backend, normalized to a uniform
//! success/failure shape behind the [`EmailSchedulerApi`] seam.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::EventDraft,
    error::ApiErrorBody,
    protocol::{
        FetchEmailsResponse, HealthResponse, ScheduleEventRequest, ScheduleEventResponse,
        SchedulingEmailsResponse,
    },
};
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The backend could not be reached at all, or the response could not be
    /// read. Connectivity failures are not classified further.
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    /// The backend answered with a non-2xx status, optionally carrying a
    /// human-readable message in its failure body.
    #[error("backend returned status {status}")]
    Api { status: u16, message: Option<String> },
}

impl TransportError {
    /// The text to surface in the error banner: the backend-provided message
    /// when one exists, otherwise the operation-specific fallback.
    pub fn banner_message(&self, fallback: &str) -> String {
        match self {
            TransportError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Unreachable(err.to_string())
    }
}

/// The four backend calls the orchestration layer depends on. Implemented by
/// [`HttpBackend`] in production and by scripted stubs in tests.
#[async_trait]
pub trait EmailSchedulerApi: Send + Sync {
    async fn health(&self) -> Result<HealthResponse, TransportError>;
    async fn fetch_emails(&self) -> Result<FetchEmailsResponse, TransportError>;
    async fn fetch_scheduling_emails(&self) -> Result<SchedulingEmailsResponse, TransportError>;
    async fn schedule_event(
        &self,
        draft: &EventDraft,
    ) -> Result<ScheduleEventResponse, TransportError>;
}

#[async_trait]
impl<T: EmailSchedulerApi + ?Sized> EmailSchedulerApi for std::sync::Arc<T> {
    async fn health(&self) -> Result<HealthResponse, TransportError> {
        (**self).health().await
    }

    async fn fetch_emails(&self) -> Result<FetchEmailsResponse, TransportError> {
        (**self).fetch_emails().await
    }

    async fn fetch_scheduling_emails(&self) -> Result<SchedulingEmailsResponse, TransportError> {
        (**self).fetch_scheduling_emails().await
    }

    async fn schedule_event(
        &self,
        draft: &EventDraft,
    ) -> Result<ScheduleEventResponse, TransportError> {
        (**self).schedule_event(draft).await
    }
}

pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: config::normalize_base_url(&base_url.into()),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
        let status = response.status();
        if !status.is_success() {
            // The failure body is best-effort JSON; anything else means no
            // extractable message and the caller's fallback applies.
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<ApiErrorBody>(&body).ok())
                .and_then(|body| body.error);
            return Err(TransportError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl EmailSchedulerApi for HttpBackend {
    async fn health(&self) -> Result<HealthResponse, TransportError> {
        let response = self.http.get(self.endpoint("health")).send().await?;
        Self::decode(response).await
    }

    async fn fetch_emails(&self) -> Result<FetchEmailsResponse, TransportError> {
        let response = self.http.get(self.endpoint("fetch-emails")).send().await?;
        Self::decode(response).await
    }

    async fn fetch_scheduling_emails(&self) -> Result<SchedulingEmailsResponse, TransportError> {
        let response = self
            .http
            .get(self.endpoint("scheduling-emails"))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn schedule_event(
        &self,
        draft: &EventDraft,
    ) -> Result<ScheduleEventResponse, TransportError> {
        let response = self
            .http
            .post(self.endpoint("schedule-event"))
            .json(&ScheduleEventRequest {
                scheduling_data: draft.clone(),
            })
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
