//! Notification dispatchers
//!
//! The HTTP dispatcher POSTs each [`NotifyRequest`] as JSON to a configured
//! endpoint, once, with no retry. The receiving service owns email lookup and
//! composition. When no endpoint is configured the disabled dispatcher stands
//! in and every outcome reports failure with a "disabled" note.

use async_trait::async_trait;
use redress_core::logging::operations;
use redress_core::notify::{Notifier, NotifyOutcome, NotifyRequest};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Dispatcher that POSTs notifications to an HTTP endpoint
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpNotifier {
    /// Create a new HTTP dispatcher for the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, request: NotifyRequest) -> NotifyOutcome {
        let complaint_id = request.complaint_id.clone();
        let kind = request.kind;

        let result = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .and_then(|resp| resp.error_for_status());

        match result {
            Ok(_) => {
                debug!(
                    operation = operations::NOTIFY_DISPATCH,
                    "Dispatched {} notification for {}", kind, complaint_id
                );
                NotifyOutcome::ok()
            }
            Err(e) => {
                warn!(
                    operation = operations::NOTIFY_DISPATCH,
                    "Notification dispatch failed for {} ({}): {}", complaint_id, kind, e
                );
                NotifyOutcome::failed(e.to_string())
            }
        }
    }
}

/// Dispatcher used when no endpoint is configured
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, request: NotifyRequest) -> NotifyOutcome {
        debug!(
            "Notification dispatch disabled; dropping {} for {}",
            request.kind, request.complaint_id
        );
        NotifyOutcome::failed("disabled")
    }
}

/// Dispatcher that captures requests instead of sending them
///
/// Test servers swap this in to assert on exactly which notifications an
/// operation produced.
#[derive(Default)]
pub struct RecordingNotifier {
    requests: Mutex<Vec<NotifyRequest>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests captured so far, in dispatch order
    pub fn requests(&self) -> Vec<NotifyRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Drop everything captured so far
    pub fn clear(&self) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.clear();
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, request: NotifyRequest) -> NotifyOutcome {
        match self.requests.lock() {
            Ok(mut requests) => {
                requests.push(request);
                NotifyOutcome::ok()
            }
            Err(_) => NotifyOutcome::failed("recorder lock poisoned"),
        }
    }
}
