//! Exchange lifecycle: one submission in, one transcript reply out

use std::sync::Arc;
use std::time::{Duration, Instant};

use roast_client::{ChatService, FailureKind, HttpChatService};

use crate::{
    error::{Error, Result},
    events::ChatEvent,
    handle::ExchangeHandle,
    message::Message,
    outcome::{ExchangeOutcome, bounded_send},
    transcript::TranscriptStore,
};

/// Exchange controller configuration
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Hard deadline for one call
    pub timeout: Duration,
    /// Text sent automatically when the client starts
    pub greeting: String,
}

impl ExchangeConfig {
    /// Default deadline for a single call
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
    /// Default greeting text
    pub const DEFAULT_GREETING: &'static str = "Hello";

    /// Reject configurations that could never complete an exchange
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("timeout must be greater than zero".into()));
        }
        if self.greeting.trim().is_empty() {
            return Err(Error::InvalidConfig("greeting must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            greeting: Self::DEFAULT_GREETING.to_string(),
        }
    }
}

/// How a call to [`ExchangeController::run_exchange`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeStatus {
    /// Blank submission; nothing happened
    Skipped,
    /// Another exchange was pending; nothing happened
    Busy,
    /// A reply was appended
    Replied,
    /// A failure notice was appended
    Failed(FailureKind),
}

impl ExchangeStatus {
    /// Whether the exchange ran and ended in a failure notice
    pub fn is_failure(&self) -> bool {
        matches!(self, ExchangeStatus::Failed(_))
    }
}

/// Drives request/response cycles against a [`ChatService`]
pub struct ExchangeController {
    service: Arc<dyn ChatService>,
    config: ExchangeConfig,
    handle: ExchangeHandle,
}

impl ExchangeController {
    /// Create a controller over any chat service
    pub fn new(service: Arc<dyn ChatService>, config: ExchangeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            service,
            config,
            handle: ExchangeHandle::new(),
        })
    }

    /// Create a controller talking HTTP to `endpoint`
    pub fn http(endpoint: &str, config: ExchangeConfig) -> Result<Self> {
        let service = HttpChatService::new(endpoint)?;
        Self::new(Arc::new(service), config)
    }

    /// Get a cloneable handle for observing the pending state
    pub fn handle(&self) -> ExchangeHandle {
        self.handle.clone()
    }

    /// Whether an exchange is currently pending
    pub fn is_pending(&self) -> bool {
        self.handle.is_pending()
    }

    /// Run the automatic greeting exchange
    pub async fn greet(&self, store: &mut TranscriptStore) -> ExchangeStatus {
        let greeting = self.config.greeting.clone();
        self.run_exchange(store, &greeting, true).await
    }

    /// Run an exchange for text typed by the user
    pub async fn submit(&self, store: &mut TranscriptStore, text: &str) -> ExchangeStatus {
        self.run_exchange(store, text, false).await
    }

    /// Drive exactly one request/response cycle.
    ///
    /// For a user submission the user's message is appended first. Whatever
    /// the call does, exactly one non-user message follows it. Failures are
    /// logged and turned into notices; nothing is returned as an error.
    pub async fn run_exchange(
        &self,
        store: &mut TranscriptStore,
        text: &str,
        is_initial_greeting: bool,
    ) -> ExchangeStatus {
        if !is_initial_greeting && text.trim().is_empty() {
            tracing::debug!("ignoring blank submission");
            return ExchangeStatus::Skipped;
        }

        // Claim the slot before touching the transcript so a Busy call appends nothing
        let Some(_pending) = self.handle.try_begin(store.event_sender()) else {
            tracing::warn!("exchange already pending, ignoring new submission");
            return ExchangeStatus::Busy;
        };

        if !is_initial_greeting {
            store.append(Message::user(text));
        }
        store.notify(ChatEvent::PendingChanged { pending: true });

        tracing::debug!(
            greeting = is_initial_greeting,
            len = text.len(),
            timeout_ms = self.config.timeout.as_millis() as u64,
            "exchange started"
        );
        let started = Instant::now();

        let outcome = bounded_send(self.service.as_ref(), text, self.config.timeout).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match (&outcome, outcome.error()) {
            (ExchangeOutcome::Reply(reply), _) => {
                tracing::debug!(elapsed_ms, len = reply.len(), "exchange replied");
            }
            (_, Some(e)) => {
                tracing::warn!(
                    elapsed_ms,
                    status = ?e.status(),
                    body = e.body_excerpt().unwrap_or_default(),
                    error = %e,
                    "exchange failed"
                );
            }
            (_, None) => {
                tracing::warn!(elapsed_ms, "exchange timed out, request aborted");
            }
        }

        let status = match outcome.failure() {
            None => ExchangeStatus::Replied,
            Some(kind) => ExchangeStatus::Failed(kind),
        };

        store.append(outcome.into_message());
        status
    }
}
