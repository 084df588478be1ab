//! Bounded call and outcome classification

use std::time::Duration;

use roast_client::{ChatService, Error, FailureKind};

use crate::message::Message;

/// Shown when the endpoint stays silent past the deadline
pub const TIMEOUT_NOTICE: &str = "Server's taking longer than VAR. Try again.";
/// Shown for network failures and non-success statuses
pub const TRANSPORT_NOTICE: &str =
    "Connection's worse than a Sunday league pitch. Try again later.";
/// Shown when a success response carries no usable reply
pub const MALFORMED_NOTICE: &str =
    "Server's playing like it's had too many at half-time. Try again.";

/// Result of one bounded call to the chat service
#[derive(Debug)]
pub enum ExchangeOutcome {
    /// The endpoint answered with a reply string
    Reply(String),
    /// The deadline fired before a response arrived
    TimedOut,
    /// The call could not complete or the status was not 2xx
    TransportError(Error),
    /// The response decoded but carried no string reply
    DecodeError(Error),
}

impl ExchangeOutcome {
    /// Classify a finished call
    pub fn from_result(result: roast_client::Result<String>) -> Self {
        match result {
            Ok(reply) => ExchangeOutcome::Reply(reply),
            Err(e) => match e.kind() {
                FailureKind::Timeout => ExchangeOutcome::TimedOut,
                FailureKind::Transport => ExchangeOutcome::TransportError(e),
                FailureKind::MalformedPayload => ExchangeOutcome::DecodeError(e),
            },
        }
    }

    /// Failure class, or `None` for a reply
    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            ExchangeOutcome::Reply(_) => None,
            ExchangeOutcome::TimedOut => Some(FailureKind::Timeout),
            ExchangeOutcome::TransportError(_) => Some(FailureKind::Transport),
            ExchangeOutcome::DecodeError(_) => Some(FailureKind::MalformedPayload),
        }
    }

    /// Underlying client error, if any
    pub fn error(&self) -> Option<&Error> {
        match self {
            ExchangeOutcome::TransportError(e) | ExchangeOutcome::DecodeError(e) => Some(e),
            _ => None,
        }
    }

    /// The transcript message this outcome becomes
    pub fn into_message(self) -> Message {
        match self {
            ExchangeOutcome::Reply(reply) => Message::assistant(reply),
            ExchangeOutcome::TimedOut => Message::assistant(notice_for(FailureKind::Timeout)),
            ExchangeOutcome::TransportError(_) => {
                Message::assistant(notice_for(FailureKind::Transport))
            }
            ExchangeOutcome::DecodeError(_) => {
                Message::assistant(notice_for(FailureKind::MalformedPayload))
            }
        }
    }
}

/// User-facing text for a failure class
pub fn notice_for(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Timeout => TIMEOUT_NOTICE,
        FailureKind::Transport => TRANSPORT_NOTICE,
        FailureKind::MalformedPayload => MALFORMED_NOTICE,
    }
}

/// Race one call against a deadline.
///
/// Whichever settles first wins. On timeout the call's future is dropped,
/// which aborts the request; its result can never be observed afterwards.
pub async fn bounded_send(
    service: &dyn ChatService,
    text: &str,
    deadline: Duration,
) -> ExchangeOutcome {
    match tokio::time::timeout(deadline, service.send(text)).await {
        Ok(result) => ExchangeOutcome::from_result(result),
        Err(_elapsed) => ExchangeOutcome::TimedOut,
    }
}
