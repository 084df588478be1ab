//! roast-core: message exchange lifecycle
//!
//! Holds the append-only transcript and drives one bounded request/response
//! cycle per user submission, turning every outcome into exactly one
//! transcript message.

pub mod controller;
pub mod error;
pub mod events;
pub mod handle;
pub mod message;
pub mod outcome;
pub mod transcript;

pub use controller::{ExchangeConfig, ExchangeController, ExchangeStatus};
pub use error::{Error, Result};
pub use events::ChatEvent;
pub use handle::ExchangeHandle;
pub use message::Message;
pub use outcome::ExchangeOutcome;
pub use transcript::TranscriptStore;

pub use roast_client::{ChatService, FailureKind, HttpChatService};
