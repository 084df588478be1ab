//! roast-client: client for the remote chat endpoint
//!
//! This crate speaks the endpoint's small JSON contract: a POST carrying
//! `{"message": ...}` answered by `{"reply": ...}`. Failures are reported as
//! typed errors that map onto a three-way [`FailureKind`] taxonomy.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ChatService, HttpChatService};
pub use error::{Error, FailureKind, Result};
pub use types::{ChatRequest, parse_reply};
