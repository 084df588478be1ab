//! Error types for roast-core

use thiserror::Error;

/// Result type alias using roast-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up an exchange controller.
///
/// Exchanges themselves never fail; see [`crate::ExchangeController::run_exchange`].
#[derive(Error, Debug)]
pub enum Error {
    /// An error from the client layer
    #[error(transparent)]
    Client(#[from] roast_client::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
