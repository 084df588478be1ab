//! Wire types for the chat endpoint

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Request body: `{"message": "..."}`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// Create a request carrying only the latest user text
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

/// Human-readable JSON type name, for diagnostics
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Extract the reply from a success response body.
///
/// Fields other than `reply` are ignored. A body that is not JSON at all
/// yields [`Error::Json`]; JSON without a string `reply` yields
/// [`Error::InvalidReply`].
pub fn parse_reply(body: &[u8]) -> Result<String> {
    let value: Value = serde_json::from_slice(body)?;

    let object = match value {
        Value::Object(map) => map,
        other => {
            return Err(Error::invalid_reply(format!(
                "expected an object, got {}",
                json_type(&other)
            )));
        }
    };

    match object.get("reply") {
        Some(Value::String(reply)) => Ok(reply.clone()),
        Some(other) => Err(Error::invalid_reply(format!(
            "`reply` is {}",
            json_type(other)
        ))),
        None => Err(Error::invalid_reply("missing `reply` field")),
    }
}
