//! Response envelope handling
//!
//! Most endpoints answer `{success: bool, data: ...}`. Some proxy responses
//! pass a payload through unwrapped; a body without a `success` field is
//! treated as the payload itself.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Outcome reported by the backend
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The payload (`data` of a successful envelope, or the whole body)
    Success(Value),
    /// `success: false`, with the server message if one was sent
    Failure(Option<String>),
}

impl Envelope {
    pub fn classify(body: Value) -> Self {
        match body {
            Value::Object(mut map) if map.contains_key("success") => {
                let success = map
                    .get("success")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let data = map.remove("data").unwrap_or(Value::Null);
                if success {
                    Envelope::Success(data)
                } else {
                    Envelope::Failure(failure_message(&data))
                }
            }
            other => Envelope::Success(other),
        }
    }

    /// Payload, or `Error::Application` for a reported failure
    pub fn into_payload(self) -> Result<Value> {
        match self {
            Envelope::Success(data) => Ok(data),
            Envelope::Failure(message) => Err(Error::Application(message)),
        }
    }

    /// Decode the payload into `T`
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.into_payload()?)?)
    }
}

/// `wp_send_json_error` sends either a bare string or `{message: ...}`
fn failure_message(data: &Value) -> Option<String> {
    match data {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// True when `body` parses as an envelope; used to keep server messages
/// that arrive with a non-2xx status
pub fn is_envelope(body: &str) -> bool {
    serde_json::from_str::<Value>(body)
        .map(|v| v.get("success").is_some())
        .unwrap_or(false)
}
