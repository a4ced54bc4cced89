//! Payload adapters: the boundary between application data and raw bytes.
//!
//! The codec never looks inside a payload. Callers hand it bytes produced by
//! an adapter and get bytes back; when the adapter cannot read the recovered
//! bytes, they are kept alongside the error for display.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Errors reported by payload adapters.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Payload serialization failed: {0}")]
    Serialize(String),

    #[error("Recovered bytes are not a valid payload: {0}")]
    Deserialize(String),
}

/// Converts application payloads to and from bytes.
pub trait PayloadAdapter {
    /// The application-side payload type.
    type Payload;

    /// Serializes a payload to bytes.
    fn serialize(&self, payload: &Self::Payload) -> Result<Vec<u8>, PayloadError>;

    /// Parses recovered bytes into a payload.
    fn deserialize(&self, bytes: &[u8]) -> Result<Self::Payload, PayloadError>;
}

/// Outcome of handing recovered bytes to an adapter.
#[derive(Debug)]
pub enum PayloadOutcome<P> {
    /// The adapter accepted the bytes.
    Parsed(P),
    /// The adapter rejected the bytes; they are kept for diagnostics.
    Unparsed { raw: Vec<u8>, error: PayloadError },
}

impl<P> PayloadOutcome<P> {
    /// Returns the parsed payload, if any.
    pub fn parsed(&self) -> Option<&P> {
        match self {
            PayloadOutcome::Parsed(payload) => Some(payload),
            PayloadOutcome::Unparsed { .. } => None,
        }
    }

    /// Returns true if the adapter accepted the bytes.
    pub fn is_parsed(&self) -> bool {
        matches!(self, PayloadOutcome::Parsed(_))
    }
}

/// Passes recovered bytes through an adapter without losing them on failure.
pub fn decode_payload<A: PayloadAdapter>(adapter: &A, bytes: &[u8]) -> PayloadOutcome<A::Payload> {
    match adapter.deserialize(bytes) {
        Ok(payload) => PayloadOutcome::Parsed(payload),
        Err(error) => {
            warn!(len = bytes.len(), %error, "recovered bytes rejected by payload adapter");
            PayloadOutcome::Unparsed {
                raw: bytes.to_vec(),
                error,
            }
        }
    }
}

/// JSON metadata payloads, serialized compactly as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAdapter;

impl JsonAdapter {
    /// Parses JSON text typed by a user into a payload.
    pub fn parse_text(&self, text: &str) -> Result<Value, PayloadError> {
        serde_json::from_str(text).map_err(|e| PayloadError::Serialize(e.to_string()))
    }

    /// Renders a payload for display.
    pub fn pretty(&self, payload: &Value) -> String {
        serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
    }
}

impl PayloadAdapter for JsonAdapter {
    type Payload = Value;

    fn serialize(&self, payload: &Value) -> Result<Vec<u8>, PayloadError> {
        serde_json::to_vec(payload).map_err(|e| PayloadError::Serialize(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, PayloadError> {
        serde_json::from_slice(bytes).map_err(|e| PayloadError::Deserialize(e.to_string()))
    }
}

/// Opaque bytes, passed through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawAdapter;

impl PayloadAdapter for RawAdapter {
    type Payload = Vec<u8>;

    fn serialize(&self, payload: &Vec<u8>) -> Result<Vec<u8>, PayloadError> {
        Ok(payload.clone())
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Vec<u8>, PayloadError> {
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_roundtrip() {
        let adapter = JsonAdapter;
        let payload = json!({"tx": "0xdeadbeef", "reward": 1.0, "network": "mainnet"});

        let bytes = adapter.serialize(&payload).unwrap();
        let outcome = decode_payload(&adapter, &bytes);
        assert_eq!(outcome.parsed(), Some(&payload));
    }

    #[test]
    fn test_json_is_compact() {
        let adapter = JsonAdapter;
        let value = adapter.parse_text("{ \"a\" :  1 }").unwrap();
        assert_eq!(adapter.serialize(&value).unwrap(), br#"{"a":1}"#);
    }

    #[test]
    fn test_invalid_json_keeps_raw_bytes() {
        let outcome = decode_payload(&JsonAdapter, b"THR-01::{\"tx\"");
        match outcome {
            PayloadOutcome::Unparsed { raw, error } => {
                assert_eq!(raw, b"THR-01::{\"tx\"");
                assert!(matches!(error, PayloadError::Deserialize(_)));
            }
            PayloadOutcome::Parsed(_) => panic!("expected unparsed outcome"),
        }
    }

    #[test]
    fn test_parse_text_rejects_non_json() {
        assert!(JsonAdapter.parse_text("hello").is_err());
    }

    #[test]
    fn test_raw_adapter_is_identity() {
        let data = vec![0u8, 255, 10, 20];
        let bytes = RawAdapter.serialize(&data).unwrap();
        assert_eq!(decode_payload(&RawAdapter, &bytes).parsed(), Some(&data));
    }
}
