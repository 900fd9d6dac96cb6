//! Response envelope types for the API gateway.
//!
//! Every gateway call resolves to one of two shapes: the upstream JSON
//! payload, or a normalized error envelope. Formatters branch on the shape
//! with a single `match` and never see a raw transport failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The failure category of a gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The upstream returned a non-2xx HTTP status.
    HttpError,

    /// The request exceeded the configured timeout.
    Timeout,

    /// The connection could not be established or was interrupted.
    ConnectionError,

    /// The response body was not valid JSON.
    DecodeError,
}

/// Normalized error shape returned instead of raising on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The failure category.
    pub error: ErrorKind,

    /// Human-readable detail, suitable for inclusion in a report.
    pub message: String,
}

/// Outcome of a single gateway call.
///
/// `Payload` carries the parsed JSON body exactly as the upstream provided
/// it (array or object). `Error` carries the normalized envelope.
#[derive(Debug, Clone)]
pub enum ApiResponse {
    /// Parsed JSON body, unchanged.
    Payload(Value),

    /// Normalized failure.
    Error(ErrorEnvelope),
}

impl ApiResponse {
    /// Create an error response with the given kind and message.
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Error(ErrorEnvelope {
            error: kind,
            message: message.into(),
        })
    }

    /// Whether this response is the error shape.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The payload as a list of records, if it is a JSON array.
    pub fn records(&self) -> Option<&[Value]> {
        match self {
            Self::Payload(Value::Array(items)) => Some(items),
            _ => None,
        }
    }

    /// The first usable record of the payload.
    ///
    /// Some upstream endpoints return a single object, others a one-element
    /// array; callers that expect one record accept either. Returns `None`
    /// for errors, empty arrays, and empty objects.
    pub fn first_record(&self) -> Option<&Value> {
        match self {
            Self::Payload(Value::Array(items)) => items.first(),
            Self::Payload(value) => match value {
                Value::Object(map) if !map.is_empty() => Some(value),
                _ => None,
            },
            Self::Error(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_from_array_payload() {
        let response = ApiResponse::Payload(json!([{"symbol": "AAPL"}, {"symbol": "MSFT"}]));
        assert_eq!(response.records().map(<[Value]>::len), Some(2));
    }

    #[test]
    fn test_records_none_for_object_payload() {
        let response = ApiResponse::Payload(json!({"symbol": "AAPL"}));
        assert!(response.records().is_none());
    }

    #[test]
    fn test_first_record_from_array() {
        let response = ApiResponse::Payload(json!([{"symbol": "AAPL"}]));
        let first = response.first_record().unwrap();
        assert_eq!(first["symbol"], "AAPL");
    }

    #[test]
    fn test_first_record_from_bare_object() {
        let response = ApiResponse::Payload(json!({"isOpen": true}));
        assert!(response.first_record().is_some());
    }

    #[test]
    fn test_first_record_empty_shapes() {
        assert!(ApiResponse::Payload(json!([])).first_record().is_none());
        assert!(ApiResponse::Payload(json!({})).first_record().is_none());
        assert!(
            ApiResponse::error(ErrorKind::Timeout, "deadline exceeded")
                .first_record()
                .is_none()
        );
    }

    #[test]
    fn test_error_kind_serializes_snake_case() {
        let envelope = ErrorEnvelope {
            error: ErrorKind::ConnectionError,
            message: "refused".to_string(),
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["error"], "connection_error");
    }
}
