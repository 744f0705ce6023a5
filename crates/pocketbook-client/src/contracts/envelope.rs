//! JSON wrappers every command result and failure is returned in.

use serde::Serialize;
use serde_json::Value;

use crate::API_VERSION;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: String,
    pub version: String,
    pub data: Value,
}

impl SuccessEnvelope {
    /// Wraps a command payload. Fails only if `data` cannot become JSON.
    pub fn new<T>(command: &str, data: T) -> ClientResult<Self>
    where
        T: Serialize,
    {
        let data = serde_json::to_value(data)
            .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
        Ok(Self {
            ok: true,
            command: command.to_string(),
            version: API_VERSION.to_string(),
            data,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub ok: bool,
    pub error: ErrorContract,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorContract {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
}

impl From<&ClientError> for FailureEnvelope {
    fn from(error: &ClientError) -> Self {
        Self {
            ok: false,
            error: ErrorContract {
                code: error.code.clone(),
                message: error.message.clone(),
                recovery_steps: error.recovery_steps.clone(),
            },
            data: error.data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{FailureEnvelope, SuccessEnvelope};
    use crate::ClientError;

    #[test]
    fn success_wraps_serialized_data() {
        let envelope = SuccessEnvelope::new("years", json!({ "years": [2025, 2024] }));
        assert!(envelope.is_ok());
        if let Ok(envelope) = envelope {
            assert!(envelope.ok);
            assert_eq!(envelope.command, "years");
            assert_eq!(envelope.data["years"], json!([2025, 2024]));
        }
    }

    #[test]
    fn failure_keeps_code_and_data() {
        let envelope = FailureEnvelope::from(&ClientError::invalid_amount("ten"));
        assert!(!envelope.ok);
        assert_eq!(envelope.error.code, "invalid_amount");
        assert!(envelope.data.is_some());

        let encoded = serde_json::to_value(&envelope);
        assert!(encoded.is_ok());
        if let Ok(value) = encoded {
            assert_eq!(value["error"]["recovery_steps"].as_array().map(Vec::len), Some(3));
        }
    }

    #[test]
    fn failure_without_data_omits_the_field() {
        let envelope = FailureEnvelope::from(&ClientError::invalid_argument("bad"));
        let encoded = serde_json::to_value(&envelope);
        assert!(encoded.is_ok());
        if let Ok(value) = encoded {
            assert!(value.get("data").is_none());
        }
    }
}
