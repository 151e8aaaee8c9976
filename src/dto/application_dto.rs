use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Body of `POST /apply`. Every field is optional at the wire level so that a
/// missing field is reported by name instead of as a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub experience_level: Option<String>,
    pub language: Option<String>,
    pub availability: Option<String>,
    /// Accepts any JSON scalar; it is coerced to text before storage.
    pub motivation: Option<JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub status: String,
    pub id: i64,
}

impl SubmissionResponse {
    pub fn success(id: i64) -> Self {
        Self {
            status: "success".to_string(),
            id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}
