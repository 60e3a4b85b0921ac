//! Envelope used by every endpoint of the POS admin API.
//!
//! ```json
//! { "status": { "code": "S", "description": "OK" }, "result": [ ... ] }
//! ```
//!
//! Any code other than `"S"` is a failure; the description is shown to the
//! user as-is.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status code of a successful call
pub const STATUS_SUCCESS: &str = "S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ApiStatus,
    pub result: Option<T>,
}

/// Errors produced while talking to the remote API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{description} (status {code})")]
    Status { code: String, description: String },

    #[error("Response was successful but carried no result")]
    MissingResult,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Could not read response: {0}")]
    Decode(String),
}

impl<T> ApiResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            status: ApiStatus {
                code: STATUS_SUCCESS.to_string(),
                description: String::new(),
            },
            result: Some(result),
        }
    }

    pub fn failure(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status: ApiStatus {
                code: code.into(),
                description: description.into(),
            },
            result: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.code == STATUS_SUCCESS
    }

    /// Unwrap the envelope, turning a non-"S" status into an error
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.is_success() {
            let description = if self.status.description.trim().is_empty() {
                "Request failed".to_string()
            } else {
                self.status.description
            };
            return Err(ApiError::Status {
                code: self.status.code,
                description,
            });
        }
        self.result.ok_or(ApiError::MissingResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_parses() {
        let json = r#"{"status":{"code":"S","description":"OK"},"result":[1,2,3]}"#;
        let resp: ApiResponse<Vec<i32>> = serde_json::from_str(json).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.into_result().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_failure_envelope_keeps_description() {
        let json = r#"{"status":{"code":"E","description":"Session expired"}}"#;
        let resp: ApiResponse<Vec<i32>> = serde_json::from_str(json).unwrap();
        let err = resp.into_result().unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                code: "E".into(),
                description: "Session expired".into()
            }
        );
        assert_eq!(err.to_string(), "Session expired (status E)");
    }

    #[test]
    fn test_blank_description_gets_default_text() {
        let resp: ApiResponse<()> = ApiResponse::failure("F", "  ");
        match resp.into_result() {
            Err(ApiError::Status { description, .. }) => assert_eq!(description, "Request failed"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_success_without_result() {
        let json = r#"{"status":{"code":"S"}}"#;
        let resp: ApiResponse<Vec<i32>> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_result(), Err(ApiError::MissingResult));
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        id: i64,
    }

    fn decode<T: serde::de::DeserializeOwned>(json: &str) -> ApiResponse<T> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_generic_decode_of_type_without_default() {
        let resp: ApiResponse<Vec<Item>> =
            decode(r#"{"status":{"code":"S"},"result":[{"id":4}]}"#);
        assert_eq!(resp.into_result().unwrap(), vec![Item { id: 4 }]);

        let resp: ApiResponse<Item> = decode(r#"{"status":{"code":"E","description":"Gone"}}"#);
        assert!(resp.result.is_none());
    }
}
