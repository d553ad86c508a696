//! Wire types shared by the HTTP handlers and their tests.

use serde::{Deserialize, Serialize};

/// Response envelope returned by every `/api` route.
///
/// Successful responses carry `data` (when there is a result to return);
/// failures carry a human-readable `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl Envelope<()> {
    pub fn success(message: Option<String>) -> Self {
        Self {
            success: true,
            data: None,
            message,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Body of `POST /api/send-verification-code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendVerificationCodeRequest {
    pub email: String,
    pub code: String,
}
