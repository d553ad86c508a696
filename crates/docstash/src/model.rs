//! Typed views over stored documents.
//!
//! Documents cross the storage boundary as `serde_json::Value`; these types
//! pin down the shape each adapter accepts and returns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// User
// ============================================================================

/// A user record: an arbitrary JSON object addressed by its `id` field.
///
/// Fields other than `id` are opaque and stored verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User {
    fields: Map<String, Value>,
}

impl User {
    /// The record's `id`, if present and a string.
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl TryFrom<Value> for User {
    type Error = Value;

    /// Fails with the original value when it is not an object.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(other),
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// The settings document: any JSON object, replaced wholesale on write.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    fields: Map<String, Value>,
}

impl Settings {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl TryFrom<Value> for Settings {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(other),
        }
    }
}

/// Shape of the settings document materialized on first read.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultSettings {
    pub system_settings: SystemSettings,
    pub wallet_config: Map<String, Value>,
    pub welcome_page_template: Map<String, Value>,
    pub welcome_inbox_template: Map<String, Value>,
    pub chatbot_settings: Map<String, Value>,
    pub testimonials: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub recaptcha_enabled: bool,
    pub recaptcha_site_key: String,
    pub recaptcha_secret_key: String,
}

impl DefaultSettings {
    /// The default document as a JSON value.
    pub fn to_value(&self) -> Value {
        // Plain structs of maps, strings and bools always serialize.
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}
