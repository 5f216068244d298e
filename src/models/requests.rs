//! Request DTOs for the HTTP API
//!
//! Defines incoming request bodies and path parameter validation.

use serde::Deserialize;
use serde_json::Value;

/// Placeholder rendered for login fields the client left out
const MISSING_FIELD: &str = "unknown";

/// Request body for POST /login
///
/// Every field is optional and may be any JSON value; the handler only
/// echoes them back inside a greeting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub gender: Option<Value>,
    #[serde(default)]
    pub city: Option<Value>,
    #[serde(default)]
    pub country: Option<Value>,
}

impl LoginRequest {
    /// Builds the greeting returned by the login endpoint.
    pub fn welcome_message(&self) -> String {
        format!(
            "Welcome, {}! Your age is {}, gender is {}, city is {} and country is {}.",
            field_text(&self.email),
            field_text(&self.age),
            field_text(&self.gender),
            field_text(&self.city),
            field_text(&self.country),
        )
    }
}

fn field_text(field: &Option<Value>) -> String {
    match field {
        None | Some(Value::Null) => MISSING_FIELD.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Parses a user id path segment.
///
/// Only integers >= 1 are accepted.
pub fn parse_user_id(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().filter(|id| *id >= 1)
}
