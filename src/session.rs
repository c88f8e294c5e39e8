//! Process-local session storage.
//!
//! Holds whatever the auth and registration responses returned. The bearer
//! token is resolved by falling back through the historically-named response
//! fields older backend versions used, newest first.

use secrecy::SecretString;
use serde_json::{Map, Value};

/// Token field names, in resolution priority order. Older backends returned
/// `jwt` or `authToken`; current ones return `accessToken`.
pub const TOKEN_FIELDS: [&str; 4] = ["accessToken", "token", "jwt", "authToken"];

/// In-memory session values for one signup session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    values: Map<String, Value>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the recognized fields out of an auth or registration response.
    /// Unrecognized fields are ignored; recognized ones overwrite.
    pub fn absorb(&mut self, response: &Value) {
        let Some(object) = response.as_object() else {
            return;
        };
        for key in TOKEN_FIELDS.iter().chain(["role", "userId"].iter()) {
            if let Some(value) = object.get(*key) {
                if !value.is_null() {
                    self.values.insert((*key).to_string(), value.clone());
                }
            }
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key).and_then(Value::as_str) {
            Some(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Resolve the bearer token, falling back through [`TOKEN_FIELDS`].
    /// First non-empty wins.
    pub fn bearer_token(&self) -> Option<SecretString> {
        TOKEN_FIELDS
            .iter()
            .find_map(|field| self.get_str(field))
            .map(|token| SecretString::from(token.to_string()))
    }
}
