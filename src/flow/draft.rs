//! The Draft — the single mutable form-state object for one flow instance.
//!
//! Every step of a flow reads and writes the same draft; fields are flat
//! camelCase keys matching the backend wire contract, not namespaced per
//! step. Once a field is written, only the owning step (or an explicit
//! override by the reconciliation layer) normally overwrites it, and
//! navigation never resets or drops fields.

use serde_json::{Map, Value};

use super::model::{Jurisdiction, Role};

/// Draft field keys shared across steps and the wire contract.
pub mod fields {
    pub const ROLE: &str = "role";
    pub const JURISDICTION: &str = "jurisdiction";
    /// Role embedded in a prior authentication response.
    pub const AUTH_ROLE: &str = "authRole";
    /// Role embedded in a prior registration response.
    pub const REGISTERED_ROLE: &str = "registeredRole";
    /// User id established when the personal information step registers the
    /// account. Keys all later role-detail saves and fetches.
    pub const USER_ID: &str = "userId";

    // Document capture
    pub const LIVE_PHOTO: &str = "livePhoto";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const DATE_OF_BIRTH: &str = "dateOfBirth";

    // Personal information
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const SKIP_PHONE: &str = "skipPhone";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";

    // Work history / education
    pub const WORK_HISTORY: &str = "workHistory";
    pub const HAS_NO_WORK_HISTORY: &str = "hasNoWorkHistory";
    pub const EDUCATION: &str = "education";

    // Organization details
    pub const ORG_NAME: &str = "orgName";
    pub const ORG_EMAIL: &str = "orgEmail";
    pub const ORG_WEBSITE: &str = "orgWebsite";
    pub const CIN: &str = "cin";
    pub const GSTIN: &str = "gstin";
    pub const FOUNDED_MONTH: &str = "foundedMonth";
    pub const FOUNDED_YEAR: &str = "foundedYear";
    pub const ORG_RECORD_ID: &str = "orgRecordId";

    // Institution details
    pub const INSTITUTION_NAME: &str = "institutionName";
    pub const FOUNDING_YEAR: &str = "foundingYear";
    pub const DESCRIPTION: &str = "description";
    pub const POSTAL_ADDRESS: &str = "postalAddress";
    pub const FOUNDING_DATE: &str = "foundingDate";
    pub const INSTITUTION_RECORD_ID: &str = "institutionRecordId";

    // Review
    pub const TERMS_ACCEPTED: &str = "termsAccepted";
}

/// The accumulating form state shared by reference across all steps of one
/// flow instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    values: Map<String, Value>,
}

impl Draft {
    /// Create a draft seeded with the role and jurisdiction chosen at flow
    /// creation. Both remain visible to every later step and to final
    /// submission.
    pub fn seeded(role: Role, jurisdiction: Jurisdiction) -> Self {
        let mut draft = Self::default();
        draft.set(fields::ROLE, role.to_string());
        draft.set(fields::JURISDICTION, jurisdiction.to_string());
        draft
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// String value of a field, trimmed; `None` when absent, non-string, or
    /// blank. Validators treat blank and absent identically.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        match self.values.get(field).and_then(Value::as_str) {
            Some(s) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }

    /// Boolean value of a field; absent or non-boolean reads as false.
    pub fn bool_field(&self, field: &str) -> bool {
        self.values
            .get(field)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Array value of a field, if present.
    pub fn array_field(&self, field: &str) -> Option<&Vec<Value>> {
        self.values.get(field).and_then(Value::as_array)
    }

    /// Whether the field has a usable value (present, non-null, non-blank).
    pub fn is_set(&self, field: &str) -> bool {
        match self.values.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.values.insert(field.to_string(), value.into());
    }

    /// Shallow-merge a partial field set into the draft. Fields absent from
    /// the partial retain their prior value; nothing is ever removed.
    pub fn merge(&mut self, partial: Map<String, Value>) {
        for (key, value) in partial {
            self.values.insert(key, value);
        }
    }

    /// Merge a fetched record into the draft, writing only fields not
    /// already locally set. Used by the reconciliation layer so a backend
    /// record never clobbers local edits.
    pub fn merge_missing(&mut self, record: &Map<String, Value>) {
        for (key, value) in record {
            if !self.is_set(key) {
                self.values.insert(key.clone(), value.clone());
            }
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.str_field(fields::ROLE).and_then(Role::from_wire)
    }

    /// The full draft as a JSON object, the shape of the registration
    /// payload.
    pub fn to_payload(&self) -> Value {
        Value::Object(self.values.clone())
    }
}
