//! The request/response contract with the backend.
//!
//! The engine only ever talks to persistence through [`SignupApi`]; the flow
//! controller, step components, and review layer all take the trait object,
//! so tests substitute an in-memory implementation.

mod http;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::flow::draft::Draft;
use crate::flow::model::{Jurisdiction, Role, RoleRecordKind};

pub use http::HttpSignupApi;

/// Structured fields the extraction service pulled out of captured
/// documents (names, date of birth, identifier numbers).
#[derive(Debug, Clone, Default)]
pub struct ExtractedDocument {
    pub fields: Map<String, Value>,
}

/// Result of registering the account at the personal-information step.
#[derive(Debug, Clone)]
pub struct AccountReceipt {
    /// The user id that keys all later role-detail saves and fetches.
    pub user_id: String,
    /// Role the backend registered, when it echoes one.
    pub role: Option<Role>,
}

/// A role-detail record as returned by a create or update.
#[derive(Debug, Clone)]
pub struct SavedRecord {
    pub id: String,
    pub fields: Map<String, Value>,
}

/// A previously persisted organization or institution record. Read-only to
/// the review layer unless the user re-enters the corresponding step.
#[derive(Debug, Clone)]
pub struct PersistedRoleRecord {
    pub id: String,
    pub fields: Map<String, Value>,
}

/// Backend operations the signup flow needs. One in-flight request per flow
/// instance; callers guard re-entry, no cancellation.
#[async_trait]
pub trait SignupApi: Send + Sync {
    /// Send captured document images for OCR/extraction. The returned fields
    /// feed the draft; the document validator re-checks them afterwards.
    async fn extract_document(
        &self,
        jurisdiction: Jurisdiction,
        capture: &Map<String, Value>,
    ) -> Result<ExtractedDocument, ApiError>;

    /// Create the account from the personal-information fields. Establishes
    /// the user id the rest of the flow keys on.
    async fn register_account(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<AccountReceipt, ApiError>;

    /// Create (no record id) or update (record id present) a role-detail
    /// record for the given user.
    async fn save_role_record(
        &self,
        kind: RoleRecordKind,
        user_id: &str,
        record_id: Option<&str>,
        payload: &Map<String, Value>,
    ) -> Result<SavedRecord, ApiError>;

    /// Fetch the persisted role record for a user, if any. Absence is an
    /// empty state, not an error.
    async fn fetch_role_record(
        &self,
        kind: RoleRecordKind,
        user_id: &str,
    ) -> Result<Option<PersistedRoleRecord>, ApiError>;

    /// Final submission: the full draft as one payload.
    async fn submit_registration(&self, draft: &Draft) -> Result<(), ApiError>;
}
