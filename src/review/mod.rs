//! Review / reconciliation layer.
//!
//! On entering the final step the reviewer works out the effective role,
//! fetches the previously persisted organization or institution record
//! (at most once per flow instance), merges it into the draft without
//! clobbering local edits, and produces the per-step summaries whose edit
//! links route back through the controller's `jump_to`.

use serde::Serialize;

use crate::api::SignupApi;
use crate::error::{Error, Result};
use crate::flow::draft::{Draft, fields};
use crate::flow::model::Role;
use crate::flow::step::{FlowConfiguration, StepId};
use crate::steps::{SummaryEntry, renderer_for};

/// Aggregated summary of one prior step, with the step id to jump to for
/// editing.
#[derive(Debug, Clone, Serialize)]
pub struct StepSummary {
    pub step: StepId,
    pub title: &'static str,
    pub entries: Vec<SummaryEntry>,
}

/// Per-flow-instance review state. The two flags guard the record fetch:
/// `loading` blocks concurrent re-entry while a request is in flight,
/// `fetched` keeps repeated renders from re-fetching.
#[derive(Debug, Default)]
pub struct Reviewer {
    loading: bool,
    fetched: bool,
}

impl Reviewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The role this flow is effectively for, from fallback sources in
    /// priority order: the draft's own role field, then the role embedded in
    /// a prior authentication response, then the one from the registration
    /// response. First non-empty wins.
    pub fn effective_role(draft: &Draft) -> Option<Role> {
        [fields::ROLE, fields::AUTH_ROLE, fields::REGISTERED_ROLE]
            .iter()
            .find_map(|field| draft.str_field(field).and_then(Role::from_wire))
    }

    /// Reconcile the draft with the persisted role record, if the effective
    /// role has one and it is not already known locally.
    ///
    /// Issues at most one fetch per flow instance, keyed by the user id
    /// established during personal-information submission. Fetched fields
    /// are merged only where the draft has no local value, and the record id
    /// is cached on the draft so no future fetch is triggered. An absent
    /// record is an empty state; a failed fetch leaves the draft intact and
    /// may be retried.
    pub async fn reconcile(&mut self, draft: &mut Draft, api: &dyn SignupApi) -> Result<()> {
        if self.loading || self.fetched {
            return Ok(());
        }

        let Some(role) = Self::effective_role(draft) else {
            return Ok(());
        };
        let Some(kind) = role.record_kind() else {
            self.fetched = true;
            return Ok(());
        };
        if draft.is_set(kind.record_id_field()) {
            self.fetched = true;
            return Ok(());
        }

        let user_id = draft
            .str_field(fields::USER_ID)
            .ok_or(Error::MissingIdentity)?
            .to_string();

        self.loading = true;
        let result = api.fetch_role_record(kind, &user_id).await;
        self.loading = false;

        match result {
            Ok(Some(record)) => {
                draft.merge_missing(&record.fields);
                draft.set(kind.record_id_field(), record.id);
                self.fetched = true;
            }
            Ok(None) => {
                // Nothing persisted yet. Remember that we looked.
                self.fetched = true;
            }
            Err(error) => {
                tracing::warn!(%role, %error, "role record fetch failed");
                return Err(error.into());
            }
        }
        Ok(())
    }

    /// Human-readable summaries of every prior step, for the review screen.
    pub fn summaries(config: &FlowConfiguration, draft: &Draft) -> Vec<StepSummary> {
        config
            .steps
            .iter()
            .filter(|step| step.id != StepId::Review)
            .map(|step| StepSummary {
                step: step.id,
                title: step.label,
                entries: renderer_for(step.id).summary(draft),
            })
            .collect()
    }
}
