//! Flow container / navigation controller.
//!
//! Owns the draft and the current step index. Forward navigation is gated by
//! the active step's validator; backward navigation and review-driven jumps
//! are not. The draft object survives the whole flow instance: steps observe
//! and compound each other's writes, and nothing is dropped on navigation.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::api::SignupApi;
use crate::error::{Error, Result};
use crate::validators::{ValidationErrors, ValidationOutcome};

use super::draft::{Draft, fields};
use super::step::{FlowConfiguration, StepDescriptor, StepGate, StepId};

/// Outcome of one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The active validator failed; the index did not change and the
    /// failure messages are available via `errors()`.
    Blocked,
    /// Moved forward to the given step index.
    Moved(usize),
    /// The last step passed its gate and the flow was submitted.
    Submitted,
}

/// State machine over step indices `0..N-1` plus the implicit terminal
/// submitted state.
pub struct FlowController {
    id: Uuid,
    config: FlowConfiguration,
    draft: Draft,
    index: usize,
    errors: ValidationErrors,
    submitted: bool,
}

impl FlowController {
    /// Start a flow instance. The draft is seeded with the configuration's
    /// role and jurisdiction, both visible to every later step.
    pub fn new(config: FlowConfiguration) -> Self {
        let draft = Draft::seeded(config.role, config.jurisdiction);
        Self {
            id: Uuid::new_v4(),
            config,
            draft,
            index: 0,
            errors: ValidationErrors::default(),
            submitted: false,
        }
    }

    pub fn config(&self) -> &FlowConfiguration {
        &self.config
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Mutable access for the review layer's reconciliation writes. Steps
    /// themselves go through `update_draft`; nobody gets a copy.
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_step(&self) -> &StepDescriptor {
        &self.config.steps[self.index]
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Shallow-merge a partial field set into the draft. Fields absent from
    /// the partial keep their prior value; the inline error for each touched
    /// field is cleared.
    pub fn update_draft(&mut self, partial: Map<String, Value>) {
        for field in partial.keys() {
            self.errors.clear_field(field);
        }
        self.draft.merge(partial);
    }

    /// Run the active step's gate and move forward on success.
    ///
    /// On a validation failure the error set is replaced wholesale and the
    /// index stays put. On success at the last step the flow is submitted;
    /// otherwise navigation moves to the next step whose skip rule does not
    /// apply. The review step is never skipped.
    pub async fn advance(&mut self, api: &dyn SignupApi) -> Result<Advance> {
        if self.submitted {
            return Ok(Advance::Submitted);
        }

        let step = &self.config.steps[self.index];
        if let StepGate::Check(validator) = step.gate {
            match validator.run(&self.draft, self.config.jurisdiction) {
                ValidationOutcome::Pass => {
                    self.errors = ValidationErrors::default();
                }
                ValidationOutcome::Fail(errors) => {
                    tracing::debug!(
                        flow = %self.id,
                        step = %step.id,
                        failures = errors.len(),
                        "advance blocked by validator"
                    );
                    self.errors = errors;
                    return Ok(Advance::Blocked);
                }
            }
        }

        let last = self.config.steps.len() - 1;
        if self.index == last {
            self.submit(api).await?;
            return Ok(Advance::Submitted);
        }

        let mut next = self.index + 1;
        while next < last && self.config.steps[next].skip.applies(&self.draft) {
            tracing::debug!(flow = %self.id, step = %self.config.steps[next].id, "skipping step");
            next += 1;
        }
        self.index = next;
        Ok(Advance::Moved(next))
    }

    /// Move back one step. No validation gate; clamped at the first step.
    pub fn retreat(&mut self) -> usize {
        self.index = self.index.saturating_sub(1);
        self.index
    }

    /// Jump directly to a named step without running intervening validators.
    /// Used by the review step's edit links; returning to review afterwards
    /// is the caller's responsibility. Returns false for a step the flow
    /// does not contain.
    pub fn jump_to(&mut self, id: StepId) -> bool {
        match self.config.position_of(id) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }

    /// Final submission: save the role-detail record (create or update,
    /// depending on whether a record id is already cached), then post the
    /// full draft. A failure leaves the draft and index intact for retry.
    async fn submit(&mut self, api: &dyn SignupApi) -> Result<()> {
        if let Some(kind) = self.config.role.record_kind() {
            let user_id = self
                .draft
                .str_field(fields::USER_ID)
                .ok_or(Error::MissingIdentity)?
                .to_string();
            let record_id = self
                .draft
                .str_field(kind.record_id_field())
                .map(str::to_string);
            let payload = kind.detail_payload(&self.draft);

            let saved = api
                .save_role_record(kind, &user_id, record_id.as_deref(), &payload)
                .await?;
            self.draft.set(kind.record_id_field(), saved.id);
        }

        api.submit_registration(&self.draft).await?;
        self.submitted = true;
        tracing::info!(flow = %self.id, role = %self.config.role, "flow submitted");
        Ok(())
    }
}
