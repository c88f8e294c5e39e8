//! Step descriptors and flow configurations.

use serde::{Deserialize, Serialize};

use crate::validators::Validator;

use super::draft::{Draft, fields};
use super::model::{Jurisdiction, Role};

/// The step types the platform defines. Ids are unique within a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    DocumentCapture,
    PersonalInfo,
    WorkHistory,
    Education,
    OrgDetails,
    InstitutionDetails,
    Review,
}

impl StepId {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DocumentCapture => "Identity documents",
            Self::PersonalInfo => "Personal information",
            Self::WorkHistory => "Work history",
            Self::Education => "Education",
            Self::OrgDetails => "Organization details",
            Self::InstitutionDetails => "Institution details",
            Self::Review => "Review & submit",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::DocumentCapture => "document_capture",
            Self::PersonalInfo => "personal_info",
            Self::WorkHistory => "work_history",
            Self::Education => "education",
            Self::OrgDetails => "org_details",
            Self::InstitutionDetails => "institution_details",
            Self::Review => "review",
        };
        write!(f, "{s}")
    }
}

/// Whether advancing past a step is gated by a validator.
///
/// `Open` is an explicit no-validation marker, not an absent value: the
/// relaxed flows that permit unrestricted navigation are self-documenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepGate {
    Open,
    Check(Validator),
}

impl StepGate {
    pub fn is_open(&self) -> bool {
        matches!(self, StepGate::Open)
    }
}

/// Named skip rules, evaluated against the draft during forward navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipRule {
    Never,
    /// The candidate stated they have no prior work history.
    WorkHistoryWaived,
}

impl SkipRule {
    pub fn applies(&self, draft: &Draft) -> bool {
        match self {
            SkipRule::Never => false,
            SkipRule::WorkHistoryWaived => draft.bool_field(fields::HAS_NO_WORK_HISTORY),
        }
    }
}

/// One wizard step: id, label, validation gate, skip rule. Step order is
/// fixed at configuration time; only skip evaluation varies mid-flow.
#[derive(Debug, Clone)]
pub struct StepDescriptor {
    pub id: StepId,
    pub label: &'static str,
    pub gate: StepGate,
    pub skip: SkipRule,
}

impl StepDescriptor {
    pub fn gated(id: StepId, validator: Validator) -> Self {
        Self {
            id,
            label: id.label(),
            gate: StepGate::Check(validator),
            skip: SkipRule::Never,
        }
    }

    pub fn open(id: StepId) -> Self {
        Self {
            id,
            label: id.label(),
            gate: StepGate::Open,
            skip: SkipRule::Never,
        }
    }

    pub fn with_skip(mut self, skip: SkipRule) -> Self {
        self.skip = skip;
        self
    }
}

/// The full ordered step list for one (role, jurisdiction) pair. Constructed
/// once per flow instantiation, immutable thereafter.
#[derive(Debug, Clone)]
pub struct FlowConfiguration {
    pub role: Role,
    pub jurisdiction: Jurisdiction,
    pub steps: Vec<StepDescriptor>,
}

impl FlowConfiguration {
    pub fn position_of(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    pub fn step_ids(&self) -> Vec<StepId> {
        self.steps.iter().map(|step| step.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_rule_reads_the_draft() {
        let mut draft = Draft::seeded(Role::Candidate, Jurisdiction::India);
        assert!(!SkipRule::WorkHistoryWaived.applies(&draft));
        draft.set(fields::HAS_NO_WORK_HISTORY, true);
        assert!(SkipRule::WorkHistoryWaived.applies(&draft));
        assert!(!SkipRule::Never.applies(&draft));
    }

    #[test]
    fn step_id_display_matches_serde() {
        let ids = [
            StepId::DocumentCapture,
            StepId::PersonalInfo,
            StepId::WorkHistory,
            StepId::Education,
            StepId::OrgDetails,
            StepId::InstitutionDetails,
            StepId::Review,
        ];
        for id in ids {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(format!("\"{id}\""), json);
        }
    }
}
