//! Flow configuration registry.
//!
//! Maps a (role, jurisdiction) pair to its ordered step list. India and the
//! United States carry hand-curated tables (eight fixed combinations); every
//! other supported jurisdiction gets a generated configuration with the same
//! step shape, the document validator reading its jurisdiction-specific
//! requirements from the rule table at run time.

use crate::validators::Validator;

use super::model::{Jurisdiction, Role};
use super::step::{FlowConfiguration, SkipRule, StepDescriptor, StepId};

/// Resolve the flow configuration for a role and jurisdiction.
///
/// Total over the supported domain and deterministic: the same inputs always
/// yield a step list of identical shape (ids, order, count). The sole public
/// entry point into the registry.
pub fn get_signup_config(role: Role, jurisdiction: Jurisdiction) -> FlowConfiguration {
    let steps = match jurisdiction {
        Jurisdiction::India => india_steps(role),
        Jurisdiction::UnitedStates => united_states_steps(role),
        other => generated_steps(role, other),
    };
    FlowConfiguration {
        role,
        jurisdiction,
        steps,
    }
}

fn india_steps(role: Role) -> Vec<StepDescriptor> {
    match role {
        Role::Candidate => vec![
            StepDescriptor::gated(StepId::DocumentCapture, Validator::Document),
            StepDescriptor::gated(StepId::PersonalInfo, Validator::PersonalInfo),
            StepDescriptor::gated(StepId::WorkHistory, Validator::WorkHistory)
                .with_skip(SkipRule::WorkHistoryWaived),
            StepDescriptor::gated(StepId::Education, Validator::Education),
            StepDescriptor::gated(StepId::Review, Validator::Review),
        ],
        // The hiring-contact flow is deliberately relaxed: no validators on
        // any step, unrestricted forward/back navigation.
        Role::HiringContact => vec![
            StepDescriptor::open(StepId::DocumentCapture),
            StepDescriptor::open(StepId::PersonalInfo),
            StepDescriptor::open(StepId::OrgDetails),
            StepDescriptor::open(StepId::Review),
        ],
        Role::Company => vec![
            StepDescriptor::gated(StepId::DocumentCapture, Validator::Document),
            StepDescriptor::gated(StepId::PersonalInfo, Validator::PersonalInfo),
            StepDescriptor::gated(StepId::OrgDetails, Validator::OrgDetails),
            StepDescriptor::gated(StepId::Review, Validator::Review),
        ],
        Role::School => vec![
            StepDescriptor::gated(StepId::DocumentCapture, Validator::Document),
            StepDescriptor::gated(StepId::PersonalInfo, Validator::PersonalInfo),
            StepDescriptor::gated(StepId::InstitutionDetails, Validator::InstitutionDetails),
            StepDescriptor::gated(StepId::Review, Validator::Review),
        ],
    }
}

fn united_states_steps(role: Role) -> Vec<StepDescriptor> {
    match role {
        Role::Candidate => vec![
            StepDescriptor::gated(StepId::DocumentCapture, Validator::Document),
            StepDescriptor::gated(StepId::PersonalInfo, Validator::PersonalInfo),
            StepDescriptor::gated(StepId::WorkHistory, Validator::WorkHistory)
                .with_skip(SkipRule::WorkHistoryWaived),
            StepDescriptor::gated(StepId::Education, Validator::Education),
            StepDescriptor::gated(StepId::Review, Validator::Review),
        ],
        Role::HiringContact => vec![
            StepDescriptor::open(StepId::DocumentCapture),
            StepDescriptor::open(StepId::PersonalInfo),
            StepDescriptor::open(StepId::OrgDetails),
            StepDescriptor::open(StepId::Review),
        ],
        Role::Company => vec![
            StepDescriptor::gated(StepId::DocumentCapture, Validator::Document),
            StepDescriptor::gated(StepId::PersonalInfo, Validator::PersonalInfo),
            StepDescriptor::gated(StepId::OrgDetails, Validator::OrgDetails),
            StepDescriptor::gated(StepId::Review, Validator::Review),
        ],
        Role::School => vec![
            StepDescriptor::gated(StepId::DocumentCapture, Validator::Document),
            StepDescriptor::gated(StepId::PersonalInfo, Validator::PersonalInfo),
            StepDescriptor::gated(StepId::InstitutionDetails, Validator::InstitutionDetails),
            StepDescriptor::gated(StepId::Review, Validator::Review),
        ],
    }
}

/// Synthesize a configuration for a non-primary jurisdiction: same step
/// shape as the India table for that role, with the document validator
/// parameterized by jurisdiction through the rule table.
fn generated_steps(role: Role, jurisdiction: Jurisdiction) -> Vec<StepDescriptor> {
    tracing::debug!(%role, %jurisdiction, "generating flow configuration");
    india_steps(role)
}
