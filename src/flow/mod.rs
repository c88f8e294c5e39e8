//! Signup flow core — configuration model, draft state, and navigation.
//!
//! A flow instance is created when the user picks a role and jurisdiction:
//! the [`registry`] resolves the ordered step list, the [`controller`] seeds
//! a [`Draft`] with that pair and drives navigation, and every step reads
//! and writes the same draft until final submission.

pub mod controller;
pub mod draft;
pub mod model;
pub mod registry;
pub mod step;

pub use controller::{Advance, FlowController};
pub use draft::{Draft, fields};
pub use model::{Jurisdiction, Role, RoleRecordKind};
pub use registry::get_signup_config;
pub use step::{FlowConfiguration, SkipRule, StepDescriptor, StepGate, StepId};
