//! Signup Flow Engine — multi-role, multi-jurisdiction onboarding wizard core.
//!
//! Four actor types (candidate, hiring contact, company, school) register
//! through a jurisdiction-specific sequence of steps. The engine maps a
//! (role, jurisdiction) pair to an ordered step list with per-step
//! validators, drives forward/back navigation over a single accumulating
//! [`flow::Draft`], and reconciles locally-held draft data with records the
//! backend already holds before final submission.
//!
//! Presentation, marketing pages, chat, and persistence are external
//! collaborators reached through the [`api::SignupApi`] contract.

pub mod api;
pub mod config;
pub mod error;
pub mod flow;
pub mod review;
pub mod session;
pub mod steps;
pub mod validators;

pub use error::{Error, Result};
pub use flow::registry::get_signup_config;
