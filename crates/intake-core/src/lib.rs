//! # Intake Core
//!
//! State container for the multi-step patient intake form.
//!
//! This crate contains the form aggregate and everything that changes it:
//! - [`FormState`] and its per-step sub-aggregates, with shallow-merge patches
//! - [`FormAction`], the action vocabulary, and its JSON action-log form
//! - [`FormReducer`], the pure reduction function
//! - [`FormStore`], which owns the snapshot, notifies listeners and offers step navigation
//!   and the derived age/BMI calculators
//!
//! **No UI concerns**: rendering, uploads and persistence belong to the collaborators that
//! read snapshots and dispatch actions.

pub mod action;
pub mod config;
pub mod constants;
pub mod derived;
pub mod error;
pub mod form;
pub mod navigation;
pub mod reducer;
pub mod store;

pub use action::{parse_action_log, FormAction};
pub use config::{clock_from_env_value, Clock, FixedClock, IntakeConfig, SystemClock};
pub use derived::{age_on, parse_birth_date};
pub use error::{IntakeError, IntakeResult};
pub use form::{
    ClinicalDocuments, DocumentsPatch, FormState, PatientInfo, PatientPatch, ReferralInfo,
    ReferralPatch, VitalSigns, VitalsPatch,
};
pub use reducer::{compute_bmi, FormReducer};
pub use store::{FormStore, SubscriptionId};

// Re-export the validated value types so collaborators need a single dependency.
pub use intake_types::{AttachmentHandle, Step, TypesError};
