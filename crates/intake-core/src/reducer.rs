//! Pure reduction of [`FormAction`]s over [`FormState`].
//!
//! The reducer never performs I/O and never reads the clock: given the same initial
//! snapshot, state and action it always produces the same result, so a recorded action log
//! can be replayed exactly.
//!
//! Step guard: `SetStep` is ignored when the requested step lies more than one step past the
//! current cursor, checked on the raw value; anything below `1` clamps to the first step. The invariant holds whichever path the action
//! arrives through, and the navigation wrappers only add the stricter `go_to_step` rule.

use crate::action::FormAction;
use crate::constants::{BMI_DECIMALS, CM_PER_METRE};
use crate::form::{merge_documents, merge_patient, merge_referral, merge_vitals, FormState};
use intake_types::Step;
use std::sync::Arc;

/// Body-mass index from a weight in kilograms and a height in centimetres.
///
/// Both inputs are the raw strings from the form. Returns `0.0` unless both parse to
/// positive, finite numbers; otherwise the result is rounded to one decimal.
pub fn compute_bmi(weight_kg: &str, height_cm: &str) -> f64 {
    let parse = |raw: &str| {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
    };

    let (Some(weight), Some(height_cm)) = (parse(weight_kg), parse(height_cm)) else {
        return 0.0;
    };

    let height_m = height_cm / CM_PER_METRE;
    let bmi = weight / (height_m * height_m);
    if !bmi.is_finite() {
        return 0.0;
    }

    let factor = 10f64.powi(BMI_DECIMALS);
    (bmi * factor).round() / factor
}

/// Applies actions to form state. Holds the construction-time snapshot that `ResetForm`
/// restores.
#[derive(Clone, Debug)]
pub struct FormReducer {
    initial: Arc<FormState>,
}

impl FormReducer {
    pub fn new(initial: Arc<FormState>) -> Self {
        Self { initial }
    }

    pub fn initial(&self) -> &Arc<FormState> {
        &self.initial
    }

    /// Compute the state that follows `state` once `action` is applied.
    ///
    /// Unrecognised actions and refused step moves return an unchanged copy.
    pub fn reduce(&self, state: &FormState, action: &FormAction) -> FormState {
        match action {
            FormAction::SetStep(step) => {
                let limit = state.current_step.next().unwrap_or(Step::LAST);
                if *step > i64::from(limit.get()) {
                    tracing::debug!(
                        current = %state.current_step,
                        requested = step,
                        "ignoring forward skip"
                    );
                    return state.clone();
                }
                FormState {
                    current_step: Step::clamped(*step),
                    ..state.clone()
                }
            }
            FormAction::UpdatePatient(patch) => FormState {
                patient: merge_patient(&state.patient, patch),
                ..state.clone()
            },
            FormAction::UpdateReferral(patch) => FormState {
                referral: merge_referral(&state.referral, patch),
                ..state.clone()
            },
            FormAction::UpdateVitals(patch) => FormState {
                vitals: merge_vitals(&state.vitals, patch),
                ..state.clone()
            },
            FormAction::UpdateDocuments(patch) => FormState {
                documents: merge_documents(&state.documents, patch),
                ..state.clone()
            },
            FormAction::CalculateBmi => {
                let mut next = state.clone();
                next.vitals.bmi = compute_bmi(&state.vitals.weight, &state.vitals.height);
                next
            }
            FormAction::ResetForm => self.initial.as_ref().clone(),
            FormAction::SetComplete(complete) => FormState {
                is_complete: *complete,
                ..state.clone()
            },
            FormAction::Unrecognized => state.clone(),
        }
    }
}
