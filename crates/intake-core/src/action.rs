//! Action vocabulary accepted by [`crate::FormStore::dispatch`].
//!
//! Actions also have a JSON wire form so a session can be recorded and replayed:
//!
//! ```json
//! [
//!   { "type": "UPDATE_VITALS", "payload": { "weight": "70", "height": "175" } },
//!   { "type": "CALCULATE_BMI" },
//!   { "type": "SET_STEP", "payload": 2 }
//! ]
//! ```
//!
//! Unknown `type` tags parse to [`FormAction::Unrecognized`], which the reducer ignores.

use crate::form::{DocumentsPatch, PatientPatch, ReferralPatch, VitalsPatch};
use crate::{IntakeError, IntakeResult};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormAction {
    /// Move the cursor. Raw integer; the reducer clamps it and refuses forward skips.
    SetStep(i64),
    UpdatePatient(PatientPatch),
    UpdateReferral(ReferralPatch),
    UpdateVitals(VitalsPatch),
    UpdateDocuments(DocumentsPatch),
    CalculateBmi,
    /// Restore the snapshot captured when the store was built.
    ResetForm,
    /// Mark the form complete (or not) once the collaborator's validation has passed.
    SetComplete(bool),
    #[serde(other)]
    Unrecognized,
}

impl FormAction {
    /// Short name used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            FormAction::SetStep(..) => "set_step",
            FormAction::UpdatePatient(..) => "update_patient",
            FormAction::UpdateReferral(..) => "update_referral",
            FormAction::UpdateVitals(..) => "update_vitals",
            FormAction::UpdateDocuments(..) => "update_documents",
            FormAction::CalculateBmi => "calculate_bmi",
            FormAction::ResetForm => "reset_form",
            FormAction::SetComplete(..) => "set_complete",
            FormAction::Unrecognized => "unrecognized",
        }
    }
}

/// Parse a recorded action log (a JSON array of actions).
///
/// Uses `serde_path_to_error` so schema errors name the failing element of the log (for
/// example `2` for the third action).
///
/// # Errors
///
/// Returns [`IntakeError::ActionLog`] if the text is not valid JSON, is not an array, or
/// any action payload does not match its schema.
pub fn parse_action_log(json_text: &str) -> IntakeResult<Vec<FormAction>> {
    let mut deserializer = serde_json::Deserializer::from_str(json_text);

    match serde_path_to_error::deserialize::<_, Vec<FormAction>>(&mut deserializer) {
        Ok(actions) => Ok(actions),
        Err(err) => {
            let path = err.path().to_string();
            let path = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            Err(IntakeError::ActionLog {
                path,
                source: err.into_inner(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_action_log() {
        let input = r#"[
            { "type": "UPDATE_VITALS", "payload": { "weight": "70", "height": "175" } },
            { "type": "CALCULATE_BMI" },
            { "type": "SET_STEP", "payload": 2 },
            { "type": "UPDATE_REFERRAL", "payload": { "personalHistory": ["asthma"] } },
            { "type": "SET_COMPLETE", "payload": true },
            { "type": "RESET_FORM" }
        ]"#;

        let actions = parse_action_log(input).expect("valid log");
        assert_eq!(actions.len(), 6);
        assert_eq!(
            actions[0],
            FormAction::UpdateVitals(VitalsPatch {
                weight: Some("70".into()),
                height: Some("175".into()),
                ..VitalsPatch::default()
            })
        );
        assert_eq!(actions[1], FormAction::CalculateBmi);
        assert_eq!(actions[2], FormAction::SetStep(2));
        assert_eq!(actions[4], FormAction::SetComplete(true));
        assert_eq!(actions[5], FormAction::ResetForm);
    }

    #[test]
    fn unknown_type_parses_as_unrecognized() {
        let actions = parse_action_log(r#"[{ "type": "OPEN_MODAL" }]"#).expect("valid log");
        assert_eq!(actions, vec![FormAction::Unrecognized]);
    }

    #[test]
    fn schema_mismatch_reports_path() {
        let input = r#"[
            { "type": "CALCULATE_BMI" },
            { "type": "UPDATE_VITALS", "payload": { "heartRate": 110 } }
        ]"#;

        let err = parse_action_log(input).expect_err("heartRate must be a string");
        match err {
            IntakeError::ActionLog { path, source } => {
                assert!(path.contains('1'), "unexpected path {path}");
                assert!(source.to_string().contains("string"));
            }
            other => panic!("expected ActionLog error, got {other:?}"),
        }
    }

    #[test]
    fn payload_key_carries_patch_and_step() {
        let input = r#"[
            { "type": "UPDATE_VITALS", "payload": { "weight": "70" } },
            { "type": "UPDATE_DOCUMENTS", "payload": { "professionalName": "Dr. Rivera" } },
            { "type": "SET_STEP", "payload": 3 }
        ]"#;

        let actions = parse_action_log(input).expect("payload form parses");
        assert_eq!(
            actions[0],
            FormAction::UpdateVitals(VitalsPatch {
                weight: Some("70".into()),
                ..VitalsPatch::default()
            })
        );
        assert_eq!(
            actions[1],
            FormAction::UpdateDocuments(DocumentsPatch {
                professional_name: Some("Dr. Rivera".into()),
                ..DocumentsPatch::default()
            })
        );
        assert_eq!(actions[2], FormAction::SetStep(3));
    }

    #[test]
    fn variant_keys_without_payload_are_rejected() {
        let err = parse_action_log(r#"[{ "type": "SET_STEP", "step": 2 }]"#)
            .expect_err("data must sit under payload");
        assert!(matches!(err, IntakeError::ActionLog { .. }));
    }

    #[test]
    fn non_array_log_is_rejected() {
        let err = parse_action_log(r#"{ "type": "RESET_FORM" }"#).expect_err("not an array");
        assert!(matches!(err, IntakeError::ActionLog { .. }));
    }

    #[test]
    fn serialises_with_type_tag() {
        let json = serde_json::to_string(&FormAction::SetStep(3)).expect("serialise");
        assert_eq!(json, r#"{"type":"SET_STEP","payload":3}"#);
        assert_eq!(FormAction::CalculateBmi.kind(), "calculate_bmi");
    }
}
