//! Intake form state and per-step partial updates.
//!
//! [`FormState`] is the aggregate a form session works on. It owns four independent
//! sub-aggregates, one per data-entry step, plus the step cursor and a completion flag.
//!
//! Each sub-aggregate has a matching `*Patch` type whose fields are all optional. The
//! `merge_*` functions apply a patch as a shallow merge: every field present in the patch
//! replaces the current value, every absent field is kept.
//!
//! Measurements are kept as the strings the user typed. Only `bmi` and `age` are numbers,
//! and both are derived.

use crate::constants::DATE_FORMAT;
use crate::{IntakeError, IntakeResult};
use chrono::NaiveDate;
use intake_types::{AttachmentHandle, Step};
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub current_step: Step,
    pub patient: PatientInfo,
    pub referral: ReferralInfo,
    pub vitals: VitalSigns,
    pub documents: ClinicalDocuments,
    pub is_complete: bool,
}

impl FormState {
    /// Blank form on step 1 with the consultation date defaulted to `today`.
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            referral: ReferralInfo {
                consultation_date: today.format(DATE_FORMAT).to_string(),
                ..ReferralInfo::default()
            },
            ..Self::default()
        }
    }

    /// Render the snapshot as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> IntakeResult<String> {
        serde_json::to_string_pretty(self).map_err(IntakeError::Serialization)
    }
}

/// Step 1: identification, demographics, insurance and contact details.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    pub document_type: String,
    pub document_number: String,
    pub first_names: String,
    pub last_names: String,
    /// `YYYY-MM-DD`.
    pub birth_date: String,
    /// Derived from `birth_date` on request.
    pub age: Option<u32>,
    pub sex: String,
    pub nationality: String,
    pub insurance_provider: String,
    pub insurance_plan: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub attachments: Vec<AttachmentHandle>,
}

/// Step 2: consultation metadata, diagnosis and history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralInfo {
    pub consultation_date: String,
    pub specialty: String,
    pub referring_facility: String,
    pub priority: String,
    pub reason: String,
    pub primary_diagnosis: String,
    pub diagnosis_code: String,
    pub secondary_diagnoses: String,
    /// Checked history items. Order carries no meaning.
    pub personal_history: Vec<String>,
    pub surgical_history: String,
    pub family_history: String,
    pub allergies: String,
    pub current_medications: String,
}

/// Step 3: physiological measurements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    pub systolic_pressure: String,
    pub diastolic_pressure: String,
    pub heart_rate: String,
    pub respiratory_rate: String,
    pub temperature: String,
    pub oxygen_saturation: String,
    /// Kilograms.
    pub weight: String,
    /// Centimetres.
    pub height: String,
    pub glucose: String,
    /// Derived by `CalculateBmi`, never entered by hand.
    pub bmi: f64,
    pub attachments: Vec<AttachmentHandle>,
}

/// Steps 4 and 5: free-text notes, referring professional and attached files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalDocuments {
    pub clinical_notes: String,
    pub observations: String,
    pub professional_name: String,
    pub professional_id: String,
    pub professional_specialty: String,
    pub attachments: Vec<AttachmentHandle>,
}

// ============================================================================
// Patches
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PatientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentHandle>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ReferralPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referring_facility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_diagnoses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_history: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surgical_history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_medications: Option<String>,
}

/// Partial vitals update. `bmi` is deliberately absent: it is only written by `CalculateBmi`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct VitalsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub systolic_pressure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diastolic_pressure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glucose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentHandle>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DocumentsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentHandle>>,
}

// ============================================================================
// Merge functions
// ============================================================================

fn pick<T: Clone>(update: &Option<T>, current: &T) -> T {
    update.as_ref().unwrap_or(current).clone()
}

pub fn merge_patient(current: &PatientInfo, patch: &PatientPatch) -> PatientInfo {
    PatientInfo {
        document_type: pick(&patch.document_type, &current.document_type),
        document_number: pick(&patch.document_number, &current.document_number),
        first_names: pick(&patch.first_names, &current.first_names),
        last_names: pick(&patch.last_names, &current.last_names),
        birth_date: pick(&patch.birth_date, &current.birth_date),
        age: patch.age.or(current.age),
        sex: pick(&patch.sex, &current.sex),
        nationality: pick(&patch.nationality, &current.nationality),
        insurance_provider: pick(&patch.insurance_provider, &current.insurance_provider),
        insurance_plan: pick(&patch.insurance_plan, &current.insurance_plan),
        address: pick(&patch.address, &current.address),
        city: pick(&patch.city, &current.city),
        phone: pick(&patch.phone, &current.phone),
        email: pick(&patch.email, &current.email),
        emergency_contact_name: pick(
            &patch.emergency_contact_name,
            &current.emergency_contact_name,
        ),
        emergency_contact_phone: pick(
            &patch.emergency_contact_phone,
            &current.emergency_contact_phone,
        ),
        attachments: pick(&patch.attachments, &current.attachments),
    }
}

pub fn merge_referral(current: &ReferralInfo, patch: &ReferralPatch) -> ReferralInfo {
    ReferralInfo {
        consultation_date: pick(&patch.consultation_date, &current.consultation_date),
        specialty: pick(&patch.specialty, &current.specialty),
        referring_facility: pick(&patch.referring_facility, &current.referring_facility),
        priority: pick(&patch.priority, &current.priority),
        reason: pick(&patch.reason, &current.reason),
        primary_diagnosis: pick(&patch.primary_diagnosis, &current.primary_diagnosis),
        diagnosis_code: pick(&patch.diagnosis_code, &current.diagnosis_code),
        secondary_diagnoses: pick(&patch.secondary_diagnoses, &current.secondary_diagnoses),
        personal_history: pick(&patch.personal_history, &current.personal_history),
        surgical_history: pick(&patch.surgical_history, &current.surgical_history),
        family_history: pick(&patch.family_history, &current.family_history),
        allergies: pick(&patch.allergies, &current.allergies),
        current_medications: pick(&patch.current_medications, &current.current_medications),
    }
}

pub fn merge_vitals(current: &VitalSigns, patch: &VitalsPatch) -> VitalSigns {
    VitalSigns {
        systolic_pressure: pick(&patch.systolic_pressure, &current.systolic_pressure),
        diastolic_pressure: pick(&patch.diastolic_pressure, &current.diastolic_pressure),
        heart_rate: pick(&patch.heart_rate, &current.heart_rate),
        respiratory_rate: pick(&patch.respiratory_rate, &current.respiratory_rate),
        temperature: pick(&patch.temperature, &current.temperature),
        oxygen_saturation: pick(&patch.oxygen_saturation, &current.oxygen_saturation),
        weight: pick(&patch.weight, &current.weight),
        height: pick(&patch.height, &current.height),
        glucose: pick(&patch.glucose, &current.glucose),
        bmi: current.bmi,
        attachments: pick(&patch.attachments, &current.attachments),
    }
}

pub fn merge_documents(current: &ClinicalDocuments, patch: &DocumentsPatch) -> ClinicalDocuments {
    ClinicalDocuments {
        clinical_notes: pick(&patch.clinical_notes, &current.clinical_notes),
        observations: pick(&patch.observations, &current.observations),
        professional_name: pick(&patch.professional_name, &current.professional_name),
        professional_id: pick(&patch.professional_id, &current.professional_id),
        professional_specialty: pick(
            &patch.professional_specialty,
            &current.professional_specialty,
        ),
        attachments: pick(&patch.attachments, &current.attachments),
    }
}
