//! Derived fields: patient age and body-mass index.
//!
//! Neither value is recomputed automatically when its inputs change. A collaborator asks for
//! the calculation and the result is written back through an ordinary action.

use crate::action::FormAction;
use crate::constants::DATE_FORMAT;
use crate::form::PatientPatch;
use crate::store::FormStore;
use crate::{IntakeError, IntakeResult};
use chrono::{Datelike, NaiveDate};

/// Parse a `YYYY-MM-DD` birth date.
pub fn parse_birth_date(value: &str) -> IntakeResult<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|source| {
        IntakeError::InvalidBirthDate {
            value: trimmed.to_string(),
            source,
        }
    })
}

/// Whole years between `birth` and `today`.
///
/// One year is subtracted when this year's birthday has not been reached yet.
///
/// # Errors
///
/// Returns [`IntakeError::BirthDateInFuture`] when `birth` is after `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> IntakeResult<u32> {
    if birth > today {
        return Err(IntakeError::BirthDateInFuture {
            birth_date: birth,
            today,
        });
    }

    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }

    Ok(u32::try_from(years).unwrap_or(0))
}

impl FormStore {
    /// Compute the patient's age from `birth_date` and store it.
    ///
    /// Dispatches `UpdatePatient { age }` on success. Malformed or future dates leave the
    /// state untouched.
    pub fn calculate_age(&mut self, birth_date: &str) -> IntakeResult<u32> {
        let today = self.config().today();
        let age = match parse_birth_date(birth_date).and_then(|birth| age_on(birth, today)) {
            Ok(age) => age,
            Err(e) => {
                tracing::warn!(session = %self.session_id(), "age not calculated: {e}");
                return Err(e);
            }
        };

        self.dispatch(FormAction::UpdatePatient(PatientPatch {
            age: Some(age),
            ..PatientPatch::default()
        }));
        Ok(age)
    }

    /// Recompute `vitals.bmi` from the current weight and height.
    pub fn calculate_bmi(&mut self) -> f64 {
        self.dispatch(FormAction::CalculateBmi);
        self.state().vitals.bmi
    }
}
