//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into [`crate::FormStore::new`].
//! Nothing in the store reads environment variables while dispatching actions; the only
//! ambient input, the current date, comes from the configured [`Clock`].

use crate::constants::DATE_FORMAT;
use crate::{IntakeError, IntakeResult};
use chrono::NaiveDate;
use std::sync::Arc;

/// Source of "today" for the consultation date default and the age calculator.
pub trait Clock: std::fmt::Debug + Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the local calendar date of the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Intake configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct IntakeConfig {
    clock: Arc<dyn Clock>,
}

impl IntakeConfig {
    /// Create a new `IntakeConfig` using the given clock.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Configuration pinned to a single date, handy for replays and tests.
    pub fn fixed(today: NaiveDate) -> Self {
        Self::new(Arc::new(FixedClock(today)))
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

/// Parse a `YYYY-MM-DD` date supplied as a configuration override.
pub fn parse_date_override(value: &str) -> IntakeResult<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|source| {
        IntakeError::InvalidDateOverride {
            value: trimmed.to_string(),
            source,
        }
    })
}

/// Resolve the clock from an optional `INTAKE_TODAY` value.
///
/// If `value` is `None` or empty/whitespace, the system clock is used.
pub fn clock_from_env_value(value: Option<String>) -> IntakeResult<Arc<dyn Clock>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(v) => Ok(Arc::new(FixedClock(parse_date_override(&v)?))),
        None => Ok(Arc::new(SystemClock)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn env_value_pins_the_clock() {
        let clock = clock_from_env_value(Some(" 2024-01-10 ".into())).expect("valid override");
        assert_eq!(clock.today(), date(2024, 1, 10));
    }

    #[test]
    fn blank_env_value_falls_back_to_system_clock() {
        let clock = clock_from_env_value(Some("   ".into())).expect("blank is ignored");
        assert_eq!(format!("{clock:?}"), "SystemClock");

        let clock = clock_from_env_value(None).expect("unset is ignored");
        assert_eq!(format!("{clock:?}"), "SystemClock");
    }

    #[test]
    fn malformed_env_value_is_rejected() {
        let err = clock_from_env_value(Some("10/01/2024".into())).expect_err("wrong format");
        match err {
            IntakeError::InvalidDateOverride { value, .. } => assert_eq!(value, "10/01/2024"),
            other => panic!("expected InvalidDateOverride, got {other:?}"),
        }
    }

    #[test]
    fn fixed_config_reports_its_date() {
        let cfg = IntakeConfig::fixed(date(2025, 3, 1));
        assert_eq!(cfg.today(), date(2025, 3, 1));
        assert_eq!(cfg.clock().today(), date(2025, 3, 1));
    }
}
