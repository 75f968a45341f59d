//! Constants used throughout the intake core crate.

/// Date format used for birth dates, the consultation date and date overrides.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Environment variable that pins "today" for a session (`YYYY-MM-DD`).
pub const TODAY_ENV_VAR: &str = "INTAKE_TODAY";

/// Number of decimals kept when rounding the body-mass index.
pub const BMI_DECIMALS: i32 = 1;

/// Centimetres per metre, heights are entered in centimetres.
pub const CM_PER_METRE: f64 = 100.0;
