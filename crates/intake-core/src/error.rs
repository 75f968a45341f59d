#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("invalid birth date '{value}': {source}")]
    InvalidBirthDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("birth date {birth_date} is after {today}")]
    BirthDateInFuture {
        birth_date: chrono::NaiveDate,
        today: chrono::NaiveDate,
    },
    #[error("invalid date override '{value}': {source}")]
    InvalidDateOverride {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("action log schema mismatch at {path}: {source}")]
    ActionLog {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize form state: {0}")]
    Serialization(serde_json::Error),
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
