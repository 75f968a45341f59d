//! Small validated value types shared by the intake crates.
//!
//! - [`Step`]: the form cursor, always within `1..=5`.
//! - [`AttachmentHandle`]: an opaque, non-empty reference to an uploaded file.

/// Errors that can occur when creating validated intake types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypesError {
    /// The requested step is outside `Step::FIRST..=Step::LAST`
    #[error("step {0} is outside 1..=5")]
    StepOutOfRange(i64),
    /// The attachment handle was empty or contained only whitespace
    #[error("attachment handle cannot be empty")]
    EmptyHandle,
}

/// Position of the form cursor over the five intake steps.
///
/// A `Step` can only be built from a value in `1..=5`, so holding one is proof the
/// invariant holds. Serialised as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Step(u8);

impl Step {
    /// Patient identification.
    pub const FIRST: Step = Step(1);
    /// Attached documents and referring professional.
    pub const LAST: Step = Step(5);

    /// Creates a new `Step`, rejecting values outside `1..=5`.
    pub fn new(value: i64) -> Result<Self, TypesError> {
        if value < i64::from(Self::FIRST.0) || value > i64::from(Self::LAST.0) {
            return Err(TypesError::StepOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    /// Creates a `Step` from any integer by clamping it into `1..=5`.
    pub fn clamped(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::FIRST.0), i64::from(Self::LAST.0));
        Self(clamped as u8)
    }

    /// Returns the step number.
    pub fn get(self) -> u8 {
        self.0
    }

    /// The following step, or `None` on the last one.
    pub fn next(self) -> Option<Self> {
        (self < Self::LAST).then(|| Self(self.0 + 1))
    }

    /// The preceding step, or `None` on the first one.
    pub fn prev(self) -> Option<Self> {
        (self > Self::FIRST).then(|| Self(self.0 - 1))
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Step {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Step {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Step::new(value).map_err(serde::de::Error::custom)
    }
}

/// Opaque reference to a file attached to the form.
///
/// Upload mechanics live elsewhere; the store only keeps the handle. The input is
/// trimmed and must not be empty, nothing else is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttachmentHandle(String);

impl AttachmentHandle {
    /// Creates a new `AttachmentHandle` from the given input.
    ///
    /// # Returns
    ///
    /// Returns `Ok(AttachmentHandle)` if the trimmed input is non-empty,
    /// or `Err(TypesError::EmptyHandle)` otherwise.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypesError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypesError::EmptyHandle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner handle as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AttachmentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AttachmentHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for AttachmentHandle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for AttachmentHandle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AttachmentHandle::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_new_rejects_out_of_range() {
        assert_eq!(Step::new(0), Err(TypesError::StepOutOfRange(0)));
        assert_eq!(Step::new(6), Err(TypesError::StepOutOfRange(6)));
        assert_eq!(Step::new(3).map(Step::get), Ok(3));
    }

    #[test]
    fn step_clamped_stays_in_bounds() {
        assert_eq!(Step::clamped(-4), Step::FIRST);
        assert_eq!(Step::clamped(42), Step::LAST);
        assert_eq!(Step::clamped(2).get(), 2);
    }

    #[test]
    fn step_next_and_prev_stop_at_edges() {
        assert_eq!(Step::LAST.next(), None);
        assert_eq!(Step::FIRST.prev(), None);
        assert_eq!(Step::FIRST.next(), Step::new(2).ok());
        assert_eq!(Step::LAST.prev(), Step::new(4).ok());
    }

    #[test]
    fn step_deserialize_rejects_out_of_range() {
        let err = serde_json::from_str::<Step>("9").expect_err("9 is not a step");
        assert!(err.to_string().contains("outside 1..=5"));
        let step: Step = serde_json::from_str("4").expect("valid step");
        assert_eq!(step.get(), 4);
    }

    #[test]
    fn attachment_handle_trims_and_rejects_blank() {
        let handle = AttachmentHandle::new("  scan-001.pdf ").expect("valid handle");
        assert_eq!(handle.as_str(), "scan-001.pdf");
        assert_eq!(AttachmentHandle::new("   "), Err(TypesError::EmptyHandle));
    }
}
