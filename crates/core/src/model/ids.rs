use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a question, unique within a single quiz session.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for QuestionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_id_display() {
        let id = QuestionId::new("api-1700000000000-3");
        assert_eq!(id.to_string(), "api-1700000000000-3");
        assert_eq!(format!("{id:?}"), "QuestionId(api-1700000000000-3)");
    }

    #[test]
    fn test_question_id_from_conversions_agree() {
        let owned = QuestionId::from(String::from("local-7"));
        let borrowed = QuestionId::from("local-7");
        assert_eq!(owned, borrowed);
        assert_eq!(owned.as_str(), "local-7");
    }
}
