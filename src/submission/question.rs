use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identity of a question within an assignment.
///
/// The backend is not consistent about id types, so numbers and strings both
/// normalise to the same textual id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for QuestionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Integer(n) => Self(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: QuestionId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub text: String,

    /// choices, only present on multiple-choice questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuestionOption>>,

    /// character limit of the answer input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Question {
    pub fn option(&self, id: &str) -> Option<&QuestionOption> {
        self.options
            .as_deref()
            .and_then(|options| options.iter().find(|o| o.id.as_str() == id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Essay,
    MultipleChoice,
    Short,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 3] = [
        QuestionKind::Essay,
        QuestionKind::MultipleChoice,
        QuestionKind::Short,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Essay => "Essay",
            QuestionKind::MultipleChoice => "Multiple choice",
            QuestionKind::Short => "Short answer",
        }
    }
}

/// An assignment ("tugas") as served by the backend. Read-only on the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub essay_questions: Vec<Question>,

    #[serde(default)]
    pub multiple_choice_questions: Vec<Question>,

    #[serde(default)]
    pub short_questions: Vec<Question>,

    #[serde(default)]
    pub requires_file_upload: bool,
}

impl Assignment {
    pub fn questions(&self, kind: QuestionKind) -> &[Question] {
        match kind {
            QuestionKind::Essay => &self.essay_questions,
            QuestionKind::MultipleChoice => &self.multiple_choice_questions,
            QuestionKind::Short => &self.short_questions,
        }
    }

    pub fn total_questions(&self) -> usize {
        QuestionKind::ALL
            .iter()
            .map(|kind| self.questions(*kind).len())
            .sum()
    }

    pub fn find_question(&self, kind: QuestionKind, id: &QuestionId) -> Option<&Question> {
        self.questions(kind).iter().find(|q| &q.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_normalise() {
        let question: Question = serde_json::from_str(r#"{"id": 7, "text": "Why?"}"#).unwrap();
        assert_eq!(question.id, QuestionId::from("7"));

        let question: Question = serde_json::from_str(r#"{"id": "q1", "text": "Why?"}"#).unwrap();
        assert_eq!(question.id.as_str(), "q1");
    }

    #[test]
    fn missing_question_lists_default_to_empty() {
        let assignment: Assignment =
            serde_json::from_str(r#"{"title": "Tugas 1", "essayQuestions": [{"id": 1, "text": "a"}]}"#)
                .unwrap();

        assert_eq!(assignment.total_questions(), 1);
        assert!(assignment.multiple_choice_questions.is_empty());
        assert!(!assignment.requires_file_upload);
    }

    #[test]
    fn option_lookup_by_id() {
        let question: Question = serde_json::from_str(
            r#"{"id": "q1", "text": "Pick", "options": [{"id": "a", "text": "Alpha"}, {"id": "b", "text": "Beta"}]}"#,
        )
        .unwrap();

        assert_eq!(question.option("b").map(|o| o.text.as_str()), Some("Beta"));
        assert!(question.option("c").is_none());
    }
}
