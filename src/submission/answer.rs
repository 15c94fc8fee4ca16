use serde::{Deserialize, Deserializer, Serialize};

use super::question::QuestionId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: QuestionId,

    /// free text, or the selected option id for multiple choice
    #[serde(alias = "option")]
    pub value: String,
}

/// Answers for one question category, at most one entry per question.
///
/// "No answer" is the absence of an entry, never an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet(Vec<Answer>);

impl<'de> Deserialize<'de> for AnswerSet {
    /// Entries are replayed through `record_text`: later duplicates win and
    /// blank values are dropped.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut answers = AnswerSet::new();
        for answer in Vec::<Answer>::deserialize(deserializer)? {
            answers.record_text(answer.question_id, answer.value);
        }
        Ok(answers)
    }
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a text answer. A blank value removes the question's entry.
    pub fn record_text(&mut self, question_id: impl Into<QuestionId>, value: impl Into<String>) {
        let question_id = question_id.into();
        let value = value.into();

        self.remove(&question_id);
        if !value.trim().is_empty() {
            self.0.push(Answer { question_id, value });
        }
    }

    /// Records the selected option. Selection always writes an entry.
    pub fn record_choice(
        &mut self,
        question_id: impl Into<QuestionId>,
        option_id: impl Into<String>,
    ) {
        let question_id = question_id.into();

        self.remove(&question_id);
        self.0.push(Answer {
            question_id,
            value: option_id.into(),
        });
    }

    pub fn get(&self, question_id: &QuestionId) -> Option<&Answer> {
        self.0.iter().find(|a| &a.question_id == question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Answer> {
        self.0.iter()
    }

    fn remove(&mut self, question_id: &QuestionId) {
        self.0.retain(|a| &a.question_id != question_id);
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = &'a Answer;
    type IntoIter = std::slice::Iter<'a, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
