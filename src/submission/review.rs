use std::fmt;

use serde::Serialize;

use super::{
    draft::SubmissionDraft,
    question::{Assignment, Question, QuestionKind},
};

pub const NOT_ANSWERED: &str = "Not answered";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewWarning {
    MissingRequiredFile,
    Incomplete { answered: usize, total: usize },
}

impl fmt::Display for ReviewWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewWarning::MissingRequiredFile => {
                write!(f, "this assignment requires a file upload, but no file is attached")
            }
            ReviewWarning::Incomplete { answered, total } => {
                write!(f, "only {} of {} questions are answered", answered, total)
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionReview<'a> {
    pub kind: QuestionKind,
    pub question: &'a Question,

    /// answer text, or the chosen option's text for multiple choice
    pub answer: Option<&'a str>,
}

impl<'a> QuestionReview<'a> {
    pub fn display_answer(&self) -> &'a str {
        self.answer.unwrap_or(NOT_ANSWERED)
    }
}

/// Read-only view over a draft and its assignment. Everything is computed on
/// demand.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionReview<'a> {
    draft: &'a SubmissionDraft,
    assignment: &'a Assignment,
}

impl<'a> SubmissionReview<'a> {
    pub fn new(draft: &'a SubmissionDraft, assignment: &'a Assignment) -> Self {
        Self { draft, assignment }
    }

    pub fn answered_count(&self) -> usize {
        QuestionKind::ALL
            .iter()
            .map(|kind| self.draft.answers(*kind).len())
            .sum()
    }

    pub fn total_count(&self) -> usize {
        self.assignment.total_questions()
    }

    /// Rounded percentage of answered questions, 0 for an assignment without
    /// questions.
    pub fn completion_percent(&self) -> u32 {
        let total = self.total_count();
        if total == 0 {
            return 0;
        }

        (100.0 * self.answered_count() as f64 / total as f64).round() as u32
    }

    pub fn question_reviews(&self) -> Vec<QuestionReview<'a>> {
        let (draft, assignment) = (self.draft, self.assignment);
        QuestionKind::ALL
            .iter()
            .flat_map(|&kind| {
                let answers = draft.answers(kind);
                assignment
                    .questions(kind)
                    .iter()
                    .map(move |question| QuestionReview {
                        kind,
                        question,
                        answer: answers.get(&question.id).map(|answer| match kind {
                            QuestionKind::MultipleChoice => question
                                .option(&answer.value)
                                .map_or(answer.value.as_str(), |o| o.text.as_str()),
                            _ => answer.value.as_str(),
                        }),
                    })
            })
            .collect()
    }

    pub fn has_file(&self) -> bool {
        self.draft.file.is_some()
    }

    /// Advisory warnings; none of them blocks submitting.
    pub fn warnings(&self) -> Vec<ReviewWarning> {
        let mut warnings = Vec::new();

        if self.assignment.requires_file_upload && !self.has_file() {
            warnings.push(ReviewWarning::MissingRequiredFile);
        }

        let (answered, total) = (self.answered_count(), self.total_count());
        if answered < total {
            warnings.push(ReviewWarning::Incomplete { answered, total });
        }

        warnings
    }
}

impl fmt::Display for SubmissionReview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.assignment.title)?;
        if !self.assignment.description.is_empty() {
            writeln!(f, "{}", self.assignment.description)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "answered {}/{} ({}%)",
            self.answered_count(),
            self.total_count(),
            self.completion_percent()
        )?;

        let mut section = None;
        for review in self.question_reviews() {
            if section != Some(review.kind) {
                writeln!(f, "\n[{}]", review.kind.label())?;
                section = Some(review.kind);
            }
            writeln!(f, "- {}", review.question.text)?;
            writeln!(f, "  > {}", review.display_answer())?;
        }

        match &self.draft.file {
            Some(file) => writeln!(f, "\nfile: {} ({} bytes)", file.name, file.size)?,
            None => writeln!(f, "\nfile: none")?,
        }

        for warning in self.warnings() {
            writeln!(f, "warning: {}", warning)?;
        }

        Ok(())
    }
}
