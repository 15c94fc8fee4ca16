use super::{
    answer::AnswerSet,
    draft::{Attachment, SubmissionDraft},
    question::{Assignment, QuestionId, QuestionKind},
    review::SubmissionReview,
    step::{StepController, WizardStep},
};

/// One run of the submission wizard for a single assignment.
#[derive(Debug, Clone)]
pub struct Wizard {
    assignment: Assignment,
    draft: SubmissionDraft,
    steps: StepController,
}

impl Wizard {
    pub fn new(assignment: Assignment) -> Self {
        Self::with_draft(assignment, SubmissionDraft::new())
    }

    /// Starts from an existing draft. Its text answers are re-recorded so the
    /// question limits apply to them too.
    pub fn with_draft(assignment: Assignment, draft: SubmissionDraft) -> Self {
        let SubmissionDraft {
            essay_answers,
            multiple_choice_answers,
            short_answers,
            file,
        } = draft;

        let mut wizard = Self {
            assignment,
            draft: SubmissionDraft {
                multiple_choice_answers,
                file,
                ..SubmissionDraft::new()
            },
            steps: StepController::new(),
        };

        for answer in &essay_answers {
            wizard.answer_text(QuestionKind::Essay, answer.question_id.clone(), &answer.value);
        }
        for answer in &short_answers {
            wizard.answer_text(QuestionKind::Short, answer.question_id.clone(), &answer.value);
        }

        wizard
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    pub fn answers(&self, kind: QuestionKind) -> &AnswerSet {
        self.draft.answers(kind)
    }

    pub fn step(&self) -> WizardStep {
        self.steps.current()
    }

    pub fn steps(&self) -> &StepController {
        &self.steps
    }

    pub fn set_step(&mut self, step: WizardStep) {
        self.steps.jump_to(step);
    }

    pub fn next_step(&mut self) {
        self.steps.next();
    }

    pub fn previous_step(&mut self) {
        self.steps.previous();
    }

    pub fn answer_essay(&mut self, question_id: impl Into<QuestionId>, value: &str) {
        self.answer_text(QuestionKind::Essay, question_id.into(), value);
    }

    pub fn answer_short(&mut self, question_id: impl Into<QuestionId>, value: &str) {
        self.answer_text(QuestionKind::Short, question_id.into(), value);
    }

    pub fn choose(&mut self, question_id: impl Into<QuestionId>, option_id: impl Into<String>) {
        self.draft
            .multiple_choice_answers
            .record_choice(question_id, option_id);
    }

    pub fn attach(&mut self, file: Attachment) {
        self.draft.file = Some(file);
    }

    pub fn detach(&mut self) {
        self.draft.file = None;
    }

    pub fn review(&self) -> SubmissionReview<'_> {
        SubmissionReview::new(&self.draft, &self.assignment)
    }

    /// Hands the draft over, e.g. to the API client after a successful submit.
    pub fn into_draft(self) -> SubmissionDraft {
        self.draft
    }

    fn answer_text(&mut self, kind: QuestionKind, question_id: QuestionId, value: &str) {
        let limit = self
            .assignment
            .find_question(kind, &question_id)
            .and_then(|q| q.max_length);

        let value = match limit {
            Some(max) if value.chars().count() > max => value.chars().take(max).collect(),
            _ => value.to_string(),
        };

        self.draft.answers_mut(kind).record_text(question_id, value);
    }
}
