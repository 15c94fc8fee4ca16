mod answer;
mod draft;
mod question;
mod review;
mod step;
mod wizard;

pub use answer::{Answer, AnswerSet};
pub use draft::{Attachment, SubmissionDraft};
pub use question::{Assignment, Question, QuestionId, QuestionKind, QuestionOption};
pub use review::{QuestionReview, ReviewWarning, SubmissionReview, NOT_ANSWERED};
pub use step::{StepController, StepError, StepMark, WizardStep};
pub use wizard::Wizard;
