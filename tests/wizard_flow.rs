use std::fs;

use tugas::submission::{
    Assignment, QuestionKind, ReviewWarning, StepMark, SubmissionDraft, Wizard, WizardStep,
    NOT_ANSWERED,
};

const ASSIGNMENT: &str = r#"
title: Tugas IPA Minggu 3
description: Jawab semua pertanyaan
essayQuestions:
  - id: 1
    text: Jelaskan fotosintesis
  - id: 2
    text: Sebutkan manfaat air
multipleChoiceQuestions:
  - id: 10
    text: Planet terdekat dari matahari?
    options:
      - id: a
        text: Venus
      - id: b
        text: Merkurius
requiresFileUpload: true
"#;

fn assignment() -> Assignment {
    serde_yaml_ng::from_str(ASSIGNMENT).unwrap()
}

#[test]
fn student_answers_jumps_and_reviews() {
    let mut wizard = Wizard::new(assignment());

    wizard.answer_essay("1", "Tumbuhan membuat makanan dari cahaya");
    wizard.choose("10", "a");
    wizard.choose("10", "b");
    wizard.set_step(WizardStep::Review);

    assert_eq!(wizard.steps().mark(WizardStep::FileUpload), StepMark::Complete);
    assert_eq!(wizard.steps().mark(WizardStep::Review), StepMark::Active);

    let review = wizard.review();
    assert_eq!(review.answered_count(), 2);
    assert_eq!(review.total_count(), 3);
    assert_eq!(review.completion_percent(), 67);

    let reviews = review.question_reviews();
    let answers: Vec<&str> = reviews
        .iter()
        .map(|r| r.display_answer())
        .collect();
    assert_eq!(
        answers,
        vec!["Tumbuhan membuat makanan dari cahaya", NOT_ANSWERED, "Merkurius"]
    );

    assert_eq!(
        review.warnings(),
        vec![
            ReviewWarning::MissingRequiredFile,
            ReviewWarning::Incomplete {
                answered: 2,
                total: 3
            }
        ]
    );
}

#[test]
fn going_back_keeps_answers() {
    let mut wizard = Wizard::new(assignment());
    wizard.answer_essay("2", "minum");
    wizard.set_step(WizardStep::Review);
    wizard.previous_step();
    wizard.previous_step();

    assert_eq!(wizard.step(), WizardStep::Questions);
    assert_eq!(wizard.answers(QuestionKind::Essay).len(), 1);
}

#[test]
fn loaded_draft_respects_question_length_limit() {
    let mut assignment = assignment();
    assignment.essay_questions[0].max_length = Some(8);

    let dir = std::env::temp_dir().join(format!("tugas-flow-limit-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("draft.yaml");
    fs::write(
        &path,
        "essayAnswers:\n  - questionId: 1\n    value: Tumbuhan membuat makanan\n",
    )
    .unwrap();

    let draft = SubmissionDraft::load(&path).unwrap();
    let wizard = Wizard::with_draft(assignment, draft);

    let essay = wizard.answers(QuestionKind::Essay).get(&"1".into()).unwrap();
    assert_eq!(essay.value, "Tumbuhan");

    fs::remove_dir_all(dir).unwrap();
}
