use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::{
    answer::{Answer, AnswerSet},
    question::QuestionKind,
};

/// Metadata of the file picked in the upload step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    pub size: u64,
    pub content_type: String,
}

impl Attachment {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let metadata =
            fs::metadata(path).context(format!("cannot read attachment {}", path.display()))?;
        if !metadata.is_file() {
            anyhow::bail!("attachment {} is not a file", path.display());
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .context(format!("attachment {} has no file name", path.display()))?
            .to_string();

        Ok(Self {
            content_type: content_type_for(&name).to_string(),
            name,
            size: metadata.len(),
        })
    }
}

fn content_type_for(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// In-memory answers of one wizard run. Never persisted by the wizard itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDraft {
    pub essay_answers: AnswerSet,
    pub multiple_choice_answers: AnswerSet,
    pub short_answers: AnswerSet,
    pub file: Option<Attachment>,
}

impl SubmissionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answers(&self, kind: QuestionKind) -> &AnswerSet {
        match kind {
            QuestionKind::Essay => &self.essay_answers,
            QuestionKind::MultipleChoice => &self.multiple_choice_answers,
            QuestionKind::Short => &self.short_answers,
        }
    }

    pub fn answers_mut(&mut self, kind: QuestionKind) -> &mut AnswerSet {
        match kind {
            QuestionKind::Essay => &mut self.essay_answers,
            QuestionKind::MultipleChoice => &mut self.multiple_choice_answers,
            QuestionKind::Short => &mut self.short_answers,
        }
    }

    /// Loads a hand-written draft (YAML or JSON). Relative attachment paths
    /// resolve against the draft file's directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content =
            fs::read_to_string(path).context(format!("failed to read draft {}", path.display()))?;
        let file: DraftFile = serde_yaml_ng::from_str(&content)
            .context(format!("draft {} is not valid YAML or JSON", path.display()))?;

        let mut draft = Self::new();
        for answer in file.essay_answers {
            draft.essay_answers.record_text(answer.question_id, answer.value);
        }
        for answer in file.multiple_choice_answers {
            draft
                .multiple_choice_answers
                .record_choice(answer.question_id, answer.value);
        }
        for answer in file.short_answers {
            draft.short_answers.record_text(answer.question_id, answer.value);
        }

        if let Some(attachment) = file.file {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            draft.file = Some(Attachment::from_path(&base.join(attachment))?);
        }

        Ok(draft)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftFile {
    #[serde(default)]
    essay_answers: Vec<Answer>,

    #[serde(default)]
    multiple_choice_answers: Vec<Answer>,

    #[serde(default)]
    short_answers: Vec<Answer>,

    /// path of the attachment
    #[serde(default)]
    file: Option<String>,
}
