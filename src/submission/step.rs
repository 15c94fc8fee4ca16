use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StepError {
    #[error("wizard step {0} does not exist, expected 1, 2 or 3")]
    OutOfRange(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Questions = 1,
    FileUpload = 2,
    Review = 3,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::Questions,
        WizardStep::FileUpload,
        WizardStep::Review,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Questions => "Questions",
            WizardStep::FileUpload => "File Upload",
            WizardStep::Review => "Review",
        }
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = StepError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(WizardStep::Questions),
            2 => Ok(WizardStep::FileUpload),
            3 => Ok(WizardStep::Review),
            other => Err(StepError::OutOfRange(other)),
        }
    }
}

/// What a step indicator shows relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMark {
    Complete,
    Active,
    Pending,
}

/// Tracks the current wizard step.
///
/// Every step is reachable from every other one; nothing here checks whether
/// the earlier steps are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepController {
    current: WizardStep,
}

impl Default for StepController {
    fn default() -> Self {
        Self {
            current: WizardStep::Questions,
        }
    }
}

impl StepController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    pub fn jump_to(&mut self, step: WizardStep) {
        self.current = step;
    }

    /// "Next" button; stays on the last step.
    pub fn next(&mut self) {
        if let Ok(step) = WizardStep::try_from(self.current.index() + 1) {
            self.current = step;
        }
    }

    /// "Back" button; stays on the first step.
    pub fn previous(&mut self) {
        if let Ok(step) = WizardStep::try_from(self.current.index() - 1) {
            self.current = step;
        }
    }

    pub fn mark(&self, step: WizardStep) -> StepMark {
        match self.current.cmp(&step) {
            std::cmp::Ordering::Greater => StepMark::Complete,
            std::cmp::Ordering::Equal => StepMark::Active,
            std::cmp::Ordering::Less => StepMark::Pending,
        }
    }

    pub fn indicators(&self) -> [(WizardStep, StepMark); 3] {
        WizardStep::ALL.map(|step| (step, self.mark(step)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_questions() {
        assert_eq!(StepController::new().current(), WizardStep::Questions);
    }

    #[test]
    fn jumps_straight_to_review() {
        let mut steps = StepController::new();
        steps.jump_to(WizardStep::Review);
        assert_eq!(steps.current(), WizardStep::Review);

        steps.jump_to(WizardStep::Questions);
        assert_eq!(steps.current(), WizardStep::Questions);
    }

    #[test]
    fn next_and_previous_saturate() {
        let mut steps = StepController::new();
        steps.previous();
        assert_eq!(steps.current(), WizardStep::Questions);

        steps.next();
        steps.next();
        steps.next();
        assert_eq!(steps.current(), WizardStep::Review);

        steps.previous();
        assert_eq!(steps.current(), WizardStep::FileUpload);
    }

    #[test]
    fn indicator_marks_follow_current_step() {
        let mut steps = StepController::new();
        steps.jump_to(WizardStep::FileUpload);

        assert_eq!(
            steps.indicators(),
            [
                (WizardStep::Questions, StepMark::Complete),
                (WizardStep::FileUpload, StepMark::Active),
                (WizardStep::Review, StepMark::Pending),
            ]
        );
    }

    #[test]
    fn rejects_unknown_step_numbers() {
        assert_eq!(WizardStep::try_from(3), Ok(WizardStep::Review));
        assert_eq!(WizardStep::try_from(0), Err(StepError::OutOfRange(0)));
        assert_eq!(WizardStep::try_from(4), Err(StepError::OutOfRange(4)));
    }
}
