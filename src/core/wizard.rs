use thiserror::Error;
use tracing::warn;

use super::selection::SelectionSet;

/// Screens of the registration wizard, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Selection,
    Form,
    Confirmation,
}

impl WizardStep {
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Selection => "Course Selection",
            WizardStep::Form => "Registration Form",
            WizardStep::Confirmation => "Registration Confirmed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Toggle,
    Advance,
    Back,
    Submit,
    Restart,
}

impl std::fmt::Display for WizardAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WizardAction::Toggle => "toggle",
            WizardAction::Advance => "advance",
            WizardAction::Back => "back",
            WizardAction::Submit => "submit",
            WizardAction::Restart => "restart",
        };
        f.write_str(name)
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WizardStep::Selection => "selection",
            WizardStep::Form => "form",
            WizardStep::Confirmation => "confirmation",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("select at least one course before continuing")]
    EmptySelection,

    #[error("cannot {action} from the {step} step")]
    InvalidTransition {
        step: WizardStep,
        action: WizardAction,
    },

    #[error("registration submission failed: {0}")]
    SubmissionFailed(String),
}

/// Handle for one in-flight submission. A completion or failure only applies
/// when the token's epoch still matches the wizard's; cancelling bumps the
/// epoch so a late result is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionToken {
    epoch: u64,
}

/// State machine for the training-registration flow:
/// `Selection -> Form -> Confirmation`, with reset back to `Selection`.
///
/// The hosting UI only ever offers legal actions; an `InvalidTransition`
/// reaching a caller indicates a key-handling bug, not a user mistake.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: WizardStep,
    selection: SelectionSet,
    submission_in_flight: bool,
    epoch: u64,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_submitting(&self) -> bool {
        self.submission_in_flight
    }

    /// Toggle a course in or out of the selection. Legal only on the
    /// selection screen.
    pub fn toggle_course(&mut self, id: &str) -> Result<(), WizardError> {
        if self.step != WizardStep::Selection {
            return Err(self.illegal(WizardAction::Toggle));
        }
        self.selection = self.selection.toggle(id);
        Ok(())
    }

    /// `Selection -> Form`. Fails without a state change when nothing is
    /// selected.
    pub fn advance(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Selection {
            return Err(self.illegal(WizardAction::Advance));
        }
        if self.selection.is_empty() {
            return Err(WizardError::EmptySelection);
        }
        self.step = WizardStep::Form;
        Ok(())
    }

    /// `Form -> Selection`, selection preserved.
    pub fn back(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Form {
            return Err(self.illegal(WizardAction::Back));
        }
        self.step = WizardStep::Selection;
        Ok(())
    }

    /// Begin an asynchronous submission from the form screen.
    ///
    /// Returns `Ok(None)` while a submission is already in flight: pressing
    /// submit twice performs exactly one underlying call.
    pub fn begin_submit(&mut self) -> Result<Option<SubmissionToken>, WizardError> {
        if self.step != WizardStep::Form {
            return Err(self.illegal(WizardAction::Submit));
        }
        if self.submission_in_flight {
            return Ok(None);
        }
        self.submission_in_flight = true;
        Ok(Some(SubmissionToken { epoch: self.epoch }))
    }

    /// Apply a resolved submission: `Form -> Confirmation`. Returns false for
    /// a stale token (superseded by `cancel_submission`), in which case
    /// nothing changes.
    pub fn complete_submit(&mut self, token: SubmissionToken) -> bool {
        if !self.token_current(token) {
            return false;
        }
        self.submission_in_flight = false;
        self.step = WizardStep::Confirmation;
        true
    }

    /// Apply a rejected submission: stay on the form, ready to retry.
    /// Returns false for a stale token.
    pub fn fail_submit(&mut self, token: SubmissionToken) -> bool {
        if !self.token_current(token) {
            return false;
        }
        self.submission_in_flight = false;
        true
    }

    /// Best-effort cancellation when the wizard is abandoned mid-submission.
    /// The in-flight task keeps running, but its result no longer applies.
    pub fn cancel_submission(&mut self) {
        if self.submission_in_flight {
            self.epoch += 1;
            self.submission_in_flight = false;
        }
    }

    /// `Confirmation -> Selection` with an empty selection.
    pub fn restart(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Confirmation {
            return Err(self.illegal(WizardAction::Restart));
        }
        self.step = WizardStep::Selection;
        self.selection = self.selection.cleared();
        Ok(())
    }

    fn token_current(&self, token: SubmissionToken) -> bool {
        self.submission_in_flight && token.epoch == self.epoch
    }

    fn illegal(&self, action: WizardAction) -> WizardError {
        warn!("illegal wizard transition: {action} from {}", self.step);
        WizardError::InvalidTransition {
            step: self.step,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(ids: &[&str]) -> Wizard {
        let mut wizard = Wizard::new();
        for id in ids {
            wizard.toggle_course(id).unwrap();
        }
        wizard
    }

    #[test]
    fn advance_requires_selection() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.advance(), Err(WizardError::EmptySelection));
        assert_eq!(wizard.step(), WizardStep::Selection);

        let mut wizard = selected(&["UT"]);
        assert!(wizard.advance().is_ok());
        assert_eq!(wizard.step(), WizardStep::Form);
    }

    #[test]
    fn back_preserves_selection() {
        let mut wizard = selected(&["UT", "RT"]);
        wizard.advance().unwrap();
        wizard.back().unwrap();
        assert_eq!(wizard.step(), WizardStep::Selection);
        let order: Vec<&str> = wizard.selection().iter().collect();
        assert_eq!(order, vec!["UT", "RT"]);
    }

    #[test]
    fn double_submit_is_single_flight() {
        let mut wizard = selected(&["UT"]);
        wizard.advance().unwrap();

        let first = wizard.begin_submit().unwrap();
        assert!(first.is_some());
        // Second press while in flight: no second underlying call.
        let second = wizard.begin_submit().unwrap();
        assert!(second.is_none());
    }

    #[test]
    fn full_registration_scenario() {
        let mut wizard = selected(&["UT", "RT"]);
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), WizardStep::Form);

        let token = wizard.begin_submit().unwrap().unwrap();
        assert!(wizard.is_submitting());
        assert!(wizard.complete_submit(token));
        assert_eq!(wizard.step(), WizardStep::Confirmation);
        assert!(!wizard.is_submitting());
        let order: Vec<&str> = wizard.selection().iter().collect();
        assert_eq!(order, vec!["UT", "RT"]);
    }

    #[test]
    fn failed_submit_stays_on_form() {
        let mut wizard = selected(&["MT"]);
        wizard.advance().unwrap();
        let token = wizard.begin_submit().unwrap().unwrap();
        assert!(wizard.fail_submit(token));
        assert_eq!(wizard.step(), WizardStep::Form);
        assert!(!wizard.is_submitting());
        // Retry is a fresh submission.
        assert!(wizard.begin_submit().unwrap().is_some());
    }

    #[test]
    fn cancelled_submission_discards_late_completion() {
        let mut wizard = selected(&["VT"]);
        wizard.advance().unwrap();
        let token = wizard.begin_submit().unwrap().unwrap();

        wizard.cancel_submission();
        assert!(!wizard.is_submitting());

        // The task resolves after cancellation: its transition must not apply.
        assert!(!wizard.complete_submit(token));
        assert_eq!(wizard.step(), WizardStep::Form);
    }

    #[test]
    fn restart_resets_to_empty_selection() {
        let mut wizard = selected(&["UT", "RT"]);
        wizard.advance().unwrap();
        let token = wizard.begin_submit().unwrap().unwrap();
        wizard.complete_submit(token);

        wizard.restart().unwrap();
        assert_eq!(wizard.step(), WizardStep::Selection);
        assert!(wizard.selection().is_empty());
    }

    #[test]
    fn illegal_transitions_are_rejected() {
        let mut wizard = Wizard::new();
        assert!(matches!(
            wizard.back(),
            Err(WizardError::InvalidTransition {
                step: WizardStep::Selection,
                action: WizardAction::Back,
            })
        ));
        assert!(matches!(
            wizard.restart(),
            Err(WizardError::InvalidTransition { .. })
        ));
        assert!(matches!(
            wizard.begin_submit(),
            Err(WizardError::InvalidTransition { .. })
        ));

        let mut wizard = selected(&["UT"]);
        wizard.advance().unwrap();
        assert!(matches!(
            wizard.toggle_course("RT"),
            Err(WizardError::InvalidTransition { .. })
        ));
    }
}
