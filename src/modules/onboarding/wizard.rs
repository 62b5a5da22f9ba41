use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Linear onboarding sequence. No branching: forward and back only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Welcome,
    Interests,
    Activities,
    Complete,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("at least one interest must be selected")]
    NoInterestSelected,
    #[error("onboarding is already complete")]
    AlreadyComplete,
    #[error("onboarding is not complete yet")]
    NotComplete,
}

/// Accumulated selections handed to the persistence hook at the terminal
/// step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingSelections {
    pub interests: Vec<String>,
    pub activities: Vec<String>,
}

/// Explicit wizard value object with pure transitions, so the flow is
/// testable without any rendering or session plumbing.
///
/// Backward navigation never clears downstream selections: going back from
/// `activities` and forward again finds the activity selection intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingWizard {
    step: OnboardingStep,
    interests: Vec<String>,
    activities: Vec<String>,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self {
            step: OnboardingStep::Welcome,
            interests: Vec::new(),
            activities: Vec::new(),
        }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn activities(&self) -> &[String] {
        &self.activities
    }

    pub fn is_complete(&self) -> bool {
        self.step == OnboardingStep::Complete
    }

    /// Add or remove an interest tag. Selection order is preserved.
    pub fn toggle_interest(&mut self, id: &str) {
        toggle(&mut self.interests, id);
    }

    pub fn toggle_activity(&mut self, id: &str) {
        toggle(&mut self.activities, id);
    }

    /// Move one step forward.
    ///
    /// The `interests → activities` transition is guarded: it requires a
    /// non-empty interest selection and leaves the state untouched when the
    /// guard fails. The `activities → complete` transition is deliberately
    /// unguarded — an empty activity selection is a valid skip path.
    pub fn advance(&mut self) -> Result<OnboardingStep, WizardError> {
        let next = match self.step {
            OnboardingStep::Welcome => OnboardingStep::Interests,
            OnboardingStep::Interests => {
                if self.interests.is_empty() {
                    return Err(WizardError::NoInterestSelected);
                }
                OnboardingStep::Activities
            }
            OnboardingStep::Activities => OnboardingStep::Complete,
            OnboardingStep::Complete => return Err(WizardError::AlreadyComplete),
        };
        self.step = next;
        Ok(next)
    }

    /// Move one step back, retaining every selection already made. A no-op
    /// at the initial step.
    pub fn back(&mut self) -> OnboardingStep {
        self.step = match self.step {
            OnboardingStep::Welcome | OnboardingStep::Interests => OnboardingStep::Welcome,
            OnboardingStep::Activities => OnboardingStep::Interests,
            OnboardingStep::Complete => OnboardingStep::Activities,
        };
        self.step
    }

    /// Terminal action: yield the accumulated selections for persistence.
    /// The wizard itself never writes them anywhere.
    pub fn finish(self) -> Result<OnboardingSelections, WizardError> {
        if self.step != OnboardingStep::Complete {
            return Err(WizardError::NotComplete);
        }
        Ok(OnboardingSelections {
            interests: self.interests,
            activities: self.activities,
        })
    }
}

fn toggle(selection: &mut Vec<String>, id: &str) {
    if let Some(index) = selection.iter().position(|s| s == id) {
        selection.remove(index);
    } else {
        selection.push(id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_reaches_complete_and_yields_selections() {
        let mut wizard = OnboardingWizard::new();
        assert_eq!(wizard.step(), OnboardingStep::Welcome);

        wizard.advance().unwrap();
        wizard.toggle_interest("recycling");
        wizard.toggle_interest("nature");
        wizard.advance().unwrap();
        wizard.toggle_activity("tree-planting");
        wizard.advance().unwrap();
        assert!(wizard.is_complete());

        let selections = wizard.finish().unwrap();
        assert_eq!(selections.interests, vec!["recycling", "nature"]);
        assert_eq!(selections.activities, vec!["tree-planting"]);
    }

    #[test]
    fn advancing_from_interests_without_selection_leaves_state_unchanged() {
        let mut wizard = OnboardingWizard::new();
        wizard.advance().unwrap();
        assert_eq!(wizard.advance(), Err(WizardError::NoInterestSelected));
        assert_eq!(wizard.step(), OnboardingStep::Interests);
    }

    #[test]
    fn empty_activity_selection_is_a_valid_skip() {
        let mut wizard = OnboardingWizard::new();
        wizard.advance().unwrap();
        wizard.toggle_interest("water");
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        let selections = wizard.finish().unwrap();
        assert!(selections.activities.is_empty());
    }

    #[test]
    fn back_navigation_is_non_destructive() {
        let mut wizard = OnboardingWizard::new();
        wizard.advance().unwrap();
        wizard.toggle_interest("transport");
        wizard.advance().unwrap();
        wizard.toggle_activity("bike-tour");

        // activities -> interests -> activities keeps the activity selection.
        wizard.back();
        assert_eq!(wizard.step(), OnboardingStep::Interests);
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), OnboardingStep::Activities);
        assert_eq!(wizard.activities(), ["bike-tour"]);
        assert_eq!(wizard.interests(), ["transport"]);
    }

    #[test]
    fn back_at_welcome_is_a_no_op() {
        let mut wizard = OnboardingWizard::new();
        assert_eq!(wizard.back(), OnboardingStep::Welcome);
        assert_eq!(wizard.step(), OnboardingStep::Welcome);
    }

    #[test]
    fn toggling_twice_removes_the_selection() {
        let mut wizard = OnboardingWizard::new();
        wizard.toggle_interest("energy");
        wizard.toggle_interest("energy");
        assert!(wizard.interests().is_empty());
    }

    #[test]
    fn finish_requires_the_terminal_step() {
        let mut wizard = OnboardingWizard::new();
        wizard.advance().unwrap();
        wizard.toggle_interest("garden");
        assert_eq!(wizard.clone().finish(), Err(WizardError::NotComplete));

        wizard.advance().unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.advance(), Err(WizardError::AlreadyComplete));
        assert!(wizard.finish().is_ok());
    }
}
