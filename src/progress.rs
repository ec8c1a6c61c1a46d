//! Recommended progress step for the UI.

use apg_domain::FormStep;

/// Display state of one step in the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Active,
    Pending,
}

impl StepState {
    pub fn label(self) -> &'static str {
        match self {
            StepState::Completed => "completed",
            StepState::Active => "active",
            StepState::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTracker {
    current: FormStep,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self {
            current: FormStep::Profile,
        }
    }
}

impl ProgressTracker {
    pub fn current(&self) -> FormStep {
        self.current
    }

    pub fn set(&mut self, step: FormStep) {
        self.current = step;
    }

    /// Steps before the current one are completed, later ones pending.
    pub fn state_of(&self, step: FormStep) -> StepState {
        match step.number().cmp(&self.current.number()) {
            std::cmp::Ordering::Less => StepState::Completed,
            std::cmp::Ordering::Equal => StepState::Active,
            std::cmp::Ordering::Greater => StepState::Pending,
        }
    }

    pub fn states(&self) -> impl Iterator<Item = (FormStep, StepState)> + '_ {
        FormStep::ALL
            .into_iter()
            .map(move |step| (step, self.state_of(step)))
    }
}
