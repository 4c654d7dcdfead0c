/// Visual state of one step in the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Active,
    /// Behind the current step; clickable and keyboard-activatable.
    Completed,
}

pub trait StepIndicator {
    /// `step` is 1-based.
    fn set_step_state(&mut self, step: usize, state: StepState);

    /// Connector `index` joins step `index` and `index + 1` (1-based).
    fn set_connector_state(&mut self, index: usize, done: bool);
}
