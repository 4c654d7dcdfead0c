//! Keyboard shortcuts inside the wizard.

use crate::controller::{StepController, Transition};
use crate::guard::Clock;
use okenaba_ports::WizardPorts;

/// What currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    TextInput,
    TextArea,
    Button,
    /// Indicator circle for the given 1-based step.
    IndicatorCircle(usize),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardKey {
    Enter,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Advance,
    Jump(usize),
    Ignore,
}

/// Decide what a key press means. `current` and `total` describe the wizard.
pub fn key_action(focus: Focus, key: WizardKey, current: usize, total: usize) -> KeyAction {
    match (focus, key) {
        (Focus::IndicatorCircle(step), WizardKey::Enter | WizardKey::Space) if step < current => {
            KeyAction::Jump(step)
        }
        (Focus::TextArea | Focus::Button, WizardKey::Enter) => KeyAction::Ignore,
        (Focus::IndicatorCircle(_), _) => KeyAction::Ignore,
        // The last step is left through submit, never through Enter.
        (_, WizardKey::Enter) if current < total => KeyAction::Advance,
        _ => KeyAction::Ignore,
    }
}

pub fn handle_key<P, C>(ctl: &mut StepController<P, C>, focus: Focus, key: WizardKey) -> Transition
where
    P: WizardPorts,
    C: Clock,
{
    if ctl.is_completed() {
        return Transition::Ignored;
    }
    match key_action(focus, key, ctl.current_step(), ctl.total_steps()) {
        KeyAction::Advance => ctl.advance(),
        KeyAction::Jump(step) => ctl.jump_to(step),
        KeyAction::Ignore => Transition::Ignored,
    }
}
