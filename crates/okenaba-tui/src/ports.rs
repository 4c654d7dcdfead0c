//! Terminal-side implementation of the wizard ports.

use crate::input::TextInput;
use okenaba_core::{FieldKey, FieldValues, WizardSchema};
use okenaba_ports::{
    Direction, FieldSource, NoticeKind, Notifier, PreviewSink, StepIndicator, StepState, StepView,
};
use okenaba_workflow::notifications::Notification;
use okenaba_workflow::{Clock, NotificationCenter};
use std::collections::BTreeMap;
use std::time::Duration;

/// What the main panel is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Step { step: usize, direction: Direction },
    Success { site_link: String },
}

pub struct TuiPorts<C> {
    inputs: BTreeMap<FieldKey, TextInput>,
    errors: BTreeMap<FieldKey, String>,
    focused: Option<FieldKey>,
    step_states: BTreeMap<usize, StepState>,
    connectors: BTreeMap<usize, bool>,
    preview_fragment: String,
    screen: Screen,
    scroll: u16,
    notifications: NotificationCenter<C>,
}

impl<C: Clock> TuiPorts<C> {
    pub fn new(schema: &WizardSchema, clock: C, notification_lifetime: Duration) -> Self {
        let inputs = schema
            .steps
            .iter()
            .flat_map(|step| step.fields.iter())
            .map(|spec| (spec.key, TextInput::new(spec.multiline)))
            .collect();
        Self {
            inputs,
            errors: BTreeMap::new(),
            focused: None,
            step_states: BTreeMap::new(),
            connectors: BTreeMap::new(),
            preview_fragment: String::new(),
            screen: Screen::Step {
                step: 1,
                direction: Direction::Forward,
            },
            scroll: 0,
            notifications: NotificationCenter::new(clock, notification_lifetime),
        }
    }

    pub fn input(&self, key: FieldKey) -> Option<&TextInput> {
        self.inputs.get(&key)
    }

    pub fn input_mut(&mut self, key: FieldKey) -> Option<&mut TextInput> {
        self.inputs.get_mut(&key)
    }

    pub fn error(&self, key: FieldKey) -> Option<&str> {
        self.errors.get(&key).map(String::as_str)
    }

    pub fn focused(&self) -> Option<FieldKey> {
        self.focused
    }

    pub fn step_state(&self, step: usize) -> StepState {
        self.step_states
            .get(&step)
            .copied()
            .unwrap_or(StepState::Pending)
    }

    pub fn connector_done(&self, index: usize) -> bool {
        self.connectors.get(&index).copied().unwrap_or(false)
    }

    pub fn preview_fragment(&self) -> &str {
        &self.preview_fragment
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_by(&mut self, lines: i16) {
        self.scroll = self.scroll.saturating_add_signed(lines);
    }

    pub fn latest_notification(&mut self) -> Option<Notification> {
        self.notifications.latest()
    }
}

impl<C> FieldValues for TuiPorts<C> {
    fn field_value(&self, key: FieldKey) -> String {
        self.inputs
            .get(&key)
            .map(|input| input.value().to_string())
            .unwrap_or_default()
    }
}

impl<C> FieldSource for TuiPorts<C> {
    fn set_field_value(&mut self, key: FieldKey, value: &str) {
        if let Some(input) = self.inputs.get_mut(&key) {
            input.set_value(value);
        }
    }

    fn set_field_error(&mut self, key: FieldKey, message: &str) {
        self.errors.insert(key, message.to_string());
    }

    fn clear_field_error(&mut self, key: FieldKey) {
        self.errors.remove(&key);
    }

    fn clear_all_field_errors(&mut self) {
        self.errors.clear();
    }

    fn focus_field(&mut self, key: FieldKey) {
        self.focused = Some(key);
    }
}

impl<C> StepIndicator for TuiPorts<C> {
    fn set_step_state(&mut self, step: usize, state: StepState) {
        self.step_states.insert(step, state);
    }

    fn set_connector_state(&mut self, index: usize, done: bool) {
        self.connectors.insert(index, done);
    }
}

impl<C> PreviewSink for TuiPorts<C> {
    fn replace_preview(&mut self, fragment: &str) {
        self.preview_fragment = fragment.to_string();
    }
}

impl<C> StepView for TuiPorts<C> {
    fn show_step(&mut self, step: usize, direction: Direction) {
        // Focus falls back to the first field of the new step.
        self.focused = None;
        self.screen = Screen::Step { step, direction };
    }

    fn show_success(&mut self, site_link: &str) {
        self.focused = None;
        self.screen = Screen::Success {
            site_link: site_link.to_string(),
        };
    }

    fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }
}

impl<C: Clock> Notifier for TuiPorts<C> {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        self.notifications.notify(message, kind);
    }
}
