//! Fake ports for testing.
//!
//! Records every call the wizard makes and keeps just enough state (field
//! values, errors, indicator, preview) for assertions. Clones share state, so a
//! test can hand one clone to the controller and inspect through another.

use super::{
    Clipboard, Direction, FieldSource, Navigator, NoticeKind, Notifier, PreviewSink,
    StepIndicator, StepState, StepView,
};
use anyhow::{bail, Result};
use okenaba_core::{FieldKey, FieldValues};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Call records for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortEvent {
    FieldError { key: FieldKey, message: String },
    ClearFieldError { key: FieldKey },
    ClearAllErrors,
    Focus { key: FieldKey },
    StepState { step: usize, state: StepState },
    Connector { index: usize, done: bool },
    Preview,
    ShowStep { step: usize, direction: Direction },
    Success { site_link: String },
    ScrollTop,
    Notice { message: String, kind: NoticeKind },
    Clipboard { text: String },
    Confirm { prompt: String },
    DiscardAndRedirect { delete_url: String, target: String },
    Redirect { target: String },
}

#[derive(Debug, Default)]
struct FakePortsState {
    events: Vec<PortEvent>,
    values: BTreeMap<FieldKey, String>,
    errors: BTreeMap<FieldKey, String>,
    focused: Option<FieldKey>,
    step_states: BTreeMap<usize, StepState>,
    connectors: BTreeMap<usize, bool>,
    preview: String,
    clipboard: Option<String>,
    clipboard_denied: bool,
    confirm_answer: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakePorts {
    state: Arc<Mutex<FakePortsState>>,
}

impl FakePorts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user typing into an input. Not recorded as an event.
    pub fn type_value(&self, key: FieldKey, value: &str) {
        self.state
            .lock()
            .unwrap()
            .values
            .insert(key, value.to_string());
    }

    pub fn events(&self) -> Vec<PortEvent> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn has_event(&self, check: impl Fn(&PortEvent) -> bool) -> bool {
        self.state.lock().unwrap().events.iter().any(check)
    }

    pub fn clear_events(&self) {
        self.state.lock().unwrap().events.clear();
    }

    pub fn error_for(&self, key: FieldKey) -> Option<String> {
        self.state.lock().unwrap().errors.get(&key).cloned()
    }

    pub fn errors(&self) -> BTreeMap<FieldKey, String> {
        self.state.lock().unwrap().errors.clone()
    }

    pub fn focused(&self) -> Option<FieldKey> {
        self.state.lock().unwrap().focused
    }

    pub fn step_state(&self, step: usize) -> Option<StepState> {
        self.state.lock().unwrap().step_states.get(&step).copied()
    }

    pub fn connector(&self, index: usize) -> Option<bool> {
        self.state.lock().unwrap().connectors.get(&index).copied()
    }

    pub fn preview(&self) -> String {
        self.state.lock().unwrap().preview.clone()
    }

    pub fn preview_count(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .events
            .iter()
            .filter(|e| matches!(e, PortEvent::Preview))
            .count()
    }

    pub fn notices(&self) -> Vec<(String, NoticeKind)> {
        self.state
            .lock()
            .unwrap()
            .events
            .iter()
            .filter_map(|e| match e {
                PortEvent::Notice { message, kind } => Some((message.clone(), *kind)),
                _ => None,
            })
            .collect()
    }

    pub fn clipboard(&self) -> Option<String> {
        self.state.lock().unwrap().clipboard.clone()
    }

    /// Make the next clipboard writes fail, as an unavailable browser API would.
    pub fn deny_clipboard(&self) {
        self.state.lock().unwrap().clipboard_denied = true;
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.state.lock().unwrap().confirm_answer = answer;
    }

    fn record(&self, event: PortEvent) {
        self.state.lock().unwrap().events.push(event);
    }
}

impl FieldValues for FakePorts {
    fn field_value(&self, key: FieldKey) -> String {
        self.state
            .lock()
            .unwrap()
            .values
            .get(&key)
            .cloned()
            .unwrap_or_default()
    }
}

impl FieldSource for FakePorts {
    fn set_field_value(&mut self, key: FieldKey, value: &str) {
        self.type_value(key, value);
    }

    fn set_field_error(&mut self, key: FieldKey, message: &str) {
        self.state
            .lock()
            .unwrap()
            .errors
            .insert(key, message.to_string());
        self.record(PortEvent::FieldError {
            key,
            message: message.to_string(),
        });
    }

    fn clear_field_error(&mut self, key: FieldKey) {
        self.state.lock().unwrap().errors.remove(&key);
        self.record(PortEvent::ClearFieldError { key });
    }

    fn clear_all_field_errors(&mut self) {
        self.state.lock().unwrap().errors.clear();
        self.record(PortEvent::ClearAllErrors);
    }

    fn focus_field(&mut self, key: FieldKey) {
        self.state.lock().unwrap().focused = Some(key);
        self.record(PortEvent::Focus { key });
    }
}

impl StepIndicator for FakePorts {
    fn set_step_state(&mut self, step: usize, state: StepState) {
        self.state.lock().unwrap().step_states.insert(step, state);
        self.record(PortEvent::StepState { step, state });
    }

    fn set_connector_state(&mut self, index: usize, done: bool) {
        self.state.lock().unwrap().connectors.insert(index, done);
        self.record(PortEvent::Connector { index, done });
    }
}

impl PreviewSink for FakePorts {
    fn replace_preview(&mut self, fragment: &str) {
        self.state.lock().unwrap().preview = fragment.to_string();
        self.record(PortEvent::Preview);
    }
}

impl StepView for FakePorts {
    fn show_step(&mut self, step: usize, direction: Direction) {
        self.record(PortEvent::ShowStep { step, direction });
    }

    fn show_success(&mut self, site_link: &str) {
        self.record(PortEvent::Success {
            site_link: site_link.to_string(),
        });
    }

    fn scroll_to_top(&mut self) {
        self.record(PortEvent::ScrollTop);
    }
}

impl Notifier for FakePorts {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        self.record(PortEvent::Notice {
            message: message.to_string(),
            kind,
        });
    }
}

impl Clipboard for FakePorts {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.state.lock().unwrap().clipboard_denied {
            bail!("clipboard unavailable");
        }
        self.state.lock().unwrap().clipboard = Some(text.to_string());
        self.record(PortEvent::Clipboard {
            text: text.to_string(),
        });
        Ok(())
    }
}

impl Navigator for FakePorts {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.record(PortEvent::Confirm {
            prompt: prompt.to_string(),
        });
        self.state.lock().unwrap().confirm_answer
    }

    fn discard_and_redirect(&mut self, delete_url: &str, target: &str) {
        log::debug!("fake discard of {} before redirect to {}", delete_url, target);
        self.record(PortEvent::DiscardAndRedirect {
            delete_url: delete_url.to_string(),
            target: target.to_string(),
        });
    }

    fn redirect(&mut self, target: &str) {
        self.record(PortEvent::Redirect {
            target: target.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let probe = FakePorts::new();
        let mut ports = probe.clone();
        ports.set_field_error(FieldKey::SiteName, "Required");
        ports.focus_field(FieldKey::SiteName);

        assert_eq!(probe.error_for(FieldKey::SiteName).as_deref(), Some("Required"));
        assert_eq!(probe.focused(), Some(FieldKey::SiteName));
        assert_eq!(probe.events().len(), 2);
    }

    #[test]
    fn typed_values_are_readable_but_not_recorded() {
        let ports = FakePorts::new();
        ports.type_value(FieldKey::Email, "a@b.co");
        assert_eq!(ports.field_value(FieldKey::Email), "a@b.co");
        assert_eq!(ports.field_value(FieldKey::Bio), "");
        assert!(ports.events().is_empty());
    }

    #[test]
    fn denied_clipboard_fails() {
        let mut ports = FakePorts::new();
        ports.deny_clipboard();
        assert!(ports.write_text("x").is_err());
        assert_eq!(ports.clipboard(), None);
    }

    #[test]
    fn clear_all_drops_every_error() {
        let mut ports = FakePorts::new();
        ports.set_field_error(FieldKey::SiteName, "a");
        ports.set_field_error(FieldKey::Email, "b");
        ports.clear_all_field_errors();
        assert!(ports.errors().is_empty());
    }
}
