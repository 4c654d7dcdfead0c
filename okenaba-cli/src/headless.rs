//! Ports for driving the wizard with no UI attached.
//!
//! Inputs are pre-filled from an answers file. Display calls only reach the
//! debug log; the `walk` report reads the controller's transitions instead.

use log::debug;
use okenaba_core::{FieldKey, FieldValues, FormSnapshot};
use okenaba_ports::{
    Direction, FieldSource, NoticeKind, Notifier, PreviewSink, StepIndicator, StepState,
    StepView,
};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct HeadlessPorts {
    values: BTreeMap<FieldKey, String>,
}

impl HeadlessPorts {
    /// Inputs holding every answer, as if the user had typed them.
    pub fn from_answers(answers: &FormSnapshot) -> Self {
        Self {
            values: answers
                .values()
                .map(|(key, value)| (key, value.to_string()))
                .collect(),
        }
    }
}

impl FieldValues for HeadlessPorts {
    fn field_value(&self, key: FieldKey) -> String {
        self.values.field_value(key)
    }
}

impl FieldSource for HeadlessPorts {
    fn set_field_value(&mut self, key: FieldKey, value: &str) {
        self.values.insert(key, value.to_string());
    }

    fn set_field_error(&mut self, key: FieldKey, message: &str) {
        debug!("{}: {}", key, message);
    }

    fn clear_field_error(&mut self, _key: FieldKey) {}

    fn clear_all_field_errors(&mut self) {}

    fn focus_field(&mut self, _key: FieldKey) {}
}

impl StepIndicator for HeadlessPorts {
    fn set_step_state(&mut self, _step: usize, _state: StepState) {}

    fn set_connector_state(&mut self, _index: usize, _done: bool) {}
}

impl StepView for HeadlessPorts {
    fn show_step(&mut self, step: usize, direction: Direction) {
        debug!("Showing step {} ({:?})", step, direction);
    }

    fn show_success(&mut self, site_link: &str) {
        debug!("Showing success for {}", site_link);
    }

    fn scroll_to_top(&mut self) {}
}

impl PreviewSink for HeadlessPorts {
    fn replace_preview(&mut self, fragment: &str) {
        debug!("Preview updated ({} bytes)", fragment.len());
    }
}

impl Notifier for HeadlessPorts {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        debug!("{:?} notice: {}", kind, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_become_live_values() {
        let mut answers = FormSnapshot::new();
        answers.set(FieldKey::SiteName, "Ada");
        let ports = HeadlessPorts::from_answers(&answers);
        assert_eq!(ports.field_value(FieldKey::SiteName), "Ada");
        assert_eq!(ports.field_value(FieldKey::Bio), "");
    }

    #[test]
    fn set_value_overwrites_answer() {
        let mut answers = FormSnapshot::new();
        answers.set(FieldKey::Email, "ada@example.com");
        let mut ports = HeadlessPorts::from_answers(&answers);
        ports.set_field_value(FieldKey::Email, "");
        assert_eq!(ports.field_value(FieldKey::Email), "");
    }
}
