//! Leave-onboarding confirmation.

use log::info;
use okenaba_ports::Navigator;

pub const LEAVE_PROMPT: &str = "You have unsaved changes. Are you sure you want to leave?";
pub const EXIT_PROMPT: &str = "Are you sure you want to leave? This project will not be saved.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Confirmed; the draft was discarded and navigation requested.
    Discarded,
    /// The user chose to stay.
    Stayed,
    /// Guard not armed; plain navigation.
    Navigated,
}

/// Armed while an onboarding draft exists and has not been submitted.
#[derive(Debug, Clone)]
pub struct ExitGuard {
    delete_url: String,
    armed: bool,
}

impl ExitGuard {
    pub fn new(delete_url: impl Into<String>) -> Self {
        Self {
            delete_url: delete_url.into(),
            armed: true,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Whether closing the surface outright (tab close, quit) should warn.
    pub fn blocks_unload(&self) -> bool {
        self.armed
    }

    /// Normal submission navigates away without discarding anything.
    pub fn on_submit(&mut self) {
        self.armed = false;
    }

    /// A navigation link was followed.
    pub fn request_leave(&mut self, nav: &mut dyn Navigator, target: &str) -> LeaveOutcome {
        self.leave_with(nav, LEAVE_PROMPT, target)
    }

    /// The explicit "exit onboarding" action; always returns home.
    pub fn exit(&mut self, nav: &mut dyn Navigator) -> LeaveOutcome {
        self.leave_with(nav, EXIT_PROMPT, "/")
    }

    fn leave_with(&mut self, nav: &mut dyn Navigator, prompt: &str, target: &str) -> LeaveOutcome {
        if !self.armed {
            nav.redirect(target);
            return LeaveOutcome::Navigated;
        }
        if !nav.confirm(prompt) {
            return LeaveOutcome::Stayed;
        }

        self.armed = false;
        info!("Discarding onboarding draft before leaving for {}", target);
        nav.discard_and_redirect(&self.delete_url, target);
        LeaveOutcome::Discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okenaba_ports::{FakePorts, PortEvent};

    #[test]
    fn confirmed_leave_discards_draft() {
        let mut nav = FakePorts::new();
        nav.answer_confirm(true);
        let mut guard = ExitGuard::new("/projects/7/delete");

        assert_eq!(guard.request_leave(&mut nav, "/pages"), LeaveOutcome::Discarded);
        assert!(!guard.is_armed());
        assert_eq!(
            nav.events(),
            vec![
                PortEvent::Confirm {
                    prompt: LEAVE_PROMPT.to_string()
                },
                PortEvent::DiscardAndRedirect {
                    delete_url: "/projects/7/delete".to_string(),
                    target: "/pages".to_string()
                },
            ]
        );
    }

    #[test]
    fn declined_leave_stays_armed() {
        let mut nav = FakePorts::new();
        nav.answer_confirm(false);
        let mut guard = ExitGuard::new("/d");

        assert_eq!(guard.exit(&mut nav), LeaveOutcome::Stayed);
        assert!(guard.is_armed());
        assert!(guard.blocks_unload());
        assert!(nav.has_event(|e| matches!(e, PortEvent::Confirm { prompt } if prompt == EXIT_PROMPT)));
    }

    #[test]
    fn submit_disarms_without_prompting() {
        let mut nav = FakePorts::new();
        let mut guard = ExitGuard::new("/d");
        guard.on_submit();

        assert_eq!(guard.request_leave(&mut nav, "/"), LeaveOutcome::Navigated);
        assert_eq!(
            nav.events(),
            vec![PortEvent::Redirect {
                target: "/".to_string()
            }]
        );
    }
}
