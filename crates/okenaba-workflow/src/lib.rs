//! Okenaba workflow.
//!
//! The onboarding state machine and the flows around it. Everything here is
//! driven through the port traits in `okenaba-ports`, so the same controller
//! runs behind the terminal UI, the headless CLI and the tests.

pub mod auth;
pub mod controller;
pub mod exit_guard;
pub mod guard;
pub mod keyboard;
pub mod notifications;
pub mod upload_flow;

pub use controller::{StepController, Transition};
pub use exit_guard::{ExitGuard, LeaveOutcome};
pub use guard::{Clock, ManualClock, SystemClock, TransitionGuard};
pub use keyboard::{handle_key, Focus, WizardKey};
pub use notifications::{copy_text, NotificationCenter};
pub use upload_flow::{UploadFlow, UploadOutcome};
