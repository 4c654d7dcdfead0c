//! Okenaba collaborator ports.
//!
//! The wizard core never touches a concrete UI. Everything it reads from or
//! writes to (inputs, step indicator, preview pane, notifications, clipboard,
//! navigation) goes through the traits defined here.

pub mod ports;

pub use ports::{
    Clipboard, Direction, FakePorts, FieldSource, Navigator, NoticeKind, Notifier, PortEvent,
    PreviewSink, StepIndicator, StepState, StepView, WizardPorts,
};
