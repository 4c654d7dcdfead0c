//! Port trait definitions and the recording fake.

pub mod clipboard;
pub mod fake_ports;
pub mod fields;
pub mod indicator;
pub mod navigator;
pub mod notify;
pub mod view;

pub use clipboard::Clipboard;
pub use fake_ports::{FakePorts, PortEvent};
pub use fields::FieldSource;
pub use indicator::{StepIndicator, StepState};
pub use navigator::Navigator;
pub use notify::{NoticeKind, Notifier};
pub use view::{Direction, PreviewSink, StepView};

/// Everything the step controller drives.
pub trait WizardPorts: FieldSource + StepIndicator + PreviewSink + StepView + Notifier {}

impl<T> WizardPorts for T where T: FieldSource + StepIndicator + PreviewSink + StepView + Notifier {}
