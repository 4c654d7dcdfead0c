//! Header image intake.
//!
//! Picker and drag-and-drop both funnel into [`accept_file`]; only an accepted
//! image touches the snapshot.

use crate::controller::StepController;
use crate::guard::Clock;
use log::{info, warn};
use okenaba_core::upload::{accept_file, FileUpload, UploadSource};
use okenaba_error::UploadError;
use okenaba_ports::{NoticeKind, WizardPorts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Accepted,
    Rejected(UploadError),
    /// No file was selected or dropped.
    Empty,
}

pub struct UploadFlow<'a, P, C> {
    controller: &'a mut StepController<P, C>,
}

impl<'a, P, C> UploadFlow<'a, P, C>
where
    P: WizardPorts,
    C: Clock,
{
    pub fn new(controller: &'a mut StepController<P, C>) -> Self {
        Self { controller }
    }

    pub fn receive(&mut self, source: UploadSource, file: Option<&FileUpload>) -> UploadOutcome {
        let Some(file) = file else {
            return UploadOutcome::Empty;
        };

        match accept_file(file) {
            Ok(image) => {
                info!(
                    "🖼️ Accepted {} ({} bytes) via {:?}",
                    file.name,
                    image.byte_len,
                    source
                );
                self.controller.set_image(image);
                UploadOutcome::Accepted
            }
            Err(err) => {
                warn!("Rejected upload {} ({}): {}", file.name, err.reason(), err);
                self.controller
                    .ports_mut()
                    .notify(&err.to_string(), NoticeKind::Error);
                UploadOutcome::Rejected(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::ManualClock;
    use okenaba_core::upload::MAX_UPLOAD_BYTES;
    use okenaba_core::{FieldKey, Variant};
    use okenaba_ports::FakePorts;

    fn personal() -> (StepController<FakePorts, ManualClock>, FakePorts) {
        let ports = FakePorts::new();
        let mut ctl = StepController::new(
            Variant::Personal.schema().unwrap(),
            ports.clone(),
            ManualClock::new(),
        )
        .unwrap();
        ctl.start();
        (ctl, ports)
    }

    fn png(len: usize) -> FileUpload {
        FileUpload::new("me.png", "image/png", vec![0x89; len])
    }

    #[test]
    fn accepted_image_reaches_preview() {
        let (mut ctl, ports) = personal();
        ports.type_value(FieldKey::SiteName, "Ada");
        ctl.save();

        let outcome = UploadFlow::new(&mut ctl).receive(UploadSource::Picker, Some(&png(16)));
        assert_eq!(outcome, UploadOutcome::Accepted);
        assert!(ctl.snapshot().image().is_some());
        assert!(ports.preview().contains("<img src=\"data:image/png;base64,"));
        assert!(ports.notices().is_empty());
    }

    #[test]
    fn oversized_drop_is_rejected_and_notified() {
        let (mut ctl, ports) = personal();
        let big = png(MAX_UPLOAD_BYTES + 1);

        let outcome = UploadFlow::new(&mut ctl).receive(UploadSource::DragDrop, Some(&big));
        assert_eq!(outcome, UploadOutcome::Rejected(UploadError::TooLarge));
        assert!(ctl.snapshot().image().is_none());
        assert_eq!(
            ports.notices(),
            vec![(
                "Image must be smaller than 5MB".to_string(),
                NoticeKind::Error
            )]
        );
    }

    #[test]
    fn rejection_keeps_previous_image() {
        let (mut ctl, _) = personal();
        UploadFlow::new(&mut ctl).receive(UploadSource::Picker, Some(&png(8)));
        let before = ctl.snapshot().image().cloned();

        let gif = FileUpload::new("cat.gif", "image/gif", vec![1, 2, 3]);
        let outcome = UploadFlow::new(&mut ctl).receive(UploadSource::Picker, Some(&gif));
        assert_eq!(outcome, UploadOutcome::Rejected(UploadError::BadType));
        assert_eq!(ctl.snapshot().image().cloned(), before);
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let (mut ctl, ports) = personal();
        ports.clear_events();
        let outcome = UploadFlow::new(&mut ctl).receive(UploadSource::Picker, None);
        assert_eq!(outcome, UploadOutcome::Empty);
        assert!(ports.events().is_empty());
    }
}
