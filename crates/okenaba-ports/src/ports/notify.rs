#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Fire-and-forget user feedback. Implementations auto-dismiss.
pub trait Notifier {
    fn notify(&mut self, message: &str, kind: NoticeKind);
}
