//! Transient notifications and clipboard copy.

use crate::guard::Clock;
use log::warn;
use okenaba_ports::{Clipboard, NoticeKind, Notifier};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const COPY_SUCCESS_MESSAGE: &str = "Link copied to clipboard!";
pub const COPY_FAILURE_MESSAGE: &str = "Could not copy link to clipboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NoticeKind,
    pub expires_at: Instant,
}

/// Auto-dismissing notification queue.
pub struct NotificationCenter<C> {
    clock: C,
    lifetime: Duration,
    queue: VecDeque<Notification>,
}

impl<C: Clock> NotificationCenter<C> {
    pub fn new(clock: C, lifetime: Duration) -> Self {
        Self {
            clock,
            lifetime,
            queue: VecDeque::new(),
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Drop everything that has expired by `now`.
    pub fn prune(&mut self, now: Instant) {
        self.queue.retain(|n| n.expires_at > now);
    }

    /// Live notifications, oldest first.
    pub fn active(&mut self) -> Vec<Notification> {
        let now = self.clock.now();
        self.prune(now);
        self.queue.iter().cloned().collect()
    }

    pub fn latest(&mut self) -> Option<Notification> {
        let now = self.clock.now();
        self.prune(now);
        self.queue.back().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<C: Clock> Notifier for NotificationCenter<C> {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        let now = self.clock.now();
        self.prune(now);
        self.queue.push_back(Notification {
            message: message.to_string(),
            kind,
            expires_at: now + self.lifetime,
        });
    }
}

/// Copy `text`, trying `primary` first and `fallback` second.
///
/// Returns whether either writer succeeded. The user is told either way.
pub fn copy_text(
    primary: &mut dyn Clipboard,
    fallback: &mut dyn Clipboard,
    notifier: &mut dyn Notifier,
    text: &str,
) -> bool {
    let copied = match primary.write_text(text) {
        Ok(()) => true,
        Err(primary_err) => {
            warn!("Primary clipboard failed: {:#}", primary_err);
            match fallback.write_text(text) {
                Ok(()) => true,
                Err(fallback_err) => {
                    warn!("Fallback clipboard failed: {:#}", fallback_err);
                    false
                }
            }
        }
    };

    if copied {
        notifier.notify(COPY_SUCCESS_MESSAGE, NoticeKind::Info);
    } else {
        notifier.notify(COPY_FAILURE_MESSAGE, NoticeKind::Error);
    }
    copied
}
