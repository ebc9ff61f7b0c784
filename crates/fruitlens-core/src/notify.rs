//! Transient user-facing notices.
//!
//! [`Notifier`] is the fire-and-forget seam the session talks to.
//! [`NoticeQueue`] is the stacked, auto-expiring store the toaster UI
//! renders from.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use web_time::Instant;

/// How long a notice stays up unless dismissed.
pub const DEFAULT_TTL: Duration = Duration::from_millis(2000);

/// Category of a notice, which selects its styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// Neutral.
    #[default]
    Default,
    /// Something finished successfully.
    Success,
    /// Something failed.
    Error,
    /// Informational.
    Info,
    /// The user did something that was ignored.
    Warning,
}

impl NoticeKind {
    /// Short name used as a CSS class suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives notices. Implementations must not block or fail.
pub trait Notifier {
    /// Show `message` to the user.
    fn notify(&mut self, message: &str, kind: NoticeKind);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        (**self).notify(message, kind);
    }
}

/// Collects notices in memory. Useful wherever the UI is not attached.
impl Notifier for Vec<(String, NoticeKind)> {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        self.push((message.to_owned(), kind));
    }
}

/// One displayed notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Unique within its queue.
    pub id: u64,
    /// Text shown to the user.
    pub message: String,
    /// Styling category.
    pub kind: NoticeKind,
    /// When the notice disappears on its own.
    pub expires_at: Instant,
}

/// Notices currently on screen, oldest first.
#[derive(Debug, Clone)]
pub struct NoticeQueue {
    notices: VecDeque<Notice>,
    next_id: u64,
    ttl: Duration,
}

impl Default for NoticeQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl NoticeQueue {
    /// An empty queue whose notices live for `ttl`.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            notices: VecDeque::new(),
            next_id: 0,
            ttl,
        }
    }

    /// Lifetime given to new notices.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Add a notice at `now` and return its id.
    pub fn push(&mut self, message: impl Into<String>, kind: NoticeKind, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.notices.push_back(Notice {
            id,
            message: message.into(),
            kind,
            expires_at: now + self.ttl,
        });
        id
    }

    /// Remove a notice early. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }

    /// Remove every notice whose time is up.
    pub fn expire(&mut self, now: Instant) {
        self.notices.retain(|n| n.expires_at > now);
    }

    /// Notices in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    /// Number of notices on screen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notices.len()
    }

    /// Whether nothing is on screen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_stack_in_order() {
        let mut q = NoticeQueue::default();
        let now = Instant::now();
        let a = q.push("one", NoticeKind::Info, now);
        let b = q.push("two", NoticeKind::Error, now);
        assert_ne!(a, b);
        let msgs: Vec<_> = q.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(msgs, ["one", "two"]);
    }

    #[test]
    fn dismiss_removes_only_that_notice() {
        let mut q = NoticeQueue::default();
        let now = Instant::now();
        let a = q.push("one", NoticeKind::Default, now);
        q.push("two", NoticeKind::Success, now);
        q.dismiss(a);
        q.dismiss(999);
        assert_eq!(q.len(), 1);
        assert_eq!(q.iter().next().map(|n| n.kind), Some(NoticeKind::Success));
    }

    #[test]
    fn expire_drops_old_notices() {
        let mut q = NoticeQueue::new(Duration::from_millis(100));
        let start = Instant::now();
        q.push("early", NoticeKind::Warning, start);
        q.push("late", NoticeKind::Warning, start + Duration::from_millis(80));

        q.expire(start + Duration::from_millis(100));
        let msgs: Vec<_> = q.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(msgs, ["late"]);

        q.expire(start + Duration::from_millis(500));
        assert!(q.is_empty());
    }

    #[test]
    fn vec_notifier_records() {
        let mut log: Vec<(String, NoticeKind)> = Vec::new();
        log.notify("hi", NoticeKind::Info);
        assert_eq!(log, [("hi".to_owned(), NoticeKind::Info)]);
    }
}
