//! [`Notifier`] backed by a Dioxus signal.
//!
//! Each notice is pushed into the shared [`NoticeQueue`] and a timer task
//! removes it once its time to live has passed. Must be used from inside
//! the Dioxus runtime (event handlers and spawned tasks).

use dioxus::prelude::*;
use fruitlens_core::{NoticeKind, NoticeQueue, Notifier};
use web_time::Instant;

/// Pushes notices into a signal the [`Toaster`](crate::Toaster) renders.
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    queue: Signal<NoticeQueue>,
}

impl ToastNotifier {
    /// Wrap the queue signal.
    #[must_use]
    pub const fn new(queue: Signal<NoticeQueue>) -> Self {
        Self { queue }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        let ttl = self.queue.peek().ttl();
        let id = self.queue.write().push(message, kind, Instant::now());
        tracing::debug!(id, %kind, message, "notice shown");

        let mut queue = self.queue;
        spawn(async move {
            let millis = u32::try_from(ttl.as_millis()).unwrap_or(u32::MAX);
            gloo_timers::future::TimeoutFuture::new(millis).await;
            if let Ok(mut q) = queue.try_write() {
                q.dismiss(id);
            }
        });
    }
}
