//! # Diagnostics raised by the subscriber set.
//!
//! A [`Notice`] reports a payload that one async subscriber did not process:
//! its queue was full or closed, or its handler panicked. Notices are
//! published synchronously on [`SubscriberSet::notices`](crate::SubscriberSet::notices),
//! so they can be observed with any [`EventChannel`](crate::EventChannel) subscriber.
//!
//! ## Ordering guarantees
//! Each notice has a globally unique sequence number (`seq`) that increases
//! monotonically; use it to restore order across sets.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for notice ordering.
static NOTICE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of subscriber-set diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Subscriber dropped a payload (queue full or worker closed).
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `reason`: `"full"` or `"closed"`
    SubscriberOverflow,

    /// Subscriber panicked while handling a payload.
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `reason`: panic message
    SubscriberPanicked,
}

/// Subscriber-set diagnostic.
#[derive(Debug, Clone)]
pub struct Notice {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Notice classification.
    pub kind: NoticeKind,
    /// Name of the subscriber concerned.
    pub subscriber: &'static str,
    /// Human-readable reason.
    pub reason: Arc<str>,
}

impl Notice {
    fn new(kind: NoticeKind, subscriber: &'static str, reason: impl Into<Arc<str>>) -> Self {
        Self {
            seq: NOTICE_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            subscriber,
            reason: reason.into(),
        }
    }

    /// Creates a subscriber overflow notice.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Notice::new(NoticeKind::SubscriberOverflow, subscriber, reason)
    }

    /// Creates a subscriber panic notice.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Notice::new(NoticeKind::SubscriberPanicked, subscriber, info)
    }

    /// True for [`NoticeKind::SubscriberOverflow`].
    #[inline]
    pub fn is_overflow(&self) -> bool {
        matches!(self.kind, NoticeKind::SubscriberOverflow)
    }

    /// True for [`NoticeKind::SubscriberPanicked`].
    #[inline]
    pub fn is_panic(&self) -> bool {
        matches!(self.kind, NoticeKind::SubscriberPanicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_sequence_increases() {
        let a = Notice::subscriber_overflow("audit", "full");
        let b = Notice::subscriber_panicked("audit", "boom".to_string());
        assert!(b.seq > a.seq);
        assert!(a.is_overflow() && !a.is_panic());
        assert!(b.is_panic() && !b.is_overflow());
        assert_eq!(&*a.reason, "full");
        assert_eq!(b.subscriber, "audit");
    }
}
