//! # Subscription handles.
//!
//! A [`Subscription`] is the opaque token returned by every `subscribe*` call
//! on an [`EventChannel`](crate::EventChannel). It is the only way to end
//! delivery explicitly.
//!
//! ## Rules
//! - `dispose()` is idempotent; the second call is a no-op.
//! - After `dispose()` returns, the handler is never invoked again, including
//!   by a publish already in flight that has not yet reached it.
//! - Clones share one registration: disposing any clone disposes all.
//! - The handle holds the channel weakly; disposing after the channel was
//!   dropped does nothing.
//!
//! [`SubscriptionGuard`] is the scoped form: it disposes when dropped.
//! ```text
//! {
//!     let _guard = channel.subscribe(&target, Target::on_event).into_guard();
//!     channel.publish(&x)?;   // delivered
//! }                           // guard dropped → disposed
//! channel.publish(&y)?;       // not delivered
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Weak};

/// Global sequence counter for registration ids.
static SUBSCRIPTION_SEQ: AtomicU64 = AtomicU64::new(1);

/// Process-wide unique identity of one registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn next() -> Self {
        Self(SUBSCRIPTION_SEQ.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// Wraps a raw id (for tests and log correlation).
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[inline]
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Removal hook implemented by channel internals.
pub(crate) trait Detach: Send + Sync {
    fn detach(&self, id: SubscriptionId);
}

/// Handle to one registration on an event channel.
#[derive(Clone)]
pub struct Subscription {
    id: SubscriptionId,
    active: Arc<AtomicBool>,
    channel: Weak<dyn Detach>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, active: Arc<AtomicBool>, channel: Weak<dyn Detach>) -> Self {
        Self {
            id,
            active,
            channel,
        }
    }

    /// Identity of this registration.
    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// True while the registration can still receive payloads.
    ///
    /// Becomes `false` after `dispose()`, after the channel is cleared or
    /// dropped, or after the registration was pruned for a dead target.
    pub fn is_active(&self) -> bool {
        self.active.load(AtomicOrdering::Acquire) && self.channel.strong_count() > 0
    }

    /// Ends delivery for this registration. Safe to call any number of times,
    /// including from inside the handler itself.
    pub fn dispose(&self) {
        if !self.active.swap(false, AtomicOrdering::AcqRel) {
            return;
        }
        if let Some(channel) = self.channel.upgrade() {
            channel.detach(self.id);
        }
    }

    /// Converts the handle into a guard that disposes on drop.
    #[must_use = "dropping the guard disposes the subscription immediately"]
    pub fn into_guard(self) -> SubscriptionGuard {
        SubscriptionGuard { inner: Some(self) }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Scoped subscription: disposed when dropped.
#[derive(Debug)]
pub struct SubscriptionGuard {
    inner: Option<Subscription>,
}

impl SubscriptionGuard {
    /// Identity of the guarded registration.
    pub fn id(&self) -> Option<SubscriptionId> {
        self.inner.as_ref().map(Subscription::id)
    }

    /// True while the guarded registration is active.
    pub fn is_active(&self) -> bool {
        self.inner.as_ref().is_some_and(Subscription::is_active)
    }

    /// Gives the handle back without disposing it.
    pub fn release(mut self) -> Option<Subscription> {
        self.inner.take()
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(sub) = self.inner.take() {
            sub.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct Recorder {
        detached: Mutex<Vec<SubscriptionId>>,
    }

    impl Detach for Recorder {
        fn detach(&self, id: SubscriptionId) {
            self.detached.lock().unwrap().push(id);
        }
    }

    fn handle(recorder: &Arc<Recorder>) -> Subscription {
        let weak = Arc::downgrade(recorder);
        let channel: Weak<dyn Detach> = weak;
        Subscription::new(SubscriptionId::next(), Arc::new(AtomicBool::new(true)), channel)
    }

    fn recorder() -> Arc<Recorder> {
        Arc::new(Recorder {
            detached: Mutex::new(Vec::new()),
        })
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let a = SubscriptionId::next();
        let b = SubscriptionId::next();
        assert!(b > a);
        assert_eq!(SubscriptionId::from_raw(a.as_raw()), a);
        assert_eq!(SubscriptionId::from_raw(42).to_string(), "#42");
    }

    #[test]
    fn test_dispose_detaches_once() {
        let rec = recorder();
        let sub = handle(&rec);
        let twin = sub.clone();

        sub.dispose();
        sub.dispose();
        twin.dispose();

        assert!(!sub.is_active());
        assert!(!twin.is_active());
        assert_eq!(*rec.detached.lock().unwrap(), vec![sub.id()]);
    }

    #[test]
    fn test_dispose_after_channel_dropped_is_noop() {
        let rec = recorder();
        let sub = handle(&rec);
        drop(rec);

        assert!(!sub.is_active());
        sub.dispose();
    }

    #[test]
    fn test_guard_disposes_on_drop() {
        let rec = recorder();
        let sub = handle(&rec);
        let id = sub.id();
        {
            let guard = sub.clone().into_guard();
            assert_eq!(guard.id(), Some(id));
            assert!(guard.is_active());
        }
        assert!(!sub.is_active());
        assert_eq!(*rec.detached.lock().unwrap(), vec![id]);
    }

    #[test]
    fn test_guard_release_keeps_registration() {
        let rec = recorder();
        let guard = handle(&rec).into_guard();
        let sub = guard.release().unwrap();

        assert!(sub.is_active());
        assert!(rec.detached.lock().unwrap().is_empty());
    }
}
