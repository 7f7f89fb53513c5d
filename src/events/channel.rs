//! # Synchronous event channel with weakly-held targets.
//!
//! [`EventChannel`] delivers a payload to every active subscription, in
//! registration order, on the caller's thread.
//!
//! ## Architecture
//! ```text
//! publish(&payload)
//!     │
//!     ├─► snapshot = slots.clone()        (lock held only for the copy)
//!     │
//!     └─► for slot in snapshot:
//!            ├─ disposed?        → ignore
//!            ├─ Weak::upgrade()  → None       → skipped (+ pruned with DeadTargetPolicy::Prune)
//!            └─ handler(&target, &payload)
//!                   ├─ Ok          → delivered
//!                   └─ Err(e)      → stop, return PublishError::Handler
//! ```
//!
//! ## Rules
//! - **Order**: registration order, one payload at a time.
//! - **Weak targets**: subscribing never keeps the subscriber alive.
//! - **Re-entrancy**: handlers may subscribe, dispose (themselves included) or
//!   publish again; iteration works on a snapshot taken at the start.
//! - **Late subscribers**: a subscription added during a publish first sees the
//!   next publish.
//! - **Fail fast**: a handler error ends the publish; panics unwind through it.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use eventvisor::EventChannel;
//!
//! struct Doctor {
//!     calls: Mutex<Vec<String>>,
//! }
//!
//! impl Doctor {
//!     fn call(&self, address: &String) {
//!         self.calls.lock().unwrap().push(address.clone());
//!     }
//! }
//!
//! let falls_ill = EventChannel::<String>::new();
//! let doc = Arc::new(Doctor { calls: Mutex::new(Vec::new()) });
//!
//! let sub = falls_ill.subscribe(&doc, Doctor::call);
//! falls_ill.publish(&"123 London Road".to_string()).unwrap();
//!
//! sub.dispose();
//! falls_ill.publish(&"456 Cardiff Road".to_string()).unwrap();
//!
//! assert_eq!(*doc.calls.lock().unwrap(), vec!["123 London Road".to_string()]);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::config::Config;
use crate::error::{HandlerError, PublishError, SubscribeError};
use crate::policies::DeadTargetPolicy;

use super::{Delivery, Detach, Subscription, SubscriptionId};

/// Resolves the target and runs the handler; `None` means the target is gone.
type Invoke<T> = Box<dyn Fn(&T) -> Option<Result<(), HandlerError>> + Send + Sync>;

/// One registration as stored by the channel.
struct Slot<T> {
    id: SubscriptionId,
    active: Arc<AtomicBool>,
    invoke: Invoke<T>,
}

impl<T> Slot<T> {
    #[inline]
    fn is_active(&self) -> bool {
        self.active.load(AtomicOrdering::Acquire)
    }

    #[inline]
    fn deactivate(&self) {
        self.active.store(false, AtomicOrdering::Release);
    }
}

/// State shared between the channel and the (weak) subscription handles.
struct Shared<T> {
    slots: Mutex<Vec<Arc<Slot<T>>>>,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, Vec<Arc<Slot<T>>>> {
        // No handler ever runs under this lock, so a poisoned list is still consistent.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> Vec<Arc<Slot<T>>> {
        self.lock().clone()
    }

    fn prune(&self, dead: &[SubscriptionId]) {
        self.lock().retain(|slot| {
            if dead.contains(&slot.id) {
                slot.deactivate();
                false
            } else {
                true
            }
        });
    }
}

impl<T: 'static> Detach for Shared<T> {
    fn detach(&self, id: SubscriptionId) {
        self.lock().retain(|slot| slot.id != id);
    }
}

/// Typed publish/subscribe channel owned by a single publisher.
///
/// ### Properties
/// - **Synchronous**: `publish()` returns after every handler has run.
/// - **Ordered**: subscribers are visited in registration order.
/// - **Non-owning**: targets are held as [`Weak`]; dead ones are skipped.
/// - **Thread-safe**: `Send + Sync`; the list is guarded by a mutex that is
///   never held while a handler runs.
pub struct EventChannel<T> {
    shared: Arc<Shared<T>>,
    dead_targets: DeadTargetPolicy,
}

impl<T: 'static> EventChannel<T> {
    /// Creates an empty channel with the default [`DeadTargetPolicy`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(DeadTargetPolicy::default())
    }

    /// Creates an empty channel with the given dead-target policy.
    #[must_use]
    pub fn with_policy(dead_targets: DeadTargetPolicy) -> Self {
        Self {
            shared: Arc::new(Shared {
                slots: Mutex::new(Vec::new()),
            }),
            dead_targets,
        }
    }

    /// Creates an empty channel configured from [`Config::dead_targets`].
    #[must_use]
    pub fn with_config(cfg: &Config) -> Self {
        Self::with_policy(cfg.dead_targets)
    }

    /// Registers `handler` bound to `target`.
    ///
    /// The channel keeps only a weak reference: at publish time the target is
    /// resolved and, if still alive, `handler(&target, &payload)` runs. Method
    /// paths such as `Doctor::call` fit the `Fn(&U, &T)` shape directly.
    pub fn subscribe<U, F>(&self, target: &Arc<U>, handler: F) -> Subscription
    where
        U: Send + Sync + 'static,
        F: Fn(&U, &T) + Send + Sync + 'static,
    {
        self.register(Arc::downgrade(target), move |u, payload| {
            handler(u, payload);
            Ok(())
        })
    }

    /// Registers a fallible handler bound to `target`.
    ///
    /// An `Err` returned by the handler aborts the publish that triggered it
    /// and is reported as [`PublishError::Handler`].
    pub fn try_subscribe<U, F>(&self, target: &Arc<U>, handler: F) -> Subscription
    where
        U: Send + Sync + 'static,
        F: Fn(&U, &T) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.register(Arc::downgrade(target), handler)
    }

    /// Registers `handler` bound to an already-weak target.
    ///
    /// # Errors
    /// Returns [`SubscribeError::DeadTarget`] if `target` does not resolve;
    /// the channel is left unmodified.
    pub fn subscribe_weak<U, F>(&self, target: Weak<U>, handler: F) -> Result<Subscription, SubscribeError>
    where
        U: Send + Sync + 'static,
        F: Fn(&U, &T) + Send + Sync + 'static,
    {
        if target.strong_count() == 0 {
            return Err(SubscribeError::DeadTarget);
        }
        Ok(self.register(target, move |u, payload| {
            handler(u, payload);
            Ok(())
        }))
    }

    /// Registers a plain closure with no target.
    ///
    /// The closure is owned by the channel and lives until disposed.
    pub fn subscribe_fn<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.attach(Box::new(move |payload: &T| {
            handler(payload);
            Some(Ok(()))
        }))
    }

    /// Delivers `payload` to every active subscription, in registration order.
    ///
    /// # Errors
    /// Returns [`PublishError::Handler`] for the first handler that fails;
    /// later subscribers are not visited.
    pub fn publish(&self, payload: &T) -> Result<Delivery, PublishError> {
        self.deliver(payload, |_| false)
    }

    /// Number of registrations currently held (dead targets included until disposed or pruned).
    pub fn len(&self) -> usize {
        self.shared.lock().len()
    }

    /// True if no registration is held.
    pub fn is_empty(&self) -> bool {
        self.shared.lock().is_empty()
    }

    /// Disposes every registration.
    pub fn clear(&self) {
        let slots = std::mem::take(&mut *self.shared.lock());
        for slot in slots {
            slot.deactivate();
        }
    }

    /// Policy applied to dead targets.
    #[inline]
    pub fn dead_targets(&self) -> DeadTargetPolicy {
        self.dead_targets
    }

    /// Delivery loop shared by `publish` and the short-circuit veto.
    ///
    /// `halt` is checked after each invoked handler; returning `true` stops the loop.
    pub(crate) fn deliver<H>(&self, payload: &T, halt: H) -> Result<Delivery, PublishError>
    where
        H: Fn(&T) -> bool,
    {
        let snapshot = self.shared.snapshot();
        let mut delivery = Delivery::default();
        let mut dead = Vec::new();
        let mut outcome = Ok(());

        for slot in &snapshot {
            if !slot.is_active() {
                continue;
            }
            match (slot.invoke)(payload) {
                Some(Ok(())) => delivery.delivered += 1,
                Some(Err(source)) => {
                    outcome = Err(PublishError::Handler {
                        subscription: slot.id,
                        source,
                    });
                    break;
                }
                None => {
                    delivery.skipped += 1;
                    if self.dead_targets.prunes() {
                        dead.push(slot.id);
                    }
                    continue;
                }
            }
            if halt(payload) {
                delivery.halted = true;
                break;
            }
        }

        if !dead.is_empty() {
            self.shared.prune(&dead);
        }
        outcome.map(|()| delivery)
    }

    fn register<U, F>(&self, target: Weak<U>, handler: F) -> Subscription
    where
        U: Send + Sync + 'static,
        F: Fn(&U, &T) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.attach(Box::new(move |payload: &T| {
            target.upgrade().map(|u| handler(&*u, payload))
        }))
    }

    fn attach(&self, invoke: Invoke<T>) -> Subscription {
        let id = SubscriptionId::next();
        let active = Arc::new(AtomicBool::new(true));
        self.shared.lock().push(Arc::new(Slot {
            id,
            active: Arc::clone(&active),
            invoke,
        }));

        let weak = Arc::downgrade(&self.shared);
        let channel: Weak<dyn Detach> = weak;
        Subscription::new(id, active, channel)
    }
}

impl<T: 'static> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscriber_count", &self.shared.lock().len())
            .field("dead_targets", &self.dead_targets)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    type Log = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        log: Log,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Log) -> Arc<Self> {
            Arc::new(Self {
                name,
                log: Arc::clone(log),
            })
        }

        fn record(&self, v: &i32) {
            self.log.lock().unwrap().push(format!("{}:{}", self.name, v));
        }

        fn reject_negative(&self, v: &i32) -> Result<(), HandlerError> {
            if *v < 0 {
                return Err(HandlerError::failed(format!("{} rejects {}", self.name, v)));
            }
            self.record(v);
            Ok(())
        }

        fn panic_on_negative(&self, v: &i32) {
            assert!(*v >= 0, "{} cannot take {}", self.name, v);
            self.record(v);
        }
    }

    fn new_log() -> Log {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_dispose_scenario() {
        let log = new_log();
        let channel = EventChannel::<i32>::new();
        let h1 = Recorder::new("h1", &log);
        let h2 = Recorder::new("h2", &log);

        let s1 = channel.subscribe(&h1, Recorder::record);
        let _s2 = channel.subscribe(&h2, Recorder::record);

        let d = channel.publish(&5).unwrap();
        assert_eq!(d.delivered, 2);
        assert_eq!(entries(&log), vec!["h1:5", "h2:5"]);

        s1.dispose();
        channel.publish(&7).unwrap();
        assert_eq!(entries(&log), vec!["h1:5", "h2:5", "h2:7"]);
    }

    #[test]
    fn test_delivery_follows_registration_order() {
        const NAMES: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let mut rng = rand::rng();

        for _ in 0..20 {
            let log = new_log();
            let channel = EventChannel::<i32>::new();
            let n = rng.random_range(1..=NAMES.len());
            let targets: Vec<_> = NAMES[..n].iter().map(|name| Recorder::new(*name, &log)).collect();
            let _subs: Vec<_> = targets
                .iter()
                .map(|t| channel.subscribe(t, Recorder::record))
                .collect();

            let x = rng.random_range(-100..100);
            channel.publish(&x).unwrap();

            let expected: Vec<String> = NAMES[..n].iter().map(|name| format!("{name}:{x}")).collect();
            assert_eq!(entries(&log), expected);
        }
    }

    #[test]
    fn test_dead_target_is_skipped() {
        let log = new_log();
        let channel = EventChannel::<i32>::new();
        let a = Recorder::new("a", &log);
        let b = Recorder::new("b", &log);
        let c = Recorder::new("c", &log);

        let _sa = channel.subscribe(&a, Recorder::record);
        let sb = channel.subscribe(&b, Recorder::record);
        let _sc = channel.subscribe(&c, Recorder::record);
        drop(b);

        let d = channel.publish(&1).unwrap();
        assert_eq!(d, Delivery { delivered: 2, skipped: 1, halted: false });
        assert_eq!(entries(&log), vec!["a:1", "c:1"]);

        // Skip keeps the registration until it is disposed.
        assert_eq!(channel.len(), 3);
        assert!(sb.is_active());
        sb.dispose();
        assert_eq!(channel.len(), 2);
    }

    #[test]
    fn test_prune_policy_removes_dead_targets() {
        let log = new_log();
        let channel = EventChannel::<i32>::with_policy(DeadTargetPolicy::Prune);
        let a = Recorder::new("a", &log);
        let b = Recorder::new("b", &log);

        let _sa = channel.subscribe(&a, Recorder::record);
        let sb = channel.subscribe(&b, Recorder::record);
        drop(b);

        assert_eq!(channel.publish(&1).unwrap().skipped, 1);
        assert_eq!(channel.len(), 1);
        assert!(!sb.is_active());
        assert_eq!(channel.publish(&2).unwrap().skipped, 0);
    }

    #[test]
    fn test_with_config_uses_dead_target_policy() {
        let cfg = Config {
            dead_targets: DeadTargetPolicy::Prune,
            ..Config::default()
        };
        assert_eq!(EventChannel::<i32>::with_config(&cfg).dead_targets(), DeadTargetPolicy::Prune);
        assert_eq!(EventChannel::<i32>::new().dead_targets(), DeadTargetPolicy::Skip);
    }

    #[test]
    fn test_double_dispose_is_noop() {
        let log = new_log();
        let channel = EventChannel::<i32>::new();
        let a = Recorder::new("a", &log);
        let b = Recorder::new("b", &log);

        let sa = channel.subscribe(&a, Recorder::record);
        let _sb = channel.subscribe(&b, Recorder::record);

        sa.dispose();
        sa.dispose();
        assert_eq!(channel.len(), 1);

        channel.publish(&3).unwrap();
        assert_eq!(entries(&log), vec!["b:3"]);
    }

    #[test]
    fn test_subscribe_does_not_keep_target_alive() {
        let log = new_log();
        let channel = EventChannel::<i32>::new();
        let a = Recorder::new("a", &log);
        let _sa = channel.subscribe(&a, Recorder::record);

        let weak = Arc::downgrade(&a);
        drop(a);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_subscribe_weak_rejects_dead_target() {
        let log = new_log();
        let channel = EventChannel::<i32>::new();
        let a = Recorder::new("a", &log);
        let weak = Arc::downgrade(&a);
        drop(a);

        let err = channel.subscribe_weak(weak, Recorder::record).unwrap_err();
        assert_eq!(err, SubscribeError::DeadTarget);
        assert!(channel.is_empty());
    }

    #[test]
    fn test_subscribe_weak_live_target() {
        let log = new_log();
        let channel = EventChannel::<i32>::new();
        let a = Recorder::new("a", &log);

        let sub = channel.subscribe_weak(Arc::downgrade(&a), Recorder::record).unwrap();
        channel.publish(&9).unwrap();
        assert!(sub.is_active());
        assert_eq!(entries(&log), vec!["a:9"]);
    }

    #[test]
    fn test_handler_error_aborts_remaining_delivery() {
        let log = new_log();
        let channel = EventChannel::<i32>::new();
        let a = Recorder::new("a", &log);
        let b = Recorder::new("b", &log);
        let c = Recorder::new("c", &log);

        let _sa = channel.subscribe(&a, Recorder::record);
        let sb = channel.try_subscribe(&b, Recorder::reject_negative);
        let _sc = channel.subscribe(&c, Recorder::record);

        let err = channel.publish(&-1).unwrap_err();
        assert_eq!(err.subscription(), sb.id());
        assert_eq!(entries(&log), vec!["a:-1"]);

        channel.publish(&2).unwrap();
        assert_eq!(entries(&log), vec!["a:-1", "a:2", "b:2", "c:2"]);
    }

    #[test]
    fn test_handler_panic_unwinds_through_publish() {
        let log = new_log();
        let channel = EventChannel::<i32>::new();
        let a = Recorder::new("a", &log);
        let b = Recorder::new("b", &log);
        let c = Recorder::new("c", &log);

        let _sa = channel.subscribe(&a, Recorder::record);
        let _sb = channel.subscribe(&b, Recorder::panic_on_negative);
        let _sc = channel.subscribe(&c, Recorder::record);

        let panicked =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| channel.publish(&-1)));
        let payload = panicked.unwrap_err();
        assert_eq!(
            payload.downcast_ref::<String>().map(String::as_str),
            Some("b cannot take -1")
        );
        assert_eq!(entries(&log), vec!["a:-1"]);

        // The slot list is intact and its lock is not poisoned.
        assert_eq!(channel.len(), 3);
        let d = channel.publish(&4).unwrap();
        assert_eq!(d.delivered, 3);
        assert_eq!(entries(&log), vec!["a:-1", "a:4", "b:4", "c:4"]);
    }

    #[test]
    fn test_handler_may_dispose_itself() {
        let channel = EventChannel::<i32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let own: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let sub = {
            let seen = Arc::clone(&seen);
            let own = Arc::clone(&own);
            channel.subscribe_fn(move |v| {
                seen.lock().unwrap().push(*v);
                if let Some(sub) = own.lock().unwrap().as_ref() {
                    sub.dispose();
                }
            })
        };
        *own.lock().unwrap() = Some(sub.clone());

        channel.publish(&1).unwrap();
        channel.publish(&2).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert!(!sub.is_active());
        assert!(channel.is_empty());
    }

    #[test]
    fn test_dispose_during_publish_skips_later_subscriber() {
        let log = new_log();
        let channel = EventChannel::<i32>::new();
        let late = Recorder::new("late", &log);
        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let _first = {
            let victim = Arc::clone(&victim);
            channel.subscribe_fn(move |_| {
                if let Some(sub) = victim.lock().unwrap().take() {
                    sub.dispose();
                }
            })
        };
        let late_sub = channel.subscribe(&late, Recorder::record);
        *victim.lock().unwrap() = Some(late_sub);

        let d = channel.publish(&4).unwrap();
        assert_eq!(d.delivered, 1);
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn test_subscribe_during_publish_sees_next_publish() {
        let channel = Arc::new(EventChannel::<i32>::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let added: Arc<Mutex<Vec<Subscription>>> = Arc::new(Mutex::new(Vec::new()));

        let _sub = {
            let weak_channel = Arc::downgrade(&channel);
            let seen = Arc::clone(&seen);
            let added = Arc::clone(&added);
            channel.subscribe_fn(move |v| {
                if *v != 1 {
                    return;
                }
                if let Some(ch) = weak_channel.upgrade() {
                    let seen = Arc::clone(&seen);
                    let sub = ch.subscribe_fn(move |v| seen.lock().unwrap().push(*v));
                    added.lock().unwrap().push(sub);
                }
            })
        };

        assert_eq!(channel.publish(&1).unwrap().delivered, 1);
        assert!(seen.lock().unwrap().is_empty());

        assert_eq!(channel.publish(&2).unwrap().delivered, 2);
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_nested_publish_on_same_channel() {
        let channel = Arc::new(EventChannel::<i32>::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let _sub = {
            let weak_channel = Arc::downgrade(&channel);
            let seen = Arc::clone(&seen);
            channel.subscribe_fn(move |v| {
                seen.lock().unwrap().push(*v);
                if *v > 0 {
                    if let Some(ch) = weak_channel.upgrade() {
                        ch.publish(&(v - 1)).unwrap();
                    }
                }
            })
        };

        channel.publish(&3).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_clear_disposes_all() {
        let log = new_log();
        let channel = EventChannel::<i32>::new();
        let a = Recorder::new("a", &log);
        let sa = channel.subscribe(&a, Recorder::record);
        let sf = channel.subscribe_fn(|_| {});

        channel.clear();
        assert!(channel.is_empty());
        assert!(!sa.is_active());
        assert!(!sf.is_active());
        assert!(channel.publish(&1).unwrap().is_empty());
    }

    #[test]
    fn test_dropping_channel_deactivates_handles() {
        let channel = EventChannel::<i32>::new();
        let sub = channel.subscribe_fn(|_| {});
        drop(channel);
        assert!(!sub.is_active());
        sub.dispose();
    }

    #[test]
    fn test_guard_scopes_delivery() {
        let log = new_log();
        let channel = EventChannel::<i32>::new();
        let a = Recorder::new("a", &log);
        {
            let _guard = channel.subscribe(&a, Recorder::record).into_guard();
            channel.publish(&1).unwrap();
        }
        channel.publish(&2).unwrap();
        assert_eq!(entries(&log), vec!["a:1"]);
    }

    #[test]
    fn test_channel_is_send_and_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<EventChannel<i32>>();
        assert_send_sync::<Subscription>();
    }
}
