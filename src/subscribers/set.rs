//! # Non-blocking fan-out to async subscribers.
//!
//! Provides [`SubscriberSet`] — forwards payloads to multiple [`Subscribe`]
//! implementations concurrently without blocking the publisher. Attached to
//! an [`EventChannel`], it turns the synchronous channel into an event broker
//! for async consumers.
//!
//! ## Architecture
//! ```text
//! EventChannel<T>::publish(&payload)
//!     │  (SubscriberSet is a weakly-held target like any other)
//!     ▼
//! emit(&payload) ── Arc<T> ──┬──► [queue 1] ──► worker 1 ──► subscriber1.on_event()
//!                            │    (bounded)         └──────► panic → Notice
//!                            ├──► [queue 2] ──► worker 2 ──► subscriber2.on_event()
//!                            └──► [queue N] ──► worker N ──► subscriberN.on_event()
//!                                 full/closed → Notice (payload dropped for that subscriber)
//! ```
//!
//! ## Rules
//! - **No cross-subscriber ordering**: subscriber A may process payload N while B processes N+5
//! - **Per-subscriber FIFO**: each subscriber sees payloads in emit order
//! - **Non-blocking**: `emit()` returns immediately (uses `try_send`)
//! - **Isolation**: a slow or panicking subscriber doesn't affect others
//!
//! ## Panic handling
//! Workers use `catch_unwind`: the panic becomes a [`Notice`] and the worker
//! continues with the next payload.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a subscriber uses `Arc<Mutex<T>>` and panics while holding the lock.
//!
//! ## Shutdown
//! - [`shutdown`](SubscriberSet::shutdown): close queues, let workers drain, join them.
//! - [`abort`](SubscriberSet::abort): cancel workers; queued payloads are discarded.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::events::{EventChannel, Subscription};

use super::{Notice, Subscribe};

/// Per-subscriber channel metadata.
struct SubscriberChannel<T> {
    name: &'static str,
    sender: mpsc::Sender<Arc<T>>,
}

/// Fan-out coordinator for async subscribers of payload type `T`.
///
/// Manages per-subscriber queues and worker tasks, providing:
/// - **Concurrent delivery**: payloads sent to all subscribers simultaneously
/// - **Isolation**: each subscriber has a dedicated queue and worker
/// - **Panic safety**: panics caught and reported as notices
/// - **Overflow handling**: dropped payloads reported as notices
pub struct SubscriberSet<T> {
    channels: RwLock<Vec<SubscriberChannel<T>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    notices: Arc<EventChannel<Notice>>,
    token: CancellationToken,
}

impl<T> SubscriberSet<T>
where
    T: Send + Sync + 'static,
{
    /// Creates a new set and spawns one worker task per subscriber.
    ///
    /// ### Per-subscriber setup
    /// - Bounded mpsc queue (capacity from [`Subscribe::queue_capacity`], else
    ///   [`Config::queue_capacity`]; minimum 1)
    /// - Dedicated worker task (runs until the queue closes or the set is aborted)
    ///
    /// ### Panics
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe<T>>>, cfg: &Config) -> Self {
        let notices = Arc::new(EventChannel::with_config(cfg));
        let token = CancellationToken::new();
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub
                .queue_capacity()
                .unwrap_or_else(|| cfg.queue_capacity_clamped())
                .max(1);
            let name = sub.name();
            let (tx, rx) = mpsc::channel::<Arc<T>>(cap);

            workers.push(tokio::spawn(worker(
                sub,
                rx,
                Arc::clone(&notices),
                token.child_token(),
            )));
            channels.push(SubscriberChannel { name, sender: tx });
        }

        Self {
            channels: RwLock::new(channels),
            workers: Mutex::new(workers),
            notices,
            token,
        }
    }

    /// Channel on which overflow and panic [`Notice`]s are published.
    pub fn notices(&self) -> &EventChannel<Notice> {
        &self.notices
    }

    /// Emits a payload to all subscribers (clones it once).
    ///
    /// Has the `Fn(&Self, &T)` shape, so it can be used directly as a channel
    /// handler; see [`attach`](Self::attach).
    pub fn emit(&self, event: &T)
    where
        T: Clone,
    {
        self.emit_arc(Arc::new(event.clone()));
    }

    /// Emits a pre-allocated `Arc<T>` to all subscribers.
    ///
    /// - Uses `try_send` (non-blocking)
    /// - On queue full: drops the payload for that subscriber, raises an overflow notice
    /// - On queue closed: raises an overflow notice with reason "closed"
    ///
    /// Notices are published after the subscriber list lock is released, so
    /// notice handlers may call back into the set.
    pub fn emit_arc(&self, event: Arc<T>) {
        let dropped: Vec<(&'static str, &'static str)> = {
            let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
            channels
                .iter()
                .filter_map(|channel| match channel.sender.try_send(Arc::clone(&event)) {
                    Ok(()) => None,
                    Err(mpsc::error::TrySendError::Full(_)) => Some((channel.name, "full")),
                    Err(mpsc::error::TrySendError::Closed(_)) => Some((channel.name, "closed")),
                })
                .collect()
        };

        for (name, reason) in dropped {
            let _ = self.notices.publish(&Notice::subscriber_overflow(name, reason));
        }
    }

    /// Forwards every payload published on `source` to this set.
    ///
    /// The channel holds the set weakly: dropping the last `Arc` ends forwarding.
    pub fn attach(self: &Arc<Self>, source: &EventChannel<T>) -> Subscription
    where
        T: Clone,
    {
        source.subscribe(self, Self::emit)
    }

    /// Gracefully shuts down all subscriber workers.
    ///
    /// 1. Drops all queue senders (workers see the queue closed after draining it)
    /// 2. Awaits all worker tasks
    ///
    /// Payloads emitted afterwards are ignored.
    pub async fn shutdown(&self) {
        drop(std::mem::take(
            &mut *self.channels.write().unwrap_or_else(PoisonError::into_inner),
        ));
        self.join().await;
    }

    /// Stops all workers without draining their queues.
    pub async fn abort(&self) {
        self.token.cancel();
        drop(std::mem::take(
            &mut *self.channels.write().unwrap_or_else(PoisonError::into_inner),
        ));
        self.join().await;
    }

    /// Number of subscribers still accepting payloads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True if there are no subscribers (or the set was shut down).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn join(&self) {
        let workers = std::mem::take(&mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner));
        for h in workers {
            let _ = h.await;
        }
    }
}

/// Worker loop for one subscriber.
async fn worker<T>(
    sub: Arc<dyn Subscribe<T>>,
    mut rx: mpsc::Receiver<Arc<T>>,
    notices: Arc<EventChannel<Notice>>,
    token: CancellationToken,
) where
    T: Send + Sync + 'static,
{
    loop {
        let ev = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            ev = rx.recv() => match ev {
                Some(ev) => ev,
                None => break,
            },
        };

        let fut = sub.on_event(ev.as_ref());
        if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
            let info = {
                let any = &*panic_err;
                if let Some(msg) = any.downcast_ref::<&'static str>() {
                    (*msg).to_string()
                } else if let Some(msg) = any.downcast_ref::<String>() {
                    msg.clone()
                } else {
                    "unknown panic".to_string()
                }
            };
            let _ = notices.publish(&Notice::subscriber_panicked(sub.name(), info));
        }
    }
}
