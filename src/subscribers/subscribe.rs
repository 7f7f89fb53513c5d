//! # Async subscriber trait
//!
//! `Subscribe<T>` is the extension point for plugging asynchronous handlers
//! behind an [`EventChannel`](crate::EventChannel). Each subscriber is driven
//! by a dedicated worker task fed by a bounded queue owned by the
//! [`SubscriberSet`](crate::SubscriberSet).
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching, retries) – they do **not** block
//!   the publisher nor other subscribers.
//! - Each subscriber may **declare** its preferred queue capacity via
//!   [`Subscribe::queue_capacity`]; `None` falls back to
//!   [`Config::queue_capacity`](crate::Config::queue_capacity). If a queue
//!   overflows, payloads for that subscriber are **dropped** and a
//!   [`Notice`](crate::Notice) is raised.
//!
//! ## Example
//! ```rust
//! use eventvisor::Subscribe;
//!
//! struct Coach;
//!
//! #[async_trait::async_trait]
//! impl Subscribe<u32> for Coach {
//!     async fn on_event(&self, goals: &u32) {
//!         println!("you scored {goals} goals!");
//!     }
//!     fn name(&self) -> &'static str { "coach" }
//!     fn queue_capacity(&self) -> Option<usize> { Some(64) }
//! }
//! ```

use async_trait::async_trait;

/// Contract for asynchronous subscribers of payload type `T`.
///
/// Called from a subscriber-dedicated worker task. Implementations should avoid
/// blocking the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Subscribe<T>: Send + Sync + 'static
where
    T: Send + Sync + 'static,
{
    /// Handle a single payload for this subscriber.
    ///
    /// # Parameters
    /// - `event`: Reference to the payload (shared with the other subscribers)
    async fn on_event(&self, event: &T);

    /// Human-readable name (for notices and logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this subscriber's queue (`None` = configured default).
    fn queue_capacity(&self) -> Option<usize> {
        None
    }
}
