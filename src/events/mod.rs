//! Typed event channels and subscription handles.
//!
//! This module groups the synchronous **publish/subscribe primitive**:
//! a channel owned by one publisher, the handles given to subscribers, and
//! the report returned by each publish.
//!
//! ## Contents
//! - [`EventChannel`] ordered, synchronous fan-out over weakly-held targets
//! - [`Subscription`], [`SubscriptionGuard`] handles that end delivery
//! - [`SubscriptionId`] unique identity of a registration
//! - [`Delivery`] how many handlers ran, how many dead targets were skipped
//!
//! ## Quick reference
//! ```text
//! publisher ──owns──► EventChannel<T> ──► [slot s1] [slot s2] ... [slot sN]
//!                          ▲                  │ Weak<U1>  │ Weak<U2>
//!                          │                  ▼           ▼
//! subscriber ──holds──► Subscription      target alive? → handler(&target, &payload)
//!                        (dispose)         target gone? → skipped
//! ```
//!
//! See `property/mod.rs` for the two-phase notification built on top.

mod channel;
mod delivery;
mod subscription;

pub use channel::EventChannel;
pub use delivery::Delivery;
pub use subscription::{Subscription, SubscriptionGuard, SubscriptionId};

pub(crate) use subscription::Detach;
