//! # Async subscribers and the fan-out broker.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] that
//! drives implementations of it, and the diagnostics it raises.
//!
//! ## Architecture
//! ```text
//! Payload flow:
//!   Publisher ── publish(&T) ──► EventChannel<T> ──► sync handlers (in-line)
//!                                      │
//!                                      └──► SubscriberSet<T>::emit (weak target)
//!                                                 │
//!                                            ┌────┴────┬─────────┬───────┐
//!                                            ▼         ▼         ▼       ▼
//!                                          Coach    Metrics   Custom    ...
//!                                      (async Subscribe::on_event per worker)
//!
//! Diagnostics:
//!   SubscriberSet ── overflow / panic ──► notices: EventChannel<Notice>
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use eventvisor::Subscribe;
//! use async_trait::async_trait;
//!
//! struct GoalCounter;
//!
//! #[async_trait]
//! impl Subscribe<u32> for GoalCounter {
//!     async fn on_event(&self, goals: &u32) {
//!         if *goals >= 3 {
//!             // hat-trick alert
//!         }
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod embedded;
mod notice;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use notice::{Notice, NoticeKind};
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
