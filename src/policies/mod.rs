//! Delivery and veto policies.
//!
//! This module groups the knobs that control **what happens to stale
//! subscriptions** and **how a cancellable change is voted on**.
//!
//! ## Contents
//! - [`DeadTargetPolicy`] skip or prune subscriptions whose target was dropped
//! - [`VetoPolicy`]       run every "changing" subscriber, or stop at the first veto
//!
//! ## Quick wiring
//! ```text
//! Config { dead_targets: DeadTargetPolicy, veto: VetoPolicy, .. }
//!      ├─► EventChannel::with_config uses dead_targets after each publish
//!      └─► PropertyEvents::with_config uses veto during the changing phase
//! ```
//!
//! ## Defaults
//! - `DeadTargetPolicy::Skip` (dead targets stay registered until disposed).
//! - `VetoPolicy::RunAll` (every veto-voter is heard before the flag is checked).

mod dead_target;
mod veto;

pub use dead_target::DeadTargetPolicy;
pub use veto::VetoPolicy;
