//! # Global configuration.
//!
//! Provides [`Config`] centralized settings for channels, property events and
//! the async subscriber set.
//!
//! Config is used in three ways:
//! 1. **Channel creation**: `EventChannel::with_config(&config)`
//! 2. **Property events**: `PropertyEvents::with_config(&config)`
//! 3. **Async fan-out**: `SubscriberSet::new(subscribers, &config)`
//!
//! ## Sentinel values
//! - `queue_capacity = 0` → clamped to 1 by [`Config::queue_capacity_clamped`]

use crate::policies::{DeadTargetPolicy, VetoPolicy};

/// Global configuration for event delivery.
///
/// ## Field semantics
/// - `dead_targets`: what a channel does with subscriptions whose target was dropped
/// - `veto`: how the changing phase of a property write is voted on
/// - `queue_capacity`: default per-subscriber queue size for [`SubscriberSet`](crate::SubscriberSet)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Handling of subscriptions whose weak target no longer resolves.
    pub dead_targets: DeadTargetPolicy,

    /// Evaluation of "changing" vetoes.
    pub veto: VetoPolicy,

    /// Default capacity of each async subscriber queue.
    ///
    /// Used when [`Subscribe::queue_capacity`](crate::Subscribe::queue_capacity)
    /// returns `None`. Events that do not fit are dropped for that subscriber
    /// and reported as a [`Notice`](crate::Notice).
    pub queue_capacity: usize,
}

impl Config {
    /// Returns the queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `dead_targets = DeadTargetPolicy::Skip`
    /// - `veto = VetoPolicy::RunAll`
    /// - `queue_capacity = 1024`
    fn default() -> Self {
        Self {
            dead_targets: DeadTargetPolicy::default(),
            veto: VetoPolicy::default(),
            queue_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.dead_targets, DeadTargetPolicy::Skip);
        assert_eq!(cfg.veto, VetoPolicy::RunAll);
        assert_eq!(cfg.queue_capacity_clamped(), 1024);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cfg = Config {
            queue_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.queue_capacity_clamped(), 1);
    }
}
