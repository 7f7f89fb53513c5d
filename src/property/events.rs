//! # Changing/changed channel pair.
//!
//! [`PropertyEvents`] is what a publisher embeds next to its properties: one
//! channel for cancellable pre-write notifications and one for post-write
//! notifications. Writes go through [`Property::set`](crate::Property::set),
//! which drives both phases.

use crate::config::Config;
use crate::error::PublishError;
use crate::events::{Delivery, EventChannel};
use crate::policies::{DeadTargetPolicy, VetoPolicy};

use super::{PropertyChanged, PropertyChanging};

/// The two notification channels of a publisher.
#[derive(Debug, Default)]
pub struct PropertyEvents {
    /// Pre-write notifications (like `willSet`); subscribers may cancel.
    pub changing: EventChannel<PropertyChanging>,
    /// Post-write notifications (like `didSet`).
    pub changed: EventChannel<PropertyChanged>,
    veto: VetoPolicy,
}

impl PropertyEvents {
    /// Creates both channels with default policies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates both channels from `cfg` (`dead_targets` and `veto`).
    #[must_use]
    pub fn with_config(cfg: &Config) -> Self {
        Self {
            changing: EventChannel::with_config(cfg),
            changed: EventChannel::with_config(cfg),
            veto: cfg.veto,
        }
    }

    /// Creates both channels with explicit policies.
    #[must_use]
    pub fn with_policies(dead_targets: DeadTargetPolicy, veto: VetoPolicy) -> Self {
        Self {
            changing: EventChannel::with_policy(dead_targets),
            changed: EventChannel::with_policy(dead_targets),
            veto,
        }
    }

    /// Veto policy applied during the changing phase.
    #[inline]
    pub fn veto(&self) -> VetoPolicy {
        self.veto
    }

    /// Runs the changing phase. The caller checks `ev.is_cancelled()` afterwards.
    pub(crate) fn raise_changing(&self, ev: &PropertyChanging) -> Result<Delivery, PublishError> {
        if self.veto.short_circuits() {
            self.changing.deliver(ev, PropertyChanging::is_cancelled)
        } else {
            self.changing.publish(ev)
        }
    }

    pub(crate) fn raise_changed(&self, ev: &PropertyChanged) -> Result<Delivery, PublishError> {
        self.changed.publish(ev)
    }
}
