//! # Dead-target handling for event channels.
//!
//! A subscription holds its target weakly. When the target is dropped the
//! subscription becomes inert; [`DeadTargetPolicy`] decides whether the
//! channel keeps the inert entry around or removes it.
//!
//! ```text
//! DeadTargetPolicy::Skip   → skipped on every publish, removed only by dispose()
//! DeadTargetPolicy::Prune  → skipped once, then removed at the end of that publish
//! ```

/// Policy controlling what a channel does with subscriptions whose target was dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeadTargetPolicy {
    /// Skip silently and keep the registration (default).
    #[default]
    Skip,
    /// Skip, then remove the registration once the publish finishes.
    ///
    /// Pruned handles report `is_active() == false`.
    Prune,
}

impl DeadTargetPolicy {
    /// True if dead registrations are removed after delivery.
    #[inline]
    pub fn prunes(&self) -> bool {
        matches!(self, DeadTargetPolicy::Prune)
    }
}
