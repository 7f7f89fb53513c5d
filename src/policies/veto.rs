//! # Veto policies for the changing phase.
//!
//! [`VetoPolicy`] determines whether a "changing" notification keeps being
//! delivered after one subscriber has cancelled the change.
//!
//! ```text
//! VetoPolicy::RunAll        → every changing subscriber runs, then the flag is checked
//! VetoPolicy::ShortCircuit  → delivery stops right after the first cancel()
//! ```
//!
//! Either way a cancelled change is never applied and raises no "changed"
//! notification.

/// Policy controlling delivery of a cancellable notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VetoPolicy {
    /// Deliver to every changing subscriber before checking the flag (default).
    #[default]
    RunAll,
    /// Stop delivering as soon as a subscriber cancels.
    ShortCircuit,
}

impl VetoPolicy {
    /// True if delivery halts at the first cancellation.
    #[inline]
    pub fn short_circuits(&self) -> bool {
        matches!(self, VetoPolicy::ShortCircuit)
    }
}
