//! # Delivery report returned by a publish.

/// Outcome of one successful [`EventChannel::publish`](crate::EventChannel::publish).
///
/// - `delivered`: handlers invoked, in registration order
/// - `skipped`: subscriptions whose weak target no longer resolved
/// - `halted`: delivery stopped early (short-circuit veto)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Number of handlers that ran.
    pub delivered: usize,
    /// Number of dead targets skipped.
    pub skipped: usize,
    /// True if the remaining subscribers were not visited.
    pub halted: bool,
}

impl Delivery {
    /// True if no handler ran.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.delivered == 0
    }
}
