//! # LogWriter — simple notification printer
//!
//! A minimal subscriber that prints property notifications and subscriber
//! notices to stdout. Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [changing] property="age" value=12
//! [changed] property="age" value=20
//! [changed] property="can_vote" value=true
//! [subscriber-overflow] subscriber="audit" reason=full
//! [subscriber-panicked] subscriber="audit" info=boom
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::events::Subscription;
use crate::property::{PropertyChanged, PropertyChanging, PropertyEvents};
use crate::subscribers::{Notice, NoticeKind, Subscribe};

/// Notification writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Subscribes to both channels of `events`.
    pub fn attach(self: &Arc<Self>, events: &PropertyEvents) -> [Subscription; 2] {
        [
            events.changing.subscribe(self, LogWriter::on_changing),
            events.changed.subscribe(self, LogWriter::on_changed),
        ]
    }

    /// Prints a changing notification.
    pub fn on_changing(&self, e: &PropertyChanging) {
        println!("{}", Self::changing_line(e));
    }

    /// Prints a changed notification.
    pub fn on_changed(&self, e: &PropertyChanged) {
        println!("{}", Self::changed_line(e));
    }

    /// Prints a subscriber-set notice; subscribe it to
    /// [`SubscriberSet::notices`](crate::SubscriberSet::notices).
    pub fn on_notice(&self, n: &Notice) {
        println!("{}", Self::notice_line(n));
    }

    fn changing_line(e: &PropertyChanging) -> String {
        format!("[changing] property={:?} value={}", e.name(), e.value())
    }

    fn changed_line(e: &PropertyChanged) -> String {
        format!("[changed] property={:?} value={}", &*e.name, e.value)
    }

    fn notice_line(n: &Notice) -> String {
        match n.kind {
            NoticeKind::SubscriberOverflow => format!(
                "[subscriber-overflow] subscriber={:?} reason={}",
                n.subscriber, n.reason
            ),
            NoticeKind::SubscriberPanicked => format!(
                "[subscriber-panicked] subscriber={:?} info={}",
                n.subscriber, n.reason
            ),
        }
    }
}

#[async_trait]
impl Subscribe<PropertyChanged> for LogWriter {
    async fn on_event(&self, e: &PropertyChanged) {
        self.on_changed(e);
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        assert_eq!(
            LogWriter::changing_line(&PropertyChanging::new("age", 12u32)),
            "[changing] property=\"age\" value=12"
        );
        assert_eq!(
            LogWriter::changed_line(&PropertyChanged::new("can_vote", true)),
            "[changed] property=\"can_vote\" value=true"
        );
        assert_eq!(
            LogWriter::notice_line(&Notice::subscriber_overflow("audit", "full")),
            "[subscriber-overflow] subscriber=\"audit\" reason=full"
        );
        assert_eq!(
            LogWriter::notice_line(&Notice::subscriber_panicked("audit", "boom".into())),
            "[subscriber-panicked] subscriber=\"audit\" info=boom"
        );
    }

    #[test]
    fn test_attach_subscribes_both_channels() {
        let events = PropertyEvents::new();
        let writer = Arc::new(LogWriter::new());
        let subs = writer.attach(&events);

        assert_eq!(events.changing.len(), 1);
        assert_eq!(events.changed.len(), 1);
        subs.iter().for_each(Subscription::dispose);
        assert!(events.changing.is_empty() && events.changed.is_empty());
    }
}
