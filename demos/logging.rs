//! # Example: logging
//!
//! Attaches the built-in [`LogWriter`] to a property's notification channels
//! and to the notices of an async subscriber set.
//!
//! ## Run
//! ```bash
//! cargo run --example logging --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use eventvisor::{
    Config, LogWriter, Property, PropertyChanged, PropertyChanging, PropertyEvents, PublishError,
    Subscribe, SubscriberSet,
};

struct Guard;

impl Guard {
    fn refuse_minors(&self, ev: &PropertyChanging) {
        if ev.value().as_int().is_some_and(|age| age < 14) {
            ev.cancel();
        }
    }
}

/// Slow subscriber with a one-slot queue.
struct Archive;

#[async_trait::async_trait]
impl Subscribe<PropertyChanged> for Archive {
    async fn on_event(&self, _ev: &PropertyChanged) {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    fn name(&self) -> &'static str {
        "archive"
    }

    fn queue_capacity(&self) -> Option<usize> {
        Some(1)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), PublishError> {
    let events = PropertyEvents::new();
    let mut age = Property::new("age", 16u32).derive("can_vote", |age: &u32| *age >= 18);

    let writer = Arc::new(LogWriter::new());
    let _log = writer.attach(&events);

    let guard = Arc::new(Guard);
    let _veto = events.changing.subscribe(&guard, Guard::refuse_minors);

    let subs: Vec<Arc<dyn Subscribe<PropertyChanged>>> = vec![Arc::new(Archive)];
    let set = Arc::new(SubscriberSet::new(subs, &Config::default()));
    let _notices = set.notices().subscribe(&writer, LogWriter::on_notice);
    let _forward = set.attach(&events.changed);

    for value in [20, 12, 30, 40] {
        age.set(&events, value)?;
    }

    set.shutdown().await;
    Ok(())
}
