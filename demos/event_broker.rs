//! # Example: event_broker
//!
//! Football players publish their goal tally through a shared broker; a coach
//! (async subscriber) cheers on every goal without blocking the players.
//!
//! ## Flow
//! ```text
//! Player::score() ── publish(Goal) ──► EventChannel<Goal> ──► SubscriberSet<Goal>
//!                                                               └─► Coach::on_event (tokio worker)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example event_broker
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use eventvisor::{Config, EventChannel, PublishError, Subscribe, SubscriberSet};

#[derive(Clone, Debug)]
struct Goal {
    player: &'static str,
    tally: u32,
}

struct Player {
    name: &'static str,
    goals: AtomicU32,
}

impl Player {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            goals: AtomicU32::new(0),
        }
    }

    fn score(&self, broker: &EventChannel<Goal>) -> Result<(), PublishError> {
        let tally = self.goals.fetch_add(1, Ordering::Relaxed) + 1;
        broker.publish(&Goal {
            player: self.name,
            tally,
        })?;
        Ok(())
    }
}

struct Coach;

#[async_trait::async_trait]
impl Subscribe<Goal> for Coach {
    async fn on_event(&self, goal: &Goal) {
        println!("{}, you scored {} goals!", goal.player, goal.tally);
    }

    fn name(&self) -> &'static str {
        "coach"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), PublishError> {
    let broker = EventChannel::<Goal>::new();
    let subs: Vec<Arc<dyn Subscribe<Goal>>> = vec![Arc::new(Coach)];
    let set = Arc::new(SubscriberSet::new(subs, &Config::default()));
    let _forward = set.attach(&broker);

    let will = Player::new("Will");
    let nate = Player::new("Nate");
    will.score(&broker)?;
    nate.score(&broker)?;
    nate.score(&broker)?;

    set.shutdown().await;
    Ok(())
}
