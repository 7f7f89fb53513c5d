//! # Example: creature_modifiers
//!
//! Chain of responsibility over an event channel. A creature asks the game
//! for its effective attack/defense; modifiers subscribed to the query channel
//! adjust the answer in registration order. A scoped modifier stops applying
//! as soon as its guard goes out of scope.
//!
//! ## Run
//! ```bash
//! cargo run --example creature_modifiers
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use eventvisor::{EventChannel, PublishError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stat {
    Attack,
    Defense,
}

struct Query {
    creature: &'static str,
    stat: Stat,
    value: Mutex<i32>,
}

impl Query {
    fn update(&self, f: impl FnOnce(i32) -> i32) {
        let mut value = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        *value = f(*value);
    }

    fn result(self) -> i32 {
        self.value.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Default)]
struct Game {
    queries: EventChannel<Query>,
}

struct Creature {
    name: &'static str,
    attack: i32,
    defense: i32,
}

impl Creature {
    fn stat(&self, game: &Game, stat: Stat) -> Result<i32, PublishError> {
        let base = match stat {
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
        };
        let query = Query {
            creature: self.name,
            stat,
            value: Mutex::new(base),
        };
        game.queries.publish(&query)?;
        Ok(query.result())
    }

    fn report(&self, game: &Game) -> Result<(), PublishError> {
        println!(
            "{} ({}/{})",
            self.name,
            self.stat(game, Stat::Attack)?,
            self.stat(game, Stat::Defense)?
        );
        Ok(())
    }
}

/// Doubles the attack of one creature.
struct DoubleAttack {
    creature: &'static str,
}

impl DoubleAttack {
    fn handle(&self, q: &Query) {
        if q.creature == self.creature && q.stat == Stat::Attack {
            q.update(|v| v * 2);
        }
    }
}

/// Adds to the defense of one creature.
struct IncreaseDefense {
    creature: &'static str,
    by: i32,
}

impl IncreaseDefense {
    fn handle(&self, q: &Query) {
        if q.creature == self.creature && q.stat == Stat::Defense {
            q.update(|v| v + self.by);
        }
    }
}

fn main() -> Result<(), PublishError> {
    let game = Game::default();
    let goblin = Creature {
        name: "Strong Goblin",
        attack: 2,
        defense: 2,
    };
    goblin.report(&game)?;

    let double = Arc::new(DoubleAttack {
        creature: goblin.name,
    });
    let _double = game.queries.subscribe(&double, DoubleAttack::handle);
    goblin.report(&game)?;

    {
        let shield = Arc::new(IncreaseDefense {
            creature: goblin.name,
            by: 3,
        });
        let _shield = game
            .queries
            .subscribe(&shield, IncreaseDefense::handle)
            .into_guard();
        goblin.report(&game)?;
    }

    goblin.report(&game)?;
    Ok(())
}
