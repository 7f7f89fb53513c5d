//! # Example: dependent_properties
//!
//! A person's age is observable and `can_vote` is derived from it. A driver
//! listens to both phases and refuses ages below 14.
//!
//! ## Flow
//! ```text
//! age = 16  → nothing (unchanged)
//! age = 20  → changing(age=20) → changed(age=20) → changed(can_vote=true)
//! age = 12  → changing(age=12) → vetoed, age stays 20
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example dependent_properties
//! ```

use std::sync::Arc;

use eventvisor::{
    Change, Property, PropertyChanged, PropertyChanging, PropertyEvents, PublishError,
};

struct Person {
    age: Property<u32>,
    events: PropertyEvents,
}

impl Person {
    fn new() -> Self {
        Self {
            age: Property::new("age", 16u32).derive("can_vote", |age: &u32| *age >= 18),
            events: PropertyEvents::new(),
        }
    }

    fn set_age(&mut self, age: u32) -> Result<Change, PublishError> {
        println!("-- setting age to {age}");
        self.age.set(&self.events, age)
    }
}

struct Driver;

impl Driver {
    fn prop_changing(&self, ev: &PropertyChanging) {
        if ev.name() == "age" && ev.value().as_int().is_some_and(|age| age < 14) {
            println!("Cannot set age < 14");
            ev.cancel();
        }
    }

    fn prop_changed(&self, ev: &PropertyChanged) {
        match &*ev.name {
            "age" => println!("HANDLER: Age changed to {}", ev.value),
            "can_vote" => println!("HANDLER: Voting status changed to {}", ev.value),
            _ => {}
        }
    }
}

fn main() -> Result<(), PublishError> {
    let mut person = Person::new();
    let driver = Arc::new(Driver);

    let _changing = person.events.changing.subscribe(&driver, Driver::prop_changing);
    let _changed = person.events.changed.subscribe(&driver, Driver::prop_changed);

    for age in [16, 16, 20, 12] {
        let change = person.set_age(age)?;
        println!("   result: {change:?}, age is now {}", person.age.get());
    }
    Ok(())
}
