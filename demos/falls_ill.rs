//! # Example: falls_ill
//!
//! A person raises an event when they fall ill; a driver subscribes a doctor
//! call to it, then unsubscribes.
//!
//! Shows how to:
//! - Bind a method (`Driver::call_doctor`) to a weakly-held target.
//! - End delivery with [`Subscription::dispose`].
//! - Observe that a dropped target is skipped rather than called.
//!
//! ## Run
//! ```bash
//! cargo run --example falls_ill
//! ```

use std::sync::Arc;

use eventvisor::{EventChannel, PublishError};

struct Person {
    falls_ill: EventChannel<String>,
}

impl Person {
    fn new() -> Self {
        Self {
            falls_ill: EventChannel::new(),
        }
    }

    fn catch_cold(&self) -> Result<(), PublishError> {
        let delivery = self.falls_ill.publish(&"123 Cardiff Road".to_string())?;
        println!(
            "  (delivered={} skipped={})",
            delivery.delivered, delivery.skipped
        );
        Ok(())
    }
}

struct Driver;

impl Driver {
    fn call_doctor(&self, address: &String) {
        println!("We need a doctor at {address}");
    }
}

fn main() -> Result<(), PublishError> {
    let person = Person::new();
    let driver = Arc::new(Driver);

    println!("== subscribed");
    let sub = person.falls_ill.subscribe(&driver, Driver::call_doctor);
    person.catch_cold()?;

    println!("== disposed");
    sub.dispose();
    sub.dispose();
    person.catch_cold()?;

    println!("== target dropped");
    let _sub = person.falls_ill.subscribe(&driver, Driver::call_doctor);
    drop(driver);
    person.catch_cold()?;

    Ok(())
}
