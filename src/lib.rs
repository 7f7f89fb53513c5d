//! # eventvisor
//!
//! **Eventvisor** is a small observer-pattern toolkit for Rust.
//!
//! It provides a typed publish/subscribe channel whose subscribers are held
//! weakly, a cancellable two-phase property notification protocol, and an
//! async fan-out broker for subscribers that should not block the publisher.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐            ┌──────────────┐            ┌──────────────┐
//!     │  Publisher   │            │  Subscriber  │            │  Subscriber  │
//!     │ (owns chan.) │            │   (Arc<U1>)  │            │   (Arc<U2>)  │
//!     └──────┬───────┘            └──────▲───────┘            └──────▲───────┘
//!            │ publish(&T)               │ handler(&U1, &T)          │ handler(&U2, &T)
//!            ▼                           │                           │
//! ┌───────────────────────────────────────────────────────────────────────────┐
//! │  EventChannel<T>                                                          │
//! │  - slots in registration order, each with Weak<U> + handler               │
//! │  - snapshot per publish (re-entrant subscribe/dispose/publish are safe)   │
//! │  - dead targets skipped (DeadTargetPolicy: Skip | Prune)                  │
//! └──────┬─────────────────────────────────────────────────────────┬──────────┘
//!        │ Subscription::dispose()                                 │ SubscriberSet::attach
//!        ▼                                                         ▼
//!   slot removed, never invoked again              ┌───────────────────────────────┐
//!                                                  │ SubscriberSet<T> (tokio)      │
//!                                                  │ per-subscriber bounded queue  │
//!                                                  │ + worker ─► on_event()        │
//!                                                  │ overflow/panic ─► Notice      │
//!                                                  └───────────────────────────────┘
//! ```
//!
//! ### Property writes
//! ```text
//! Property::set(&events, new)
//!   ├─► equal to current          → Unchanged
//!   ├─► changing ◄── PropertyChanging{name, new, cancel flag}
//!   │      └─ cancelled            → Vetoed (VetoPolicy: RunAll | ShortCircuit)
//!   ├─► value = new
//!   ├─► changed  ◄── PropertyChanged{name, new}
//!   └─► changed  ◄── PropertyChanged{derived, value}   (each derived value that moved)
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                          |
//! |-------------------|---------------------------------------------------------------|---------------------------------------------|
//! | **Channels**      | Ordered synchronous pub/sub with weakly-held targets.         | [`EventChannel`], [`Delivery`]              |
//! | **Subscriptions** | Explicit or scoped unsubscription.                            | [`Subscription`], [`SubscriptionGuard`]     |
//! | **Properties**    | Cancellable changing/changed protocol with derived values.    | [`Property`], [`PropertyEvents`]            |
//! | **Async fan-out** | Non-blocking delivery to async subscribers.                   | [`Subscribe`], [`SubscriberSet`], [`Notice`]|
//! | **Policies**      | Dead-target pruning and veto evaluation.                      | [`DeadTargetPolicy`], [`VetoPolicy`]        |
//! | **Errors**        | Typed errors for subscription and delivery.                   | [`SubscribeError`], [`PublishError`]        |
//! | **Configuration** | Centralize settings.                                          | [`Config`]                                  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use eventvisor::{Change, EventChannel, Property, PropertyChanged, PropertyChanging, PropertyEvents};
//!
//! struct Person {
//!     age: Property<u32>,
//!     events: PropertyEvents,
//! }
//!
//! struct Registrar {
//!     log: Mutex<Vec<String>>,
//! }
//!
//! impl Registrar {
//!     fn on_changing(&self, ev: &PropertyChanging) {
//!         if ev.name() == "age" && ev.value().as_int().is_some_and(|age| age < 14) {
//!             ev.cancel();
//!         }
//!     }
//!
//!     fn on_changed(&self, ev: &PropertyChanged) {
//!         self.log.lock().unwrap().push(ev.to_string());
//!     }
//! }
//!
//! let mut person = Person {
//!     age: Property::new("age", 16u32).derive("can_vote", |age: &u32| *age >= 18),
//!     events: PropertyEvents::new(),
//! };
//! let registrar = Arc::new(Registrar { log: Mutex::new(Vec::new()) });
//! let _changing = person.events.changing.subscribe(&registrar, Registrar::on_changing);
//! let _changed = person.events.changed.subscribe(&registrar, Registrar::on_changed);
//!
//! assert_eq!(person.age.set(&person.events, 20).unwrap(), Change::Applied { cascaded: 1 });
//! assert_eq!(person.age.set(&person.events, 12).unwrap(), Change::Vetoed);
//! assert_eq!(*registrar.log.lock().unwrap(), vec!["age=20", "can_vote=true"]);
//!
//! // Plain channels work the same way.
//! let falls_ill = EventChannel::<String>::new();
//! let sub = falls_ill.subscribe_fn(|address| println!("calling a doctor to {address}"));
//! falls_ill.publish(&"221B Baker Street".to_string()).unwrap();
//! sub.dispose();
//! ```
mod config;
mod error;
mod events;
mod policies;
mod property;
mod subscribers;

// ---- Public re-exports ----

pub use config::Config;
pub use error::{HandlerError, PublishError, SubscribeError};
pub use events::{Delivery, EventChannel, Subscription, SubscriptionGuard, SubscriptionId};
pub use policies::{DeadTargetPolicy, VetoPolicy};
pub use property::{Change, Property, PropertyChanged, PropertyChanging, PropertyEvents, Value};
pub use subscribers::{Notice, NoticeKind, Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
