//! Cancellable property notifications.
//!
//! This module builds the two-phase **changing / changed** protocol on top of
//! [`EventChannel`](crate::EventChannel).
//!
//! ## Contents
//! - [`Property`], [`Change`] observable value with derived properties
//! - [`PropertyEvents`] the changing + changed channel pair owned by a publisher
//! - [`PropertyChanging`], [`PropertyChanged`], [`Value`] notification payloads
//!
//! ## Quick wiring
//! ```text
//! struct Person {
//!     age: Property<u32>,          ─┐ set(&events, v)
//!     events: PropertyEvents,      ◄┘   ├─► events.changing (veto)
//! }                                     └─► events.changed  (age, then derived)
//! ```

mod events;
mod notification;
mod observable;

pub use events::PropertyEvents;
pub use notification::{PropertyChanged, PropertyChanging, Value};
pub use observable::{Change, Property};
