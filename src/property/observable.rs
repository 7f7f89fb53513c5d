//! # Observable property with derived values.
//!
//! [`Property`] holds one value plus the properties derived from it, and
//! implements the two-phase write protocol against a [`PropertyEvents`] pair.
//!
//! ## Write protocol
//! ```text
//! set(events, new)
//!   ├─► new == current?                 → Change::Unchanged (nothing raised)
//!   ├─► snapshot derived values
//!   ├─► events.changing ◄── PropertyChanging{name, new}
//!   │        └─ cancelled?              → Change::Vetoed (value kept, nothing else raised)
//!   ├─► value = new
//!   ├─► events.changed  ◄── PropertyChanged{name, new}
//!   └─► for derived in declaration order:
//!          recomputed != snapshot?      → events.changed ◄── PropertyChanged{derived, value}
//!                                       → Change::Applied{cascaded}
//! ```
//!
//! ## Errors
//! - A handler error while **changing** aborts the write; the value is kept.
//! - A handler error while **changed** is returned after the write was applied;
//!   the notifications that would have followed are not raised.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use eventvisor::{Change, Property, PropertyEvents};
//!
//! let events = PropertyEvents::new();
//! let mut age = Property::new("age", 16u32).derive("can_vote", |age: &u32| *age >= 18);
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&log);
//! let _changed = events.changed.subscribe_fn(move |ev| sink.lock().unwrap().push(ev.to_string()));
//! let _veto = events.changing.subscribe_fn(|ev| {
//!     if ev.value().as_int().is_some_and(|age| age < 14) {
//!         ev.cancel();
//!     }
//! });
//!
//! assert_eq!(age.set(&events, 16).unwrap(), Change::Unchanged);
//! assert_eq!(age.set(&events, 20).unwrap(), Change::Applied { cascaded: 1 });
//! assert_eq!(age.set(&events, 12).unwrap(), Change::Vetoed);
//!
//! assert_eq!(*age.get(), 20);
//! assert_eq!(*log.lock().unwrap(), vec!["age=20", "can_vote=true"]);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::PublishError;

use super::{PropertyChanged, PropertyChanging, PropertyEvents, Value};

/// Result of one [`Property::set`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    /// New value equals the current one; nothing was raised.
    Unchanged,
    /// A changing subscriber cancelled the write; the value was kept.
    Vetoed,
    /// The write was applied.
    Applied {
        /// Number of derived properties that changed with it.
        cascaded: usize,
    },
}

impl Change {
    /// True if the value was written.
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, Change::Applied { .. })
    }
}

/// A property computed from another one.
struct Derived<V> {
    name: Arc<str>,
    compute: Box<dyn Fn(&V) -> Value + Send + Sync>,
}

/// Named value whose writes raise changing/changed notifications.
pub struct Property<V> {
    name: Arc<str>,
    value: V,
    derived: Vec<Derived<V>>,
}

impl<V> Property<V>
where
    V: Clone + PartialEq + Into<Value>,
{
    /// Creates a property holding `value`. No notification is raised.
    pub fn new(name: impl Into<Arc<str>>, value: V) -> Self {
        Self {
            name: name.into(),
            value,
            derived: Vec::new(),
        }
    }

    /// Declares a derived property computed from this one.
    ///
    /// Derived notifications are raised in declaration order.
    #[must_use]
    pub fn derive<D, F>(mut self, name: impl Into<Arc<str>>, compute: F) -> Self
    where
        D: Into<Value>,
        F: Fn(&V) -> D + Send + Sync + 'static,
    {
        self.derived.push(Derived {
            name: name.into(),
            compute: Box::new(move |v: &V| compute(v).into()),
        });
        self
    }

    /// Property name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> &V {
        &self.value
    }

    /// Current value of the derived property `name`, if declared.
    pub fn derived(&self, name: &str) -> Option<Value> {
        self.derived
            .iter()
            .find(|d| &*d.name == name)
            .map(|d| (d.compute)(&self.value))
    }

    /// Names of the derived properties, in declaration order.
    pub fn derived_names(&self) -> impl Iterator<Item = &str> {
        self.derived.iter().map(|d| &*d.name)
    }

    /// Writes `value`, raising changing/changed notifications on `events`.
    ///
    /// Equality is [`PartialEq`]: a value that is not equal to itself (a float
    /// NaN) is never [`Change::Unchanged`], and a NaN derived value is
    /// re-announced on every applied write.
    ///
    /// # Errors
    /// Returns the first [`PublishError`] raised by a handler. See the module
    /// docs for whether the write was applied.
    pub fn set(&mut self, events: &PropertyEvents, value: V) -> Result<Change, PublishError> {
        if self.value == value {
            return Ok(Change::Unchanged);
        }

        let before: Vec<Value> = self.derived.iter().map(|d| (d.compute)(&self.value)).collect();

        let changing = PropertyChanging::new(Arc::clone(&self.name), value.clone());
        events.raise_changing(&changing)?;
        if changing.is_cancelled() {
            return Ok(Change::Vetoed);
        }

        self.value = value;
        events.raise_changed(&PropertyChanged::new(Arc::clone(&self.name), self.value.clone()))?;

        let mut cascaded = 0;
        for (d, old) in self.derived.iter().zip(before) {
            let now = (d.compute)(&self.value);
            if now != old {
                events.raise_changed(&PropertyChanged::new(Arc::clone(&d.name), now))?;
                cascaded += 1;
            }
        }
        Ok(Change::Applied { cascaded })
    }
}

impl<V: fmt::Debug> fmt::Debug for Property<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("derived", &self.derived.iter().map(|d| &*d.name).collect::<Vec<_>>())
            .finish()
    }
}
