//! `ObservableValue`: a single value that reports real changes.
//!
//! Writing the value it already holds is absorbed silently.  Writing a
//! different value commits it and then calls the change handler with the new
//! value, on the caller's thread, before `set` returns.

use std::fmt;
use std::ops::Deref;

type ChangeHandler<V> = Box<dyn Fn(&V) + Send + Sync>;

/// A value plus a change handler that only fires on actual changes.
///
/// The wrapper deliberately does not implement `Clone`: the value can be
/// copied between wrappers with [`ObservableValue::assign_from`], but a
/// wrapper (and its handler) can never be duplicated.
///
/// ```rust
/// use leafconf::ObservableValue;
///
/// let mut port = ObservableValue::new(25565_u16, |p| println!("port is now {p}"));
/// assert!(!port.set(25565)); // same value: no handler call
/// assert!(port.set(45555));  // prints "port is now 45555"
/// assert_eq!(*port, 45555);
/// ```
pub struct ObservableValue<V> {
    value: V,
    on_change: Option<ChangeHandler<V>>,
}

impl<V> ObservableValue<V> {
    /// A wrapper whose changes go unreported.
    pub fn without_handler(value: V) -> Self {
        Self {
            value,
            on_change: None,
        }
    }

    /// The current value.
    pub fn get(&self) -> &V {
        &self.value
    }

    pub fn into_inner(self) -> V {
        self.value
    }
}

impl<V: PartialEq> ObservableValue<V> {
    /// Wraps `value`; `on_change` runs after every real change.
    pub fn new(value: V, on_change: impl Fn(&V) + Send + Sync + 'static) -> Self {
        Self {
            value,
            on_change: Some(Box::new(on_change)),
        }
    }

    /// Stores `value` if it differs from the current one, then calls the
    /// handler.  Returns whether a change happened.
    pub fn set(&mut self, value: V) -> bool {
        if value == self.value {
            return false;
        }
        self.value = value;
        if let Some(handler) = &self.on_change {
            handler(&self.value);
        }
        true
    }

    /// Copies `other`'s value into `self` through [`ObservableValue::set`].
    /// `self` keeps its own handler.
    pub fn assign_from(&mut self, other: &ObservableValue<V>) -> bool
    where
        V: Clone,
    {
        self.set(other.value.clone())
    }
}

impl<V> Deref for ObservableValue<V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.value
    }
}

impl<V: fmt::Debug> fmt::Debug for ObservableValue<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableValue")
            .field("value", &self.value)
            .field("has_handler", &self.on_change.is_some())
            .finish()
    }
}
