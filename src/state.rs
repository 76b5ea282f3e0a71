//! Per-task animation state store.
//!
//! Rendering code must stay stateless across frames (widgets may be built
//! fresh every pass), so animated columns persist their counters here: one
//! store per task, keyed by free-form strings, safe to hit from the render
//! thread and application threads at once.
//!
//! Type policy: a key read as a type other than the one it was stored with
//! yields the requested type's default, the same as an absent key. Readers
//! never panic on stale or foreign values.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::sync::lock_recover;

/// A value slot in the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean flag.
    Flag(bool),
    /// Text.
    Text(String),
}

/// Types that can live in a [`TaskState`] slot.
pub trait StateCell: Sized + Default {
    /// Wrap into a tagged slot value.
    fn into_value(self) -> StateValue;
    /// Unwrap from a slot value; `None` on a type mismatch.
    fn from_value(value: &StateValue) -> Option<Self>;
}

impl StateCell for i64 {
    fn into_value(self) -> StateValue {
        StateValue::Integer(self)
    }

    fn from_value(value: &StateValue) -> Option<Self> {
        match value {
            StateValue::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

impl StateCell for f64 {
    fn into_value(self) -> StateValue {
        StateValue::Float(self)
    }

    fn from_value(value: &StateValue) -> Option<Self> {
        match value {
            StateValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl StateCell for bool {
    fn into_value(self) -> StateValue {
        StateValue::Flag(self)
    }

    fn from_value(value: &StateValue) -> Option<Self> {
        match value {
            StateValue::Flag(v) => Some(*v),
            _ => None,
        }
    }
}

impl StateCell for String {
    fn into_value(self) -> StateValue {
        StateValue::Text(self)
    }

    fn from_value(value: &StateValue) -> Option<Self> {
        match value {
            StateValue::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Thread-safe typed key/value store owned by one task.
///
/// Two tasks never share state even when columns use identical key names;
/// every task carries its own store.
#[derive(Debug, Default)]
pub struct TaskState {
    slots: Mutex<HashMap<String, StateValue>>,
}

impl TaskState {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the value for `key`.
    ///
    /// Returns `T::default()` when the key is absent or holds another
    /// type; the default is not stored.
    #[must_use]
    pub fn get<T: StateCell>(&self, key: &str) -> T {
        let slots = lock_recover(&self.slots);
        slots
            .get(key)
            .and_then(T::from_value)
            .unwrap_or_default()
    }

    /// Atomically read-modify-write the value for `key`.
    ///
    /// The read, the application of `f`, and the write happen in one
    /// critical section: concurrent updates to the same key serialize and
    /// none are lost. Returns the stored result.
    pub fn update<T: StateCell>(&self, key: &str, f: impl FnOnce(T) -> T) -> T
    where
        T: Clone,
    {
        let mut slots = lock_recover(&self.slots);
        let current = slots
            .get(key)
            .and_then(T::from_value)
            .unwrap_or_default();
        let next = f(current);
        slots.insert(key.to_string(), next.clone().into_value());
        next
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        lock_recover(&self.slots).len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock_recover(&self.slots).is_empty()
    }
}
