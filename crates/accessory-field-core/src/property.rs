//! Shared widget state.
//!
//! A [`Property`] holds one value behind a lock and tells the writer whether
//! a write changed anything, so the owner can decide whether to notify.
//!
//! Slots must be `Send + Sync + 'static`. A widget that needs a slot to write
//! back into its own state keeps that state in an `Arc<Property<T>>` and moves
//! a clone of the `Arc` into the slot.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use accessory_field_core::{Property, Signal};
//!
//! let selected = Arc::new(Property::new(false));
//! let toggled = Signal::<bool>::new();
//!
//! let state = selected.clone();
//! toggled.connect(move |&on| {
//!     state.set(on);
//! });
//!
//! toggled.emit(true);
//! assert!(selected.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// An interior-mutable value with change detection.
///
/// `Send + Sync` whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Wrap an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// A clone of the current value. Use [`with`](Self::with) to borrow instead.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Borrow the value for the duration of `f`.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Mutate the value in place.
    ///
    /// No change detection is performed; the closure decides what to touch.
    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut self.value.write())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value`. Returns `false` if it equals the current value.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Store `value` and hand back the previous one, or `None` when nothing
    /// changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut slot = self.value.write();
        (*slot != value).then(|| std::mem::replace(&mut *slot, value))
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}
