//! Core systems for accessory-field.
//!
//! This crate provides the reactive plumbing the text field is built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous, multi-subscriber
//!   notification with completion and scoped connections
//! - **Property System**: Interior-mutable values with change detection
//! - **Logging**: `tracing` targets and profiling spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use accessory_field_core::{ConnectionSet, Signal};
//!
//! let toggled = Signal::<bool>::new();
//! let mut subscriptions = ConnectionSet::new();
//!
//! // Observers can subscribe but not emit.
//! let observer = toggled.observer();
//! subscriptions.insert(observer.connect_scoped(|on| {
//!     println!("toggled: {}", on);
//! }));
//!
//! toggled.emit(true);
//!
//! // Releasing the set disconnects every slot it holds.
//! subscriptions.clear();
//! assert_eq!(toggled.connection_count(), 0);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{
    ConnectionGuard, ConnectionId, ConnectionSet, Signal, SignalObserver, WeakSignal,
};
