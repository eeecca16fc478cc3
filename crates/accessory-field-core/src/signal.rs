//! Signals: synchronous, multi-subscriber event streams.
//!
//! Widgets publish state changes through a [`Signal`]; anyone holding the
//! signal or one of its handles can attach a slot (a closure) that runs on
//! every emission.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The owning handle, the only one that can emit or complete
//! - [`SignalObserver<Args>`] - A subscribe-only handle handed to consumers
//! - [`WeakSignal<Args>`] - A non-owning emitter for use inside slots
//! - [`ConnectionId`] - Returned by `connect`, used to disconnect
//! - [`ConnectionGuard`] - Disconnects its slot when dropped
//! - [`ConnectionSet`] - A bag of guards released together
//!
//! # Delivery
//!
//! Slots are invoked synchronously on the emitting thread, in emission
//! order. There is no queueing, coalescing or replay: a slot connected after
//! an emission never sees that emission.
//!
//! # Completion
//!
//! A signal completes when [`Signal::close`] is called or when the owning
//! [`Signal`] is dropped. Completion detaches every slot and runs each
//! connection's completion callback exactly once. Emitting on a completed
//! signal does nothing, and connecting to one runs the completion callback
//! immediately.
//!
//! # Example
//!
//! ```
//! use accessory_field_core::Signal;
//!
//! let revealed = Signal::<bool>::new();
//! let observer = revealed.observer();
//!
//! let id = observer.connect(|&on| {
//!     println!("password {}", if on { "shown" } else { "hidden" });
//! });
//! revealed.emit(true);
//!
//! observer.disconnect(id);
//! assert_eq!(revealed.connection_count(), 0);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal completes.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type CompletionSlot = Arc<dyn Fn() + Send + Sync>;

/// Internal storage for a single connection.
struct Connection<Args> {
    /// Invoked for every emitted value.
    slot: Slot<Args>,
    /// Invoked once when the signal completes.
    on_complete: Option<CompletionSlot>,
}

/// State shared between a signal and its observer/weak handles.
struct Shared<Args> {
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    closed: AtomicBool,
}

impl<Args> Shared<Args> {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    fn close(&self) {
        let drained: Vec<Connection<Args>> = {
            let mut connections = self.connections.lock();
            if self.closed.swap(true, Ordering::SeqCst) {
                return;
            }
            connections.drain().map(|(_, conn)| conn).collect()
        };
        tracing::debug!(target: targets::SIGNAL, detached = drained.len(), "signal completed");

        for conn in drained {
            if let Some(on_complete) = conn.on_complete {
                on_complete();
            }
        }
    }
}

impl<Args: Send + 'static> Shared<Args> {
    fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            closed: AtomicBool::new(false),
        }
    }

    fn connect(&self, slot: Slot<Args>, on_complete: Option<CompletionSlot>) -> ConnectionId {
        let mut connections = self.connections.lock();
        // Checked under the lock so a concurrent close cannot strand the slot.
        if self.is_closed() {
            drop(connections);
            tracing::trace!(target: targets::SIGNAL, "connect on completed signal");
            if let Some(on_complete) = on_complete {
                on_complete();
            }
            return ConnectionId::default();
        }
        connections.insert(Connection { slot, on_complete })
    }

    fn emit(&self, args: &Args) {
        if self.is_closed() {
            tracing::trace!(target: targets::SIGNAL, "signal completed, skipping emit");
            return;
        }

        // Snapshot the slots so they may connect, disconnect or emit re-entrantly.
        let slots: Vec<Slot<Args>> = self
            .connections
            .lock()
            .values()
            .map(|conn| conn.slot.clone())
            .collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(args);
        }
    }
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked with the
/// provided arguments. Dropping the signal completes it.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(String, i32)` for multiple arguments.
///
/// # Related Types
///
/// - [`SignalObserver`] - Hand this out when consumers should only subscribe
/// - [`WeakSignal`] - Emit from inside a slot without keeping the signal alive
/// - [`crate::Property`] - Often paired with signals for change notification
pub struct Signal<Args> {
    shared: Arc<Shared<Args>>,
}

impl<Args: Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared::new()),
        }
    }

    /// Attach a slot. The returned id disconnects it again.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.shared.connect(Arc::new(slot), None)
    }

    /// Connect a slot together with a callback run once when the signal completes.
    pub fn connect_with_completion<F, C>(&self, slot: F, on_complete: C) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
        C: Fn() + Send + Sync + 'static,
    {
        self.shared.connect(Arc::new(slot), Some(Arc::new(on_complete)))
    }

    /// Connect a slot with automatic disconnection when the guard is dropped.
    ///
    /// The guard only holds a weak reference, so it is fine for it to outlive
    /// the signal.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard::new(Arc::downgrade(&self.shared), id)
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.shared.disconnect(id)
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.shared.connections.lock().len()
    }

    /// Emit the signal, invoking all connected slots in the current thread.
    ///
    /// Does nothing once the signal has completed.
    #[tracing::instrument(skip_all, target = "accessory_field_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        self.shared.emit(&args);
    }

    /// Complete the signal, detaching every slot.
    ///
    /// Completion callbacks run after the connections are removed. Calling
    /// this more than once has no further effect.
    pub fn close(&self) {
        self.shared.close();
    }

    /// Whether the signal has completed.
    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }

    /// A subscribe-only handle to this signal.
    pub fn observer(&self) -> SignalObserver<Args> {
        SignalObserver {
            shared: self.shared.clone(),
        }
    }

    /// A non-owning handle that can emit while the signal is alive.
    pub fn downgrade(&self) -> WeakSignal<Args> {
        WeakSignal {
            shared: Arc::downgrade(&self.shared),
        }
    }
}

impl<Args> Drop for Signal<Args> {
    fn drop(&mut self) {
        // Observers may still hold the shared state; they must see completion.
        self.shared.close();
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.shared.connections.lock().len())
            .field("closed", &self.shared.closed.load(Ordering::SeqCst))
            .finish()
    }
}

/// A read-only view of a signal.
///
/// Observers can subscribe but never emit or complete the signal. Cloning an
/// observer is cheap; all clones refer to the same signal.
pub struct SignalObserver<Args> {
    shared: Arc<Shared<Args>>,
}

impl<Args> Clone for SignalObserver<Args> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<Args: Send + 'static> SignalObserver<Args> {
    /// Connect a slot. See [`Signal::connect`].
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.shared.connect(Arc::new(slot), None)
    }

    /// Connect a slot with a completion callback. See [`Signal::connect_with_completion`].
    pub fn connect_with_completion<F, C>(&self, slot: F, on_complete: C) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
        C: Fn() + Send + Sync + 'static,
    {
        self.shared.connect(Arc::new(slot), Some(Arc::new(on_complete)))
    }

    /// Connect a slot that is disconnected when the guard drops.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard::new(Arc::downgrade(&self.shared), id)
    }

    /// Disconnect a slot previously connected through any handle.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.shared.disconnect(id)
    }

    /// Whether the underlying signal has completed.
    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }
}

impl<Args> fmt::Debug for SignalObserver<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalObserver")
            .field("closed", &self.shared.closed.load(Ordering::SeqCst))
            .finish()
    }
}

/// A non-owning emitter handle.
///
/// Slots that need to re-publish on another signal capture one of these
/// instead of the signal itself, so the slot never keeps the target alive.
pub struct WeakSignal<Args> {
    shared: Weak<Shared<Args>>,
}

impl<Args> Clone for WeakSignal<Args> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<Args: Send + 'static> WeakSignal<Args> {
    /// Emit on the signal if it is still alive. Returns `false` if it is gone.
    pub fn emit(&self, args: Args) -> bool {
        match self.shared.upgrade() {
            Some(shared) if !shared.is_closed() => {
                shared.emit(&args);
                true
            }
            _ => false,
        }
    }
}

/// Keeps a slot connected for as long as it lives.
///
/// Created via [`Signal::connect_scoped`] or [`SignalObserver::connect_scoped`].
/// Holds the signal weakly, so it may outlive it.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use accessory_field_core::{Property, Signal};
///
/// let edited = Signal::<String>::new();
/// let last = Arc::new(Property::new(String::new()));
/// let guard = {
///     let last = last.clone();
///     edited.connect_scoped(move |text| {
///         last.set(text.clone());
///     })
/// };
///
/// edited.emit("abc".to_string());
/// drop(guard);
/// edited.emit("ignored".to_string());
/// assert_eq!(last.get(), "abc");
/// ```
#[must_use = "dropping the guard disconnects the slot immediately"]
pub struct ConnectionGuard {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ConnectionGuard {
    fn new<Args: Send + 'static>(shared: Weak<Shared<Args>>, id: ConnectionId) -> Self {
        Self {
            release: Some(Box::new(move || {
                if let Some(shared) = shared.upgrade() {
                    shared.disconnect(id);
                }
            })),
        }
    }

    /// Disconnect now instead of at drop.
    pub fn disconnect(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for ConnectionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionGuard")
            .field("connected", &self.release.is_some())
            .finish()
    }
}

/// A set of scoped connections released together.
///
/// Widgets keep their internal subscriptions here; dropping the set (or
/// calling [`clear`](Self::clear)) disconnects all of them.
#[derive(Debug, Default)]
pub struct ConnectionSet {
    guards: Vec<ConnectionGuard>,
}

impl ConnectionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a guard.
    pub fn insert(&mut self, guard: ConnectionGuard) {
        self.guards.push(guard);
    }

    /// Number of held connections.
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Whether the set holds no connections.
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Disconnect everything held by the set.
    pub fn clear(&mut self) {
        if !self.guards.is_empty() {
            tracing::trace!(target: targets::SIGNAL, released = self.guards.len(), "releasing connections");
        }
        self.guards.clear();
    }
}

impl Extend<ConnectionGuard> for ConnectionSet {
    fn extend<I: IntoIterator<Item = ConnectionGuard>>(&mut self, iter: I) {
        self.guards.extend(iter);
    }
}

static_assertions::assert_impl_all!(Signal<bool>: Send, Sync);
static_assertions::assert_impl_all!(SignalObserver<bool>: Send, Sync);
static_assertions::assert_impl_all!(ConnectionSet: Send, Sync);
