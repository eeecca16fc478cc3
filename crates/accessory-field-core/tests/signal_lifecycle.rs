//! Lifecycle tests for signals shared across handles and threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use accessory_field_core::{ConnectionSet, Property, Signal};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn observer_outlives_signal() {
    init_tracing();
    let signal = Signal::<bool>::new();
    let observer = signal.observer();
    let completed = Arc::new(AtomicUsize::new(0));

    let done = completed.clone();
    observer.connect_with_completion(|_| {}, move || {
        done.fetch_add(1, Ordering::SeqCst);
    });

    drop(signal);
    assert!(observer.is_closed());
    assert_eq!(completed.load(Ordering::SeqCst), 1);

    // Late subscribers learn about completion straight away.
    let done = completed.clone();
    observer.connect_with_completion(|_| {}, move || {
        done.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(completed.load(Ordering::SeqCst), 2);
}

#[test]
fn emission_from_another_thread() {
    init_tracing();
    let signal = Arc::new(Signal::<usize>::new());
    let total = Arc::new(AtomicUsize::new(0));

    let sink = total.clone();
    signal.connect(move |&n| {
        sink.fetch_add(n, Ordering::SeqCst);
    });

    let handles: Vec<_> = (1..=4)
        .map(|n| {
            let signal = signal.clone();
            thread::spawn(move || signal.emit(n))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(total.load(Ordering::SeqCst), 10);
}

#[test]
fn slot_may_disconnect_itself_during_emission() {
    let signal = Arc::new(Signal::<()>::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let id = Arc::new(Property::new(None));

    let (weak, calls_in_slot, id_in_slot) = (Arc::downgrade(&signal), calls.clone(), id.clone());
    let conn = signal.connect(move |_| {
        calls_in_slot.fetch_add(1, Ordering::SeqCst);
        if let (Some(signal), Some(id)) = (weak.upgrade(), id_in_slot.get()) {
            signal.disconnect(id);
        }
    });
    id.set(Some(conn));

    signal.emit(());
    signal.emit(());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(signal.connection_count(), 0);
}

#[test]
fn weak_emitter_forwards_until_signal_is_gone() {
    let source = Signal::<i32>::new();
    let forwarded = Signal::<i32>::new();
    let seen = Arc::new(Property::new(Vec::new()));

    let sink = seen.clone();
    let _observe = forwarded.connect_scoped(move |&n| sink.update(|v| v.push(n)));

    let target = forwarded.downgrade();
    let _forward = source.connect_scoped(move |&n| {
        target.emit(n * 10);
    });

    source.emit(1);
    drop(forwarded);
    source.emit(2);

    assert_eq!(seen.get(), vec![10]);
}

#[test]
fn connection_set_releases_on_drop() {
    let signal = Signal::<()>::new();
    {
        let mut set = ConnectionSet::new();
        set.extend((0..3).map(|_| signal.connect_scoped(|_| {})));
        assert_eq!(set.len(), 3);
        assert_eq!(signal.connection_count(), 3);
    }
    assert_eq!(signal.connection_count(), 0);
}
