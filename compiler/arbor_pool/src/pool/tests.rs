use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use super::*;

/// Instance that records how often it was built and cleared.
#[derive(Debug)]
struct Probe {
    id: usize,
    dirty: bool,
    clears: usize,
}

impl Clear for Probe {
    fn clear(&mut self) {
        self.dirty = false;
        self.clears += 1;
    }
}

fn probe_pool(capacity: usize) -> (ObjectPool<Probe>, Arc<AtomicUsize>) {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let pool = ObjectPool::new(capacity, move || Probe {
        id: counter.fetch_add(1, Ordering::SeqCst),
        dirty: false,
        clears: 0,
    });
    (pool, built)
}

#[test]
fn lease_is_reused_after_return() {
    let (pool, built) = probe_pool(2);
    let first_id = {
        let lease = pool.get();
        lease.id
    };
    let second_id = pool.get().id;
    assert_eq!(first_id, second_id);
    assert_eq!(built.load(Ordering::SeqCst), 1);
}

#[test]
fn returned_instances_are_cleared() {
    let (pool, _) = probe_pool(1);
    {
        let mut lease = pool.get();
        lease.dirty = true;
    }
    let lease = pool.get();
    assert!(!lease.dirty);
    assert_eq!(lease.clears, 1);
}

#[test]
fn get_always_succeeds_beyond_capacity() {
    let (pool, built) = probe_pool(1);
    let a = pool.get();
    let b = pool.get();
    let c = pool.get();
    assert_ne!(a.id, b.id);
    assert_ne!(b.id, c.id);
    assert_eq!(built.load(Ordering::SeqCst), 3);
}

#[test]
fn idle_count_never_exceeds_capacity() {
    let (pool, _) = probe_pool(2);
    let leases: Vec<_> = (0..5).map(|_| pool.get()).collect();
    drop(leases);
    assert_eq!(pool.idle_count(), 2);
}

#[test]
fn zero_capacity_pool_never_retains() {
    let (pool, built) = probe_pool(0);
    drop(pool.get());
    drop(pool.get());
    assert_eq!(pool.idle_count(), 0);
    assert_eq!(built.load(Ordering::SeqCst), 2);
}

#[test]
fn explicit_release_returns_exactly_once() {
    let (pool, _) = probe_pool(4);
    let lease = pool.get();
    lease.release();
    assert_eq!(pool.idle_count(), 1);

    // The idle instance is handed out once, not twice.
    let a = pool.get();
    let b = pool.get();
    assert_ne!(a.id, b.id);
}

#[test]
fn detached_instance_does_not_return() {
    let (pool, _) = probe_pool(4);
    let probe = pool.get().detach();
    assert_eq!(probe.clears, 0);
    assert_eq!(pool.idle_count(), 0);
}

#[test]
fn owned_acquire_and_release_round_trip() {
    let (pool, built) = probe_pool(4);
    let mut probe = pool.acquire_owned();
    probe.dirty = true;
    pool.release(probe);
    let again = pool.acquire_owned();
    assert!(!again.dirty);
    assert_eq!(built.load(Ordering::SeqCst), 1);
}

#[test]
fn lease_returns_during_unwind() {
    let (pool, _) = probe_pool(2);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut lease = pool.get();
        lease.dirty = true;
        panic!("visitor failed");
    }));
    assert!(result.is_err());
    assert_eq!(pool.idle_count(), 1);
    assert!(!pool.get().dirty);
}

#[test]
fn concurrent_leases_are_exclusive() {
    let (pool, _) = probe_pool(4);
    // At most one instance is built per iteration, so ids stay below 2_000.
    let in_use: Vec<AtomicUsize> = (0..2_000).map(|_| AtomicUsize::new(0)).collect();

    (0..2_000).into_par_iter().for_each(|_| {
        let lease = pool.get();
        let slot = &in_use[lease.id];
        assert_eq!(slot.fetch_add(1, Ordering::SeqCst), 0, "instance leased twice");
        slot.fetch_sub(1, Ordering::SeqCst);
    });

    assert!(pool.idle_count() <= pool.capacity());
}
