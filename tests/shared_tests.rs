//! Tests for SharedIndex
//!
//! These tests verify:
//! - Clones share one index
//! - Concurrent writers are serialized (one line per success)
//! - Concurrent inserts of the same key: exactly one wins
//! - Replay after concurrent writes matches live state

use std::sync::Arc;
use std::sync::Barrier;
use std::thread;

use logkv::config::{Config, SyncStrategy};
use logkv::{KeyValueIndex, KvError, SharedIndex};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_shared() -> (TempDir, Config, SharedIndex) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .log_path(temp_dir.path().join("db.log"))
        .sync_strategy(SyncStrategy::OsBuffered)
        .build();
    let shared = SharedIndex::open(config.clone()).unwrap();
    (temp_dir, config, shared)
}

// =============================================================================
// Basic Tests
// =============================================================================

#[test]
fn test_clones_share_state() {
    let (_temp, _config, shared) = setup_shared();
    let other = shared.clone();

    shared.insert("a", "1").unwrap();
    other.update("a", "2").unwrap();

    assert_eq!(shared.select("a"), Some("2".to_string()));
    assert_eq!(other.len(), 1);
    assert!(!other.is_empty());
}

#[test]
fn test_validation_errors_pass_through() {
    let (_temp, _config, shared) = setup_shared();
    shared.insert("a", "1").unwrap();

    assert!(matches!(shared.insert("a", "2"), Err(KvError::DuplicateKey(_))));
    assert!(matches!(shared.update("b", "2"), Err(KvError::KeyNotFound(_))));
    assert_eq!(shared.select("b"), None);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_inserts_distinct_keys() {
    let (_temp, config, shared) = setup_shared();
    let threads = 8;
    let per_thread = 50;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..per_thread {
                    shared
                        .insert(&format!("t{}-k{}", t, i), &format!("{}", i))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(shared.len(), threads * per_thread);

    let recovered = KeyValueIndex::open(config).unwrap();
    assert_eq!(recovered.snapshot(), shared.snapshot());
    assert_eq!(recovered.store().line_count().unwrap(), threads * per_thread);
}

#[test]
fn test_concurrent_insert_same_key_single_winner() {
    let (_temp, config, shared) = setup_shared();
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let shared = shared.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                shared.insert("contended", &format!("writer{}", t)).is_ok()
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(winners, 1);

    let recovered = KeyValueIndex::open(config).unwrap();
    assert_eq!(recovered.store().line_count().unwrap(), 1);
    assert_eq!(
        recovered.select("contended").map(str::to_string),
        shared.select("contended")
    );
}

#[test]
fn test_concurrent_updates_replay_to_final_value() {
    let (_temp, config, shared) = setup_shared();
    shared.insert("counter", "0").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    shared.update("counter", &format!("{}-{}", t, i)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let live = shared.select("counter");
    let recovered = KeyValueIndex::open(config).unwrap();

    assert_eq!(recovered.select("counter").map(str::to_string), live);
    assert_eq!(recovered.recovery().records_applied, 101);
}
