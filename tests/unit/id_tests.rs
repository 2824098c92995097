// Identifier generation tests

use bizkit::id::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

#[test]
fn test_ids_are_unique_across_threads() {
    let generator = Arc::new(SnowflakeGenerator::new(7).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || {
                (0..2000)
                    .map(|_| generator.next_id().unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id), "duplicate id {}", id);
        }
    }
    assert_eq!(seen.len(), 8000);
}

#[test]
fn test_ids_carry_worker_id() {
    let id = snowflake_id(42).unwrap();
    let parts = SnowflakeGenerator::decompose(id);
    assert_eq!(parts.worker_id, 42);
    assert!(id > 0);
}

#[test]
fn test_ids_increase_within_one_generator() {
    let generator = SnowflakeGenerator::new(1).unwrap();
    let first = generator.next_id().unwrap();
    let second = generator.next_id().unwrap();
    assert!(second > first);
}

#[test]
fn test_worker_id_out_of_range_is_rejected() {
    assert!(matches!(
        SnowflakeGenerator::new(MAX_WORKER_ID + 1),
        Err(IdError::InvalidWorkerId { .. })
    ));
    assert!(snowflake_id(5000).is_err());
}

#[test]
fn test_guid_string_is_32_hex_chars() {
    let guid = guid_string();
    assert_eq!(guid.len(), 32);
    assert!(guid.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(guid, guid_string());
}

#[test]
fn test_guid_numbers_differ() {
    assert_ne!(guid_number(), guid_number());
}
