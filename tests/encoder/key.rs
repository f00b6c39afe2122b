// Integration tests for encoder/key.rs — address and content key schemes.

use dedup_append::cache::EMPTY_KEY;
use dedup_append::{ByAddress, ByContent, KeyScheme};

#[test]
fn address_key_is_storage_identity() {
    let a = b"same".to_vec();
    let b = b"same".to_vec();
    assert_ne!(ByAddress.key(&a), ByAddress.key(&b));
    assert_eq!(ByAddress.key(&a), ByAddress.key(&a[..]));
    assert_eq!(ByAddress.key(&a), a.as_ptr() as u64);
}

#[test]
fn content_key_is_storage_independent() {
    let a = b"same".to_vec();
    let b = b"same".to_vec();
    let scheme = ByContent::default();
    assert_eq!(scheme.key(&a), scheme.key(&b));
    assert_ne!(scheme.key(b"same"), scheme.key(b"diff"));
}

#[test]
fn content_key_never_empty_marker() {
    let scheme = ByContent::with_seed(7);
    for len in 0..64usize {
        let v: Vec<u8> = (0..len as u8).collect();
        assert_ne!(scheme.key(&v), EMPTY_KEY);
    }
}

#[test]
fn address_key_shared_by_views_of_one_start_byte() {
    let pool = b"abcdef".to_vec();
    assert_eq!(ByAddress.key(&pool[0..2]), ByAddress.key(&pool[0..6]));
}

#[test]
fn verification_flags() {
    assert!(ByAddress::VERIFIES_CONTENT);
    assert!(ByContent::VERIFIES_CONTENT);
}
