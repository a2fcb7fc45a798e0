//! Response Decoder Tests
//!
//! Each decoder must either consume the whole reply and call its handler
//! exactly once, or fail without calling it.

use std::cell::Cell;

use obelisk_client::chain::{
    Header, Notification, OutputPoint, Transaction, NULL_HASH, UNSPENT_HEIGHT,
};
use obelisk_client::protocol::{names, response, Reader};
use obelisk_client::ObeliskError;

// =============================================================================
// Helper Functions
// =============================================================================

fn point(fill: u8, index: u32) -> OutputPoint {
    OutputPoint::new([fill; 32], index)
}

fn compact_row(kind: u8, point: &OutputPoint, height: u32, slot: u64) -> Vec<u8> {
    let mut row = vec![kind];
    row.extend_from_slice(&point.to_bytes());
    row.extend_from_slice(&height.to_le_bytes());
    row.extend_from_slice(&slot.to_le_bytes());
    row
}

fn expanded_row(
    output: &OutputPoint,
    output_height: u64,
    value: u64,
    spend: &OutputPoint,
    spend_height: u64,
) -> Vec<u8> {
    let mut row = output.to_bytes();
    row.extend_from_slice(&output_height.to_le_bytes());
    row.extend_from_slice(&value.to_le_bytes());
    row.extend_from_slice(&spend.to_bytes());
    row.extend_from_slice(&spend_height.to_le_bytes());
    row
}

// =============================================================================
// Empty
// =============================================================================

#[test]
fn test_decode_empty() {
    let called = Cell::new(0);
    response::decode_empty(&mut Reader::new(vec![]), || called.set(called.get() + 1)).unwrap();
    assert_eq!(called.get(), 1);
}

#[test]
fn test_decode_empty_rejects_trailing_bytes() {
    let called = Cell::new(false);
    let result = response::decode_empty(&mut Reader::new(vec![0x00]), || called.set(true));
    assert_eq!(result, Err(ObeliskError::BadStream));
    assert!(!called.get());
}

// =============================================================================
// Scalars
// =============================================================================

#[test]
fn test_decode_height_four_bytes() {
    let seen = Cell::new(None);
    response::decode_height(&mut Reader::new(vec![0x01, 0x02, 0x03, 0x04]), |h| {
        seen.set(Some(h))
    })
    .unwrap();
    assert_eq!(seen.get(), Some(0x0403_0201));
}

#[test]
fn test_decode_height_five_bytes_fails() {
    let called = Cell::new(false);
    let result = response::decode_height(&mut Reader::new(vec![1, 2, 3, 4, 5]), |_| {
        called.set(true)
    });
    assert!(result.is_err());
    assert!(!called.get());
}

#[test]
fn test_decode_height_three_bytes_fails() {
    let result = response::decode_height(&mut Reader::new(vec![1, 2, 3]), |_| {
        panic!("handler must not run")
    });
    assert_eq!(result, Err(ObeliskError::BadStream));
}

#[test]
fn test_decode_transaction_index() {
    let mut bytes = 500_000u32.to_le_bytes().to_vec();
    bytes.extend_from_slice(&17u32.to_le_bytes());

    let seen = Cell::new(None);
    response::decode_transaction_index(&mut Reader::new(bytes.clone()), |height, index| {
        seen.set(Some((height, index)))
    })
    .unwrap();
    assert_eq!(seen.get(), Some((500_000, 17)));

    bytes.pop();
    assert!(response::decode_transaction_index(&mut Reader::new(bytes), |_, _| {
        panic!("handler must not run")
    })
    .is_err());
}

#[test]
fn test_decode_block_header() {
    let header = Header {
        version: 4,
        previous_block_hash: [1; 32],
        merkle: [2; 32],
        timestamp: 3,
        bits: 5,
        nonce: 6,
    };
    let mut seen = None;
    response::decode_block_header(&mut Reader::new(header.to_bytes()), |h| seen = Some(h))
        .unwrap();
    assert_eq!(seen, Some(header.clone()));

    let mut long = header.to_bytes();
    long.push(0);
    assert!(response::read_block_header(&mut Reader::new(long)).is_err());
}

#[test]
fn test_decode_transaction_rejects_trailing_bytes() {
    let tx = Transaction {
        version: 1,
        inputs: vec![],
        outputs: vec![],
        locktime: 0,
    };
    let mut seen = None;
    response::decode_transaction(&mut Reader::new(tx.to_bytes()), |t| seen = Some(t)).unwrap();
    assert_eq!(seen, Some(tx.clone()));

    let mut long = tx.to_bytes();
    long.push(0xff);
    assert_eq!(
        response::read_transaction(&mut Reader::new(long)),
        Err(ObeliskError::BadStream)
    );
}

// =============================================================================
// Validate
// =============================================================================

#[test]
fn test_decode_validate_list() {
    let mut bytes = Vec::new();
    for index in [0u32, 3, 9] {
        bytes.extend_from_slice(&index.to_le_bytes());
    }
    let mut seen = None;
    response::decode_validate(&mut Reader::new(bytes), |list| seen = Some(list)).unwrap();
    assert_eq!(seen, Some(vec![0, 3, 9]));
}

#[test]
fn test_decode_validate_empty_list() {
    let mut seen = None;
    response::decode_validate(&mut Reader::new(vec![]), |list| seen = Some(list)).unwrap();
    assert_eq!(seen, Some(vec![]));
}

#[test]
fn test_decode_validate_partial_entry() {
    let result = response::decode_validate(&mut Reader::new(vec![1, 0, 0, 0, 2]), |_| {
        panic!("handler must not run")
    });
    assert_eq!(result, Err(ObeliskError::BadStream));
}

// =============================================================================
// Compact History
// =============================================================================

#[test]
fn test_decode_history_links_spend() {
    let p1 = point(0x11, 0);
    let spend = point(0x22, 1);
    let mut bytes = compact_row(0, &p1, 100, 5000);
    bytes.extend(compact_row(1, &spend, 105, p1.checksum()));

    let mut seen = None;
    response::decode_history(&mut Reader::new(bytes), |rows| seen = Some(rows)).unwrap();
    let rows = seen.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].output, p1);
    assert_eq!(rows[0].output_height, 100);
    assert_eq!(rows[0].value, 5000);
    assert_eq!(rows[0].spend, spend);
    assert_eq!(rows[0].spend_height, 105);
}

#[test]
fn test_decode_history_unspent() {
    let p2 = point(0x33, 4);
    let bytes = compact_row(0, &p2, 200, 10);

    let mut seen = None;
    response::decode_history(&mut Reader::new(bytes), |rows| seen = Some(rows)).unwrap();
    let rows = seen.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].spend.hash, NULL_HASH);
    assert_eq!(rows[0].spend.index, u32::MAX);
    assert_eq!(rows[0].spend_height, UNSPENT_HEIGHT);
}

#[test]
fn test_decode_history_empty_reply() {
    let mut seen = None;
    response::decode_history(&mut Reader::new(vec![]), |rows| seen = Some(rows)).unwrap();
    assert_eq!(seen, Some(vec![]));
}

#[test]
fn test_decode_history_truncated_row() {
    let mut bytes = compact_row(0, &point(0x11, 0), 100, 5000);
    bytes.pop();
    let result = response::decode_history(&mut Reader::new(bytes), |_| {
        panic!("handler must not run")
    });
    assert_eq!(result, Err(ObeliskError::BadStream));
}

#[test]
fn test_decode_history_unknown_kind() {
    let bytes = compact_row(2, &point(0x11, 0), 100, 5000);
    let result = response::decode_history(&mut Reader::new(bytes), |_| {
        panic!("handler must not run")
    });
    assert_eq!(result, Err(ObeliskError::UnknownPointKind(2)));
}

// =============================================================================
// Legacy Expanded History
// =============================================================================

#[test]
fn test_decode_expanded_history() {
    let output = point(0x44, 2);
    let spend = point(0x55, 0);
    let mut bytes = expanded_row(&output, 10, 700, &spend, 20);
    bytes.extend(expanded_row(
        &point(0x66, 1),
        30,
        800,
        &OutputPoint::null(),
        UNSPENT_HEIGHT,
    ));

    let mut seen = None;
    response::decode_expanded_history(&mut Reader::new(bytes), |rows| seen = Some(rows))
        .unwrap();
    let rows = seen.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].output, output);
    assert_eq!(rows[0].value, 700);
    assert_eq!(rows[0].spend, spend);
    assert_eq!(rows[0].spend_height, 20);
    assert!(!rows[1].is_spent());
    assert_eq!(rows[1].spend_height, UNSPENT_HEIGHT);
}

#[test]
fn test_decode_expanded_history_truncated() {
    let mut bytes = expanded_row(&point(0x44, 2), 10, 700, &point(0x55, 0), 20);
    bytes.truncate(bytes.len() - 3);
    assert_eq!(
        response::read_expanded_history(&mut Reader::new(bytes)),
        Err(ObeliskError::BadStream)
    );
}

// =============================================================================
// Stealth
// =============================================================================

#[test]
fn test_decode_stealth_expands_rows() {
    let ephemeral = [0x77; 32];
    let mut key_hash = [0u8; 20];
    key_hash[0] = 0x01;
    key_hash[19] = 0x02;
    let tx_hash = [0x88; 32];

    let mut bytes = ephemeral.to_vec();
    bytes.extend_from_slice(&key_hash);
    bytes.extend_from_slice(&tx_hash);

    let mut seen = None;
    response::decode_stealth(&mut Reader::new(bytes), |rows| seen = Some(rows)).unwrap();
    let rows = seen.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ephemeral_public_key[0], 0x02);
    assert_eq!(&rows[0].ephemeral_public_key[1..], &ephemeral[..]);
    assert_eq!(rows[0].public_key_hash[0], 0x02);
    assert_eq!(rows[0].public_key_hash[19], 0x01);
    assert_eq!(rows[0].transaction_hash, tx_hash);
}

#[test]
fn test_decode_stealth_truncated() {
    let result = response::decode_stealth(&mut Reader::new(vec![0u8; 83]), |_| {
        panic!("handler must not run")
    });
    assert_eq!(result, Err(ObeliskError::BadStream));
}

// =============================================================================
// Notifications
// =============================================================================

#[test]
fn test_decode_address_update() {
    let mut bytes = vec![0x00];
    bytes.extend_from_slice(&[0x12; 20]);
    bytes.extend_from_slice(&840_000u32.to_le_bytes());
    bytes.extend_from_slice(&[0x34; 32]);

    let mut seen = None;
    response::decode_address_update(&mut Reader::new(bytes.clone()), |u| seen = Some(u))
        .unwrap();
    let update = seen.unwrap();
    assert_eq!(update.address.version, 0);
    assert_eq!(update.address.hash, [0x12; 20]);
    assert_eq!(update.height, 840_000);
    assert_eq!(update.block_hash, [0x34; 32]);

    let notification =
        response::read_notification(names::ADDRESS_UPDATE, &mut Reader::new(bytes)).unwrap();
    assert_eq!(notification, Some(Notification::Address(update)));
}

#[test]
fn test_address_update_rejects_wrong_length() {
    let short = vec![0u8; 56];
    let result = response::decode_address_update(&mut Reader::new(short), |_| {
        panic!("handler must not run")
    });
    assert_eq!(result, Err(ObeliskError::BadStream));

    let long = vec![0u8; 58];
    let result = response::decode_address_update(&mut Reader::new(long.clone()), |_| {
        panic!("handler must not run")
    });
    assert_eq!(result, Err(ObeliskError::BadStream));
    assert!(response::read_address_update(&mut Reader::new(long)).is_err());
}

#[test]
fn test_decode_stealth_update() {
    let mut bytes = vec![0xde, 0xad, 0xbe, 0xef];
    bytes.extend_from_slice(&9u32.to_le_bytes());
    bytes.extend_from_slice(&[0x56; 32]);

    let notification =
        response::read_notification(names::ADDRESS_STEALTH_UPDATE, &mut Reader::new(bytes))
            .unwrap();
    match notification {
        Some(Notification::Stealth(update)) => {
            assert_eq!(update.prefix, [0xde, 0xad, 0xbe, 0xef]);
            assert_eq!(update.height, 9);
        }
        other => panic!("Expected stealth update, got {:?}", other),
    }

    let mut short = vec![0u8; 39];
    assert!(response::decode_stealth_update(&mut Reader::new(short.clone()), |_| {
        panic!("handler must not run")
    })
    .is_err());
    short.extend_from_slice(&[0, 0]);
    assert!(response::read_stealth_update(&mut Reader::new(short)).is_err());
}

#[test]
fn test_unknown_notification_ignored() {
    let result = response::read_notification("heartbeat", &mut Reader::new(vec![1, 2, 3]));
    assert_eq!(result, Ok(None));
}
