//! Chain Type Tests
//!
//! Tests for the domain value codecs:
//! - Block header and transaction serialization against mainnet genesis
//! - Output point checksums
//! - Binary prefixes and payment addresses

use obelisk_client::chain::{
    encode_hash, Binary, Header, HistoryRow, OutputPoint, PaymentAddress, Transaction,
    NULL_HASH, UNSPENT_HEIGHT,
};
use obelisk_client::protocol::Reader;
use obelisk_client::ObeliskError;

const GENESIS_HEADER: &str = "0100000000000000000000000000000000000000000000000000000000000000000000003ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa4b1e5e4a29ab5f49ffff001d1dac2b7c";

const GENESIS_COINBASE: &str = "01000000010000000000000000000000000000000000000000000000000000000000000000ffffffff4d04ffff001d0104455468652054696d65732030332f4a616e2f32303039204368616e63656c6c6f72206f6e206272696e6b206f66207365636f6e64206261696c6f757420666f722062616e6b73ffffffff0100f2052a01000000434104678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5fac00000000";

// =============================================================================
// Header Tests
// =============================================================================

#[test]
fn test_genesis_header_decode() {
    let bytes = hex::decode(GENESIS_HEADER).unwrap();
    let mut reader = Reader::new(bytes.clone());
    let header = Header::from_reader(&mut reader).unwrap();

    assert!(reader.is_exhausted());
    assert_eq!(header.version, 1);
    assert_eq!(header.previous_block_hash, NULL_HASH);
    assert_eq!(header.timestamp, 1_231_006_505);
    assert_eq!(header.bits, 0x1d00_ffff);
    assert_eq!(header.nonce, 2_083_236_893);
    assert_eq!(header.to_bytes(), bytes);
    assert_eq!(
        encode_hash(&header.hash()),
        "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"
    );
}

#[test]
fn test_header_short_input() {
    let bytes = hex::decode(GENESIS_HEADER).unwrap();
    let mut reader = Reader::new(bytes[..79].to_vec());
    assert_eq!(Header::from_reader(&mut reader), Err(ObeliskError::BadStream));
}

// =============================================================================
// Transaction Tests
// =============================================================================

#[test]
fn test_genesis_coinbase_decode() {
    let bytes = hex::decode(GENESIS_COINBASE).unwrap();
    let mut reader = Reader::new(bytes.clone());
    let tx = Transaction::from_reader(&mut reader).unwrap();

    assert!(reader.is_exhausted());
    assert_eq!(tx.version, 1);
    assert_eq!(tx.inputs.len(), 1);
    assert!(tx.inputs[0].previous_output.is_null());
    assert_eq!(tx.inputs[0].script.len(), 0x4d);
    assert_eq!(tx.outputs.len(), 1);
    assert_eq!(tx.outputs[0].value, 5_000_000_000);
    assert_eq!(tx.locktime, 0);
    assert_eq!(tx.to_bytes(), bytes);
    assert_eq!(
        encode_hash(&tx.hash()),
        "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"
    );
}

#[test]
fn test_transaction_truncated_script() {
    let bytes = hex::decode(GENESIS_COINBASE).unwrap();
    let mut reader = Reader::new(bytes[..60].to_vec());
    assert_eq!(Transaction::from_reader(&mut reader), Err(ObeliskError::BadStream));
}

#[test]
fn test_empty_transaction_layout() {
    let tx = Transaction {
        version: 2,
        inputs: vec![],
        outputs: vec![],
        locktime: 0x0a0b_0c0d,
    };
    assert_eq!(
        tx.to_bytes(),
        vec![0x02, 0, 0, 0, 0x00, 0x00, 0x0d, 0x0c, 0x0b, 0x0a]
    );
}

// =============================================================================
// Point Tests
// =============================================================================

#[test]
fn test_point_round_trip_through_reader() {
    let mut hash = [0u8; 32];
    for (i, byte) in hash.iter_mut().enumerate() {
        *byte = i as u8;
    }
    let point = OutputPoint::new(hash, 3);

    let mut reader = Reader::new(point.to_bytes());
    assert_eq!(OutputPoint::from_reader(&mut reader).unwrap(), point);
    assert!(reader.is_exhausted());
}

#[test]
fn test_checksum_distinguishes_indexes() {
    let hash = [0x5a; 32];
    let a = OutputPoint::new(hash, 0);
    let b = OutputPoint::new(hash, 1);
    assert_ne!(a.checksum(), b.checksum());
}

#[test]
fn test_checksum_wraps_index_at_15_bits() {
    let hash = [0x5a; 32];
    assert_eq!(
        OutputPoint::new(hash, 0).checksum(),
        OutputPoint::new(hash, 0x8000).checksum()
    );
}

#[test]
fn test_unspent_history_row() {
    let row = HistoryRow::unspent(OutputPoint::new([1; 32], 0), 100, 5000);
    assert!(!row.is_spent());
    assert!(row.spend.is_null());
    assert_eq!(row.spend_height, UNSPENT_HEIGHT);
    assert_eq!(UNSPENT_HEIGHT, 0xffff_ffff);
}

// =============================================================================
// Prefix and Address Tests
// =============================================================================

#[test]
fn test_binary_minimal_blocks() {
    assert_eq!(Binary::new(1, &[0xff]).blocks(), &[0x80]);
    assert_eq!(Binary::new(8, &[0xff, 0xff]).blocks(), &[0xff]);
    assert_eq!(Binary::new(9, &[0xff, 0xff]).blocks(), &[0xff, 0x80]);
    assert_eq!(Binary::new(300, &[]).blocks().len(), 38);
}

#[test]
fn test_binary_bits() {
    let prefix = Binary::from_bit_string("101").unwrap();
    assert!(prefix.bit(0));
    assert!(!prefix.bit(1));
    assert!(prefix.bit(2));
    assert!(!prefix.bit(3));
}

#[test]
fn test_payment_address_from_hex() {
    let address = PaymentAddress::from_hex(0x6f, &"ab".repeat(20)).unwrap();
    assert_eq!(address.version, 0x6f);
    assert_eq!(address.hash, [0xab; 20]);
}
