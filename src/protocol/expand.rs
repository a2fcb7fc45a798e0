//! History reconciliation and stealth expansion
//!
//! ## History
//! The compact reply lists output and spend events separately with no
//! pointer from a spend to the output it consumes. Each spend carries the
//! checksum of the spent output's point instead, so linking is a matter of
//! recomputing that checksum for every output:
//!
//! 1. every output row becomes an unspent expanded row keyed by the
//!    checksum of its point
//! 2. every spend row claims the first still-unspent row whose key equals
//!    its `previous_checksum`
//! 3. rows left unclaimed keep the unspent sentinels
//!
//! Matching is first-eligible in list order. Output order is the server's.
//!
//! ## Stealth
//! The server strips the constant sign byte from ephemeral keys and sends
//! public key hashes reversed; both are restored here.

use crate::chain::{
    reversed, CompactHistoryRow, CompactStealthRow, HistoryRow, StealthRow, EC_COMPRESSED_SIZE,
    EPHEMERAL_PUBLIC_KEY_SIGN,
};

/// Expanded row plus the matching key it is waiting on
struct PendingRow {
    row: HistoryRow,
    key: u64,
}

/// Link compact output and spend rows into expanded history rows.
///
/// Spends whose checksum matches no unspent output are dropped; with a
/// `from_height` filter the spent output may simply predate the window.
pub fn expand_history(compact: &[CompactHistoryRow]) -> Vec<HistoryRow> {
    let mut pending: Vec<PendingRow> = compact
        .iter()
        .filter_map(|row| match *row {
            CompactHistoryRow::Output {
                point,
                height,
                value,
            } => Some(PendingRow {
                row: HistoryRow::unspent(point, u64::from(height), value),
                key: point.checksum(),
            }),
            CompactHistoryRow::Spend { .. } => None,
        })
        .collect();

    for spend in compact {
        let CompactHistoryRow::Spend {
            point,
            height,
            previous_checksum,
        } = *spend
        else {
            continue;
        };

        let claimed = pending
            .iter_mut()
            .find(|candidate| !candidate.row.is_spent() && candidate.key == previous_checksum);

        match claimed {
            Some(candidate) => {
                candidate.row.spend = point;
                candidate.row.spend_height = u64::from(height);
            }
            None => {
                tracing::trace!(
                    "No unspent output for spend checksum {:#018x} at height {}",
                    previous_checksum,
                    height
                );
            }
        }
    }

    pending.into_iter().map(|pending| pending.row).collect()
}

/// Restore the sign byte and natural hash order of compact stealth rows
pub fn expand_stealth(compact: &[CompactStealthRow]) -> Vec<StealthRow> {
    compact
        .iter()
        .map(|row| {
            let mut ephemeral_public_key = [0u8; EC_COMPRESSED_SIZE];
            ephemeral_public_key[0] = EPHEMERAL_PUBLIC_KEY_SIGN;
            ephemeral_public_key[1..].copy_from_slice(&row.ephemeral_public_key_hash);

            StealthRow {
                ephemeral_public_key,
                public_key_hash: reversed(&row.public_key_hash),
                transaction_hash: row.transaction_hash,
            }
        })
        .collect()
}
