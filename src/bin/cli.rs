//! Obelisk CLI
//!
//! Offline inspector for the Obelisk wire format: prints request payloads
//! and decodes captured reply payloads. Performs no network I/O.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use obelisk_client::chain::{reversed, Binary, Hash, PaymentAddress, HASH_SIZE};
use obelisk_client::protocol::{expand_history, expand_stealth, request, response};
use obelisk_client::protocol::{Reader, Request, SubscribeType};
use obelisk_client::{ObeliskError, Result};

/// Obelisk CLI
#[derive(Parser, Debug)]
#[command(name = "obelisk-cli")]
#[command(about = "Encode Obelisk requests and decode Obelisk replies")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the command name and hex payload of a request
    Encode {
        #[command(subcommand)]
        request: EncodeCommand,
    },

    /// Decode a hex reply payload and print it as JSON
    Decode {
        /// Reply shape
        #[arg(value_enum)]
        kind: ReplyKind,

        /// Reply payload in hex (without the dealer's error code)
        payload: String,
    },
}

#[derive(Subcommand, Debug)]
enum EncodeCommand {
    /// blockchain.fetch_last_height
    LastHeight,

    /// blockchain.fetch_transaction or transaction_pool.fetch_transaction
    Transaction {
        /// Transaction hash (display order hex)
        hash: String,

        /// Query the transaction pool instead of the chain
        #[arg(long)]
        pool: bool,
    },

    /// blockchain.fetch_transaction_index
    TransactionIndex {
        /// Transaction hash (display order hex)
        hash: String,
    },

    /// blockchain.fetch_block_header by height
    Header {
        height: u32,
    },

    /// blockchain.fetch_block_header by hash
    HeaderByHash {
        /// Block hash (display order hex)
        hash: String,
    },

    /// blockchain.fetch_stealth
    Stealth {
        /// Prefix as a bit string, e.g. 1011
        prefix: String,

        #[arg(short, long, default_value = "0")]
        from_height: u32,
    },

    /// Address history in one of the three dialects
    History {
        #[arg(value_enum)]
        dialect: HistoryDialect,

        /// Address version byte
        #[arg(short, long, default_value = "0")]
        version: u8,

        /// Address hash (40 hex chars)
        hash: String,

        #[arg(short, long, default_value = "0")]
        from_height: u32,
    },

    /// address.subscribe (or address.renew) for a prefix
    Subscribe {
        #[arg(value_enum)]
        kind: SubscribeKind,

        /// Prefix as a bit string
        prefix: String,

        /// Build address.renew instead
        #[arg(long)]
        renew: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum HistoryDialect {
    /// blockchain.fetch_history
    Blockchain,
    /// address.fetch_history (legacy)
    Legacy,
    /// address.fetch_history2
    V2,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SubscribeKind {
    Address,
    Stealth,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ReplyKind {
    Empty,
    Height,
    Transaction,
    Header,
    TransactionIndex,
    Validate,
    History,
    LegacyHistory,
    Stealth,
    AddressUpdate,
    StealthUpdate,
}

#[derive(Serialize)]
struct EncodedRequest {
    command: &'static str,
    payload: String,
}

#[derive(Serialize)]
struct TransactionIndex {
    block_height: u32,
    index: u32,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,obelisk_client=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let output = match args.command {
        Commands::Encode { request } => encode(request).and_then(|r| to_json(&r)),
        Commands::Decode { kind, payload } => decode(kind, &payload),
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn encode(command: EncodeCommand) -> Result<EncodedRequest> {
    let built: Request = match command {
        EncodeCommand::LastHeight => request::blockchain_fetch_last_height(),
        EncodeCommand::Transaction { hash, pool } => {
            let hash = parse_hash(&hash)?;
            if pool {
                request::transaction_pool_fetch_transaction(&hash)
            } else {
                request::blockchain_fetch_transaction(&hash)
            }
        }
        EncodeCommand::TransactionIndex { hash } => {
            request::blockchain_fetch_transaction_index(&parse_hash(&hash)?)
        }
        EncodeCommand::Header { height } => request::blockchain_fetch_block_header_by_height(height),
        EncodeCommand::HeaderByHash { hash } => {
            request::blockchain_fetch_block_header_by_hash(&parse_hash(&hash)?)
        }
        EncodeCommand::Stealth {
            prefix,
            from_height,
        } => request::blockchain_fetch_stealth(&Binary::from_bit_string(&prefix)?, from_height)?,
        EncodeCommand::History {
            dialect,
            version,
            hash,
            from_height,
        } => {
            let address = PaymentAddress::from_hex(version, &hash)?;
            match dialect {
                HistoryDialect::Blockchain => request::blockchain_fetch_history(&address, from_height),
                HistoryDialect::Legacy => request::address_fetch_history(&address, from_height),
                HistoryDialect::V2 => request::address_fetch_history2(&address, from_height),
            }
        }
        EncodeCommand::Subscribe {
            kind,
            prefix,
            renew,
        } => {
            let discriminator = match kind {
                SubscribeKind::Address => SubscribeType::Address,
                SubscribeKind::Stealth => SubscribeType::Stealth,
            };
            let prefix = Binary::from_bit_string(&prefix)?;
            if renew {
                request::address_renew(discriminator, &prefix)?
            } else {
                request::address_subscribe(discriminator, &prefix)?
            }
        }
    };

    tracing::debug!("Built {} ({} bytes)", built.command, built.payload.len());

    Ok(EncodedRequest {
        command: built.command,
        payload: hex::encode(&built.payload),
    })
}

fn decode(kind: ReplyKind, payload: &str) -> Result<String> {
    let bytes = hex::decode(payload.trim())
        .map_err(|e| ObeliskError::Config(format!("invalid payload hex: {}", e)))?;
    let reader = &mut Reader::new(bytes);

    match kind {
        ReplyKind::Empty => reader.expect_exhausted().and_then(|_| to_json(&())),
        ReplyKind::Height => to_json(&response::read_height(reader)?),
        ReplyKind::Transaction => to_json(&response::read_transaction(reader)?),
        ReplyKind::Header => to_json(&response::read_block_header(reader)?),
        ReplyKind::TransactionIndex => {
            let (block_height, index) = response::read_transaction_index(reader)?;
            to_json(&TransactionIndex {
                block_height,
                index,
            })
        }
        ReplyKind::Validate => to_json(&response::read_validate(reader)?),
        ReplyKind::History => {
            let compact = response::read_compact_history(reader)?;
            tracing::debug!("Reconciling {} compact rows", compact.len());
            to_json(&expand_history(&compact))
        }
        ReplyKind::LegacyHistory => to_json(&response::read_expanded_history(reader)?),
        ReplyKind::Stealth => to_json(&expand_stealth(&response::read_compact_stealth(reader)?)),
        ReplyKind::AddressUpdate => to_json(&response::read_address_update(reader)?),
        ReplyKind::StealthUpdate => to_json(&response::read_stealth_update(reader)?),
    }
}

/// Hashes are entered in display order and carried reversed on the wire
fn parse_hash(text: &str) -> Result<Hash> {
    let bytes =
        hex::decode(text).map_err(|e| ObeliskError::Config(format!("invalid hash hex: {}", e)))?;
    let hash: Hash = bytes.as_slice().try_into().map_err(|_| {
        ObeliskError::Config(format!("hash must be {} bytes, got {}", HASH_SIZE, bytes.len()))
    })?;
    Ok(reversed(&hash))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ObeliskError::Config(format!("cannot render output: {}", e)))
}
