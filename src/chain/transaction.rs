//! Transactions
//!
//! Pre-segwit serialization:
//! ```text
//! version:4 | varint n | n * input | varint m | m * output | locktime:4
//! input  = previous_output:36 | varint len | script | sequence:4
//! output = value:8 | varint len | script
//! ```

use bytes::{BufMut, BytesMut};
use serde::Serialize;

use super::hash::{bitcoin_hash, serialize_hex, Hash};
use super::point::OutputPoint;
use crate::error::{ObeliskError, Result};
use crate::protocol::Reader;

/// Smallest encoded input: previous output, empty script length, sequence
const MIN_INPUT_SIZE: usize = 36 + 1 + 4;

/// Smallest encoded output: value, empty script length
const MIN_OUTPUT_SIZE: usize = 8 + 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Input {
    pub previous_output: OutputPoint,
    #[serde(serialize_with = "serialize_hex")]
    pub script: Vec<u8>,
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Output {
    pub value: u64,
    #[serde(serialize_with = "serialize_hex")]
    pub script: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub locktime: u32,
}

impl Transaction {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = BytesMut::new();
        out.put_u32_le(self.version);

        write_varint(&mut out, self.inputs.len() as u64);
        for input in &self.inputs {
            input.previous_output.write_to(&mut out);
            write_varint(&mut out, input.script.len() as u64);
            out.put_slice(&input.script);
            out.put_u32_le(input.sequence);
        }

        write_varint(&mut out, self.outputs.len() as u64);
        for output in &self.outputs {
            out.put_u64_le(output.value);
            write_varint(&mut out, output.script.len() as u64);
            out.put_slice(&output.script);
        }

        out.put_u32_le(self.locktime);
        out.to_vec()
    }

    pub fn from_reader(reader: &mut Reader) -> Result<Self> {
        let version = reader.read_4_bytes_le()?;

        let input_count = read_count(reader, MIN_INPUT_SIZE)?;
        let mut inputs = Vec::with_capacity(input_count);
        for _ in 0..input_count {
            let previous_output = OutputPoint::from_reader(reader)?;
            let script = read_script(reader)?;
            let sequence = reader.read_4_bytes_le()?;
            inputs.push(Input {
                previous_output,
                script,
                sequence,
            });
        }

        let output_count = read_count(reader, MIN_OUTPUT_SIZE)?;
        let mut outputs = Vec::with_capacity(output_count);
        for _ in 0..output_count {
            let value = reader.read_8_bytes_le()?;
            let script = read_script(reader)?;
            outputs.push(Output { value, script });
        }

        let locktime = reader.read_4_bytes_le()?;

        Ok(Self {
            version,
            inputs,
            outputs,
            locktime,
        })
    }

    pub fn hash(&self) -> Hash {
        bitcoin_hash(&self.to_bytes())
    }
}

/// Bitcoin CompactSize integer
pub(crate) fn write_varint(out: &mut BytesMut, value: u64) {
    match value {
        0..=0xfc => out.put_u8(value as u8),
        0xfd..=0xffff => {
            out.put_u8(0xfd);
            out.put_u16_le(value as u16);
        }
        0x1_0000..=0xffff_ffff => {
            out.put_u8(0xfe);
            out.put_u32_le(value as u32);
        }
        _ => {
            out.put_u8(0xff);
            out.put_u64_le(value);
        }
    }
}

/// Element count, bounded by how many `min_size` elements the remaining
/// bytes could possibly hold
fn read_count(reader: &mut Reader, min_size: usize) -> Result<usize> {
    let count = reader.read_varint()?;
    if count > (reader.remaining() / min_size) as u64 {
        return Err(ObeliskError::BadStream);
    }
    Ok(count as usize)
}

fn read_script(reader: &mut Reader) -> Result<Vec<u8>> {
    let length = read_count(reader, 1)?;
    Ok(reader.read_bytes(length)?.to_vec())
}
