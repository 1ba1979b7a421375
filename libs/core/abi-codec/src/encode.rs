//! `encodeCall(sig, args) -> selector ‖ headArea ‖ tailArea`.
//!
//! Every argument occupies a 32-byte head slot. Dynamic types (`string`,
//! `uint256[]`) place a byte offset in their head slot — measured from
//! the start of the argument block, i.e. *not* counting the 4-byte
//! selector — and their actual payload in the tail area, length-prefixed
//! and zero-padded to a 32-byte boundary.

use crate::errors::AbiEncodeError;
use crate::selector::selector;
use crate::value::AbiValue;

const WORD: usize = 32;

fn pad_to_word(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

fn write_left_padded_uint(out: &mut Vec<u8>, be_bytes: &[u8]) {
    debug_assert!(be_bytes.len() <= WORD);
    out.extend(std::iter::repeat(0u8).take(WORD - be_bytes.len()));
    out.extend_from_slice(be_bytes);
}

fn encode_string_payload(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut payload = Vec::with_capacity(WORD + pad_to_word(bytes.len()));
    write_left_padded_uint(&mut payload, &(bytes.len() as u64).to_be_bytes());
    payload.extend_from_slice(bytes);
    let padded_len = pad_to_word(bytes.len());
    payload.resize(WORD + padded_len, 0);
    payload
}

fn encode_uint_array_payload(values: &[worker_models::Uint256]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(WORD + values.len() * WORD);
    write_left_padded_uint(&mut payload, &(values.len() as u64).to_be_bytes());
    for value in values {
        payload.extend_from_slice(value.as_be_bytes());
    }
    payload
}

/// Encodes the argument block only (no selector) — used directly by
/// tests that check calldata byte layout, and by `encode_call`.
pub fn encode_args(args: &[AbiValue]) -> Vec<u8> {
    let head_size = args.len() * WORD;
    let mut head = vec![0u8; head_size];
    let mut tail = Vec::new();

    for (index, arg) in args.iter().enumerate() {
        let head_slot = &mut head[index * WORD..index * WORD + WORD];
        match arg {
            AbiValue::Uint256(value) => head_slot.copy_from_slice(value.as_be_bytes()),
            AbiValue::Address(addr) => {
                head_slot[12..].copy_from_slice(addr.as_bytes());
            }
            AbiValue::Bytes21(bytes) => {
                // Fixed-size byte arrays are right-padded, not left-padded.
                head_slot[..21].copy_from_slice(bytes);
            }
            AbiValue::Str(value) => {
                let offset = head_size + tail.len();
                head_slot.copy_from_slice(&encode_offset(offset));
                tail.extend(encode_string_payload(value));
            }
            AbiValue::Uint256Array(values) => {
                let offset = head_size + tail.len();
                head_slot.copy_from_slice(&encode_offset(offset));
                tail.extend(encode_uint_array_payload(values));
            }
        }
    }

    head.extend(tail);
    head
}

fn encode_offset(offset: usize) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&(offset as u64).to_be_bytes());
    word
}

/// Encodes a full call: 4-byte selector followed by the argument block.
pub fn encode_call(signature: &str, args: &[AbiValue]) -> Result<Vec<u8>, AbiEncodeError> {
    let mut out = Vec::with_capacity(4 + args.len() * WORD);
    out.extend_from_slice(&selector(signature));
    out.extend(encode_args(args));
    Ok(out)
}
