//! `decodeReturn(sig, bytes) -> tuple`, the inverse of [`crate::encode`].
//!
//! Return data carries no selector, so offsets for dynamic types are
//! measured from the start of `bytes` itself.

use worker_models::{Address, Uint256};

use crate::errors::AbiDecodeError;
use crate::signatures;

const WORD: usize = 32;

/// The decoded shape of one of the five supported calls' return data.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedReturn {
    PendingRequests(Vec<Uint256>),
    AnalysisRequest {
        requester: Address,
        user1: Address,
        user2: Address,
        /// One of `"pending"`, `"completed"`, `"failed"`.
        status: String,
        result: String,
        request_time: Uint256,
        completion_time: Uint256,
    },
    SnpData {
        user1_snp: String,
        user2_snp: String,
    },
}

fn word_at(bytes: &[u8], index: usize) -> Result<&[u8; WORD], AbiDecodeError> {
    let start = index * WORD;
    let end = start + WORD;
    bytes
        .get(start..end)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(AbiDecodeError::Truncated {
            needed: end,
            actual: bytes.len(),
        })
}

fn uint256_at(bytes: &[u8], index: usize) -> Result<Uint256, AbiDecodeError> {
    Ok(Uint256::from_be_bytes(*word_at(bytes, index)?))
}

fn address_at(bytes: &[u8], index: usize) -> Result<Address, AbiDecodeError> {
    let word = word_at(bytes, index)?;
    let mut out = [0u8; 20];
    out.copy_from_slice(&word[12..]);
    Ok(Address::from_bytes(out))
}

fn offset_at(bytes: &[u8], index: usize) -> Result<usize, AbiDecodeError> {
    let word = word_at(bytes, index)?;
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[WORD - 8..]);
    let offset = u64::from_be_bytes(low) as usize;
    if offset > bytes.len() {
        return Err(AbiDecodeError::OffsetOverflow {
            offset,
            len: bytes.len(),
        });
    }
    Ok(offset)
}

fn length_at_byte_offset(bytes: &[u8], byte_offset: usize) -> Result<usize, AbiDecodeError> {
    let end = byte_offset + WORD;
    let word = bytes
        .get(byte_offset..end)
        .ok_or(AbiDecodeError::Truncated {
            needed: end,
            actual: bytes.len(),
        })?;
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[WORD - 8..]);
    Ok(u64::from_be_bytes(low) as usize)
}

fn string_at_byte_offset(bytes: &[u8], byte_offset: usize) -> Result<String, AbiDecodeError> {
    let len = length_at_byte_offset(bytes, byte_offset)?;
    let payload_start = byte_offset + WORD;
    let payload_end = payload_start + len;
    let payload = bytes
        .get(payload_start..payload_end)
        .ok_or(AbiDecodeError::Truncated {
            needed: payload_end,
            actual: bytes.len(),
        })?;
    String::from_utf8(payload.to_vec()).map_err(|err| AbiDecodeError::NonUtf8(err.to_string()))
}

fn uint256_array_at_byte_offset(
    bytes: &[u8],
    byte_offset: usize,
) -> Result<Vec<Uint256>, AbiDecodeError> {
    let len = length_at_byte_offset(bytes, byte_offset)?;
    let elements_start = byte_offset + WORD;
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let start = elements_start + i * WORD;
        let end = start + WORD;
        let word: &[u8; WORD] = bytes
            .get(start..end)
            .and_then(|slice| slice.try_into().ok())
            .ok_or(AbiDecodeError::Truncated {
                needed: end,
                actual: bytes.len(),
            })?;
        out.push(Uint256::from_be_bytes(*word));
    }
    Ok(out)
}

pub fn decode_return(signature: &str, bytes: &[u8]) -> Result<DecodedReturn, AbiDecodeError> {
    match signature {
        s if s == signatures::GET_PENDING_REQUESTS => {
            let offset = offset_at(bytes, 0)?;
            Ok(DecodedReturn::PendingRequests(uint256_array_at_byte_offset(
                bytes, offset,
            )?))
        }
        s if s == signatures::GET_ANALYSIS_REQUEST => {
            let requester = address_at(bytes, 0)?;
            let user1 = address_at(bytes, 1)?;
            let user2 = address_at(bytes, 2)?;
            let status_offset = offset_at(bytes, 3)?;
            let result_offset = offset_at(bytes, 4)?;
            let request_time = uint256_at(bytes, 5)?;
            let completion_time = uint256_at(bytes, 6)?;
            let status = string_at_byte_offset(bytes, status_offset)?;
            let result = string_at_byte_offset(bytes, result_offset)?;
            Ok(DecodedReturn::AnalysisRequest {
                requester,
                user1,
                user2,
                status,
                result,
                request_time,
                completion_time,
            })
        }
        s if s == signatures::GET_SNP_DATA_FOR_ANALYSIS => {
            let user1_offset = offset_at(bytes, 0)?;
            let user2_offset = offset_at(bytes, 1)?;
            let user1_snp = string_at_byte_offset(bytes, user1_offset)?;
            let user2_snp = string_at_byte_offset(bytes, user2_offset)?;
            Ok(DecodedReturn::SnpData {
                user1_snp,
                user2_snp,
            })
        }
        other => Err(AbiDecodeError::UnknownSignature(other.to_string())),
    }
}
