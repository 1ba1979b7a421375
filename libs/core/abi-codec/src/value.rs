//! The closed set of ABI types this worker ever encodes or decodes.
//!
//! Dynamic dispatch over ABI types, in an ecosystem with a general EVM
//! library, would use that library's type model. Here it maps cleanly
//! onto an exhaustively-matched, tagged enum.

use worker_models::{Address, Uint256};

/// A type tag, used to describe the expected shape of a return tuple
/// before decoding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiType {
    Uint256,
    Address,
    Bytes21,
    Str,
    Uint256Array,
}

impl AbiType {
    /// Dynamic types place an offset in the head and their payload in the
    /// tail; static types occupy their 32-byte head slot directly.
    pub fn is_dynamic(self) -> bool {
        matches!(self, AbiType::Str | AbiType::Uint256Array)
    }
}

/// A decoded (or to-be-encoded) ABI value.
#[derive(Debug, Clone, PartialEq)]
pub enum AbiValue {
    Uint256(Uint256),
    Address(Address),
    /// A fixed-size 21-byte blob (Solidity `bytes21`), right-padded in
    /// its 32-byte word — unlike `uint256`/`address`, which are
    /// left-padded.
    Bytes21([u8; 21]),
    Str(String),
    Uint256Array(Vec<Uint256>),
}

impl AbiValue {
    pub fn type_tag(&self) -> AbiType {
        match self {
            AbiValue::Uint256(_) => AbiType::Uint256,
            AbiValue::Address(_) => AbiType::Address,
            AbiValue::Bytes21(_) => AbiType::Bytes21,
            AbiValue::Str(_) => AbiType::Str,
            AbiValue::Uint256Array(_) => AbiType::Uint256Array,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.type_tag().is_dynamic()
    }

    pub fn as_uint256(&self) -> Option<Uint256> {
        match self {
            AbiValue::Uint256(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            AbiValue::Address(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AbiValue::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            AbiValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_uint256_array(&self) -> Option<&[Uint256]> {
        match self {
            AbiValue::Uint256Array(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}
