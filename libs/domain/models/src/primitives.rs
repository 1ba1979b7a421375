//! EVM-adjacent primitive types: 20-byte addresses and 256-bit unsigned
//! integers, stored as fixed-width big-endian byte arrays.
//!
//! These intentionally cover only what the worker's fixed ABI subset
//! needs (see `worker_abi_codec`) — there is no arithmetic beyond what
//! request ids, timestamps and confidence scores require.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("expected {expected} hex bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    #[error("value {0} does not fit in a u128")]
    Overflow(String),
}

/// A 20-byte EVM account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const fn zero() -> Self {
        Self([0u8; 20])
    }

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = PrimitiveError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.strip_prefix("0x").unwrap_or(raw);
        let bytes =
            hex::decode(trimmed).map_err(|err| PrimitiveError::InvalidHex(err.to_string()))?;
        if bytes.len() != 20 {
            return Err(PrimitiveError::WrongLength {
                expected: 20,
                actual: bytes.len(),
            });
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl TryFrom<String> for Address {
    type Error = PrimitiveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}

/// A 256-bit unsigned integer, stored big-endian.
///
/// Only the operations the worker actually needs are implemented:
/// construction from `u64`/`u128`, checked narrowing, and decimal
/// formatting (request ids and confidence scores end up in log lines
/// and in the on-chain result JSON, both of which want decimal, not hex).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint256(pub [u8; 32]);

impl Uint256 {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn from_u64(value: u64) -> Self {
        Self::from_u128(value as u128)
    }

    pub fn from_u128(value: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[16..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_be_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Narrows to `u128`, failing if any of the high 16 bytes are non-zero.
    pub fn to_u128(&self) -> Result<u128, PrimitiveError> {
        if self.0[..16].iter().any(|b| *b != 0) {
            return Err(PrimitiveError::Overflow(self.to_decimal_string()));
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&self.0[16..]);
        Ok(u128::from_be_bytes(low))
    }

    pub fn to_u64(&self) -> Result<u64, PrimitiveError> {
        let as_u128 = self.to_u128()?;
        u64::try_from(as_u128).map_err(|_| PrimitiveError::Overflow(self.to_decimal_string()))
    }

    /// Renders the value as a base-10 string without pulling in a bigint crate.
    pub fn to_decimal_string(&self) -> String {
        // Repeated divmod-by-10 over the big-endian byte buffer.
        let mut digits_reversed = Vec::new();
        let mut work = self.0;
        loop {
            let mut remainder: u32 = 0;
            let mut all_zero = true;
            for byte in work.iter_mut() {
                let acc = (remainder << 8) | *byte as u32;
                *byte = (acc / 10) as u8;
                remainder = acc % 10;
                if *byte != 0 {
                    all_zero = false;
                }
            }
            digits_reversed.push(char::from_digit(remainder, 10).expect("remainder < 10"));
            if all_zero {
                break;
            }
        }
        digits_reversed.iter().rev().collect()
    }
}

impl fmt::Debug for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint256({})", self.to_decimal_string())
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl From<u64> for Uint256 {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}
