//! A minimal ABI encode/decode layer for the fixed set of contract
//! function signatures this worker consumes. This is deliberately not
//! a general-purpose EVM ABI library: the supported type set is a
//! closed, exhaustively-matched enum (`AbiValue`), and the supported
//! signatures are the five named in `signatures`.
//!
//! A real EVM ABI crate may replace this module verbatim in an
//! ecosystem that has one; this worker rolls its own because the
//! host-runtime socket protocol speaks raw calldata bytes, not typed
//! contract bindings.

pub mod decode;
pub mod encode;
pub mod errors;
pub mod selector;
pub mod signatures;
pub mod value;

pub use decode::{decode_return, DecodedReturn};
pub use encode::{encode_args, encode_call};
pub use errors::{AbiDecodeError, AbiEncodeError};
pub use selector::selector;
pub use value::{AbiType, AbiValue};
