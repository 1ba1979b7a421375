//! Library root for the confidential SNP similarity worker binary:
//! configuration (C6) and the request processor (C5).

pub mod config;
pub mod engine;

pub mod prelude {
    pub use crate::config::{RawConfig, WorkerConfig};
    pub use crate::engine::RequestProcessor;
}

pub use config::{ConfigError, RawConfig, WorkerConfig};
pub use engine::RequestProcessor;
