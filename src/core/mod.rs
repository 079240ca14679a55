pub mod checksum;
pub mod config;
pub mod error;
pub mod types;

pub use checksum::CheckSum;
pub use config::CodexConfig;
pub use error::{CodexError, Result};
