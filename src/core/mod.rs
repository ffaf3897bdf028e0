pub mod config;
pub mod error;
pub mod protocol;

pub use config::ScanConfig;
pub use error::{NotifierError, Result};
pub use protocol::{Protocol, Snapshot, UNKNOWN_TITLE};
