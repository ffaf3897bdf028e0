// ============================================================================
// Biomarker Notifier Library
// ============================================================================

pub mod core;
pub mod notify;
pub mod rdf;
pub mod scanner;
pub mod storage;

// Re-export main types for convenience
pub use crate::core::{NotifierError, Protocol, Result, ScanConfig, Snapshot, UNKNOWN_TITLE};
pub use crate::core::config::{DEFAULT_MAIL_HOST, DEFAULT_PROTOCOLS_RDF, DEFAULT_RECIPIENTS};
pub use crate::notify::{compose, notify};
pub use crate::rdf::{Statements, Term, first_value, read_rdf};
pub use crate::scanner::{ScanReport, run, scan};
pub use crate::storage::JournalStore;
