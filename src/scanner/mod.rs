//! Diff engine: compares freshly fetched protocol statements against the
//! journal and rebuilds the snapshot.

use crate::core::{Protocol, Result, ScanConfig, Snapshot, UNKNOWN_TITLE};
use crate::rdf::{Statements, Term, first_value, read_rdf};
use crate::storage::JournalStore;
use log::{debug, info};
use std::collections::BTreeSet;

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const PROTOCOL_TYPE: &str = "http://edrn.nci.nih.gov/rdf/types.rdf#Protocol";
pub const BIOMARKER_NAME_PREDICATE: &str = "http://edrn.nci.nih.gov/rdf/schema.rdf#bmName";
pub const TITLE_PREDICATE: &str = "http://purl.org/dc/terms/title";

/// Outcome of one scan: the three difference buckets plus the snapshot to
/// persist.
///
/// An identifier appears in at most one of `new`, `changed`, and `dropped`.
/// `new` and `changed` keep statement-iteration order, which is not stable
/// across runs; `dropped` is a set.
#[derive(Debug)]
pub struct ScanReport {
    pub first_time: bool,
    pub new: Vec<Protocol>,
    pub changed: Vec<(Protocol, Protocol)>,
    pub dropped: BTreeSet<String>,
    pub snapshot: Snapshot,
}

impl ScanReport {
    pub fn has_changes(&self) -> bool {
        !self.new.is_empty() || !self.changed.is_empty() || !self.dropped.is_empty()
    }

    /// No mail on the first-ever scan or when nothing changed.
    pub fn should_notify(&self) -> bool {
        !self.first_time && self.has_changes()
    }
}

/// Diffs `statements` against the `prior` snapshot.
///
/// Only subjects whose first `rdf:type` object is the protocol type marker
/// are considered; everything else in the document is ignored. A document
/// with no protocol-typed subjects drops every prior entry, which is valid
/// behavior rather than an error.
pub fn scan(prior: &Snapshot, statements: &Statements) -> ScanReport {
    let first_time = prior.is_empty();
    let mut snapshot = prior.clone();
    let mut new = Vec::new();
    let mut changed = Vec::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for (subject, predicates) in statements {
        let type_uri = predicates.get(RDF_TYPE).and_then(|objects| objects.first());
        if type_uri.map(Term::as_text) != Some(PROTOCOL_TYPE) {
            continue;
        }

        // The biomarker field looks comma-separated, but the upstream data is
        // too unreliable to split; treat it as opaque text.
        let biomarkers = first_value(predicates, BIOMARKER_NAME_PREDICATE, "").to_string();
        let title = first_value(predicates, TITLE_PREDICATE, UNKNOWN_TITLE).to_string();

        seen.insert(subject.as_str());
        match snapshot.get(subject) {
            None => {
                debug!("New protocol {}", subject);
                let record = Protocol::new(subject.clone(), title, biomarkers);
                new.push(record.clone());
                snapshot.insert(subject.clone(), record);
            }
            Some(existing) if existing.biomarkers != biomarkers => {
                debug!(
                    "Biomarkers changed in {}: was \u{ab}{}\u{bb}, now \u{ab}{}\u{bb}",
                    subject, existing.biomarkers, biomarkers
                );
                let replacement = Protocol::new(subject.clone(), title, biomarkers);
                changed.push((existing.clone(), replacement.clone()));
                snapshot.insert(subject.clone(), replacement);
            }
            Some(existing) => {
                // Title changes alone are refreshed silently; only biomarker
                // changes are worth a notification.
                if existing.title != title {
                    let refreshed =
                        Protocol::new(subject.clone(), title, existing.biomarkers.clone());
                    snapshot.insert(subject.clone(), refreshed);
                }
            }
        }
    }

    let dropped: BTreeSet<String> = snapshot
        .keys()
        .filter(|identifier| !seen.contains(identifier.as_str()))
        .cloned()
        .collect();
    for identifier in &dropped {
        debug!("Erasing no longer relevant protocol {}", identifier);
        snapshot.remove(identifier);
    }

    ScanReport {
        first_time,
        new,
        changed,
        dropped,
        snapshot,
    }
}

/// One full scan cycle: load journal, fetch RDF, diff, persist.
///
/// The journal is saved before any notification is attempted, so a mail
/// failure never corrupts persisted state. A fetch failure leaves the
/// journal untouched.
pub fn run(config: &ScanConfig) -> Result<ScanReport> {
    let store = JournalStore::new(&config.journal);
    let prior = store.load()?;
    let statements = read_rdf(&config.protocols_rdf)?;
    let report = scan(&prior, &statements);
    store.save(&report.snapshot)?;
    info!(
        "Scan complete: {} new, {} changed, {} dropped ({} protocols tracked)",
        report.new.len(),
        report.changed.len(),
        report.dropped.len(),
        report.snapshot.len()
    );
    Ok(report)
}
