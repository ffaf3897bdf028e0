use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Sentinel title used when the source data carries no title literal.
pub const UNKNOWN_TITLE: &str = "«UNKNOWN»";

/// One research protocol as of a single scan.
///
/// Records are immutable values: when a tracked field changes between scans,
/// a replacement record supersedes the old one in the snapshot. The
/// identifier uniquely determines a record within a snapshot; identity,
/// hashing, and ordering are defined by the identifier alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Protocol {
    pub identifier: String,
    pub title: String,
    pub biomarkers: String,
}

impl Protocol {
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        biomarkers: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            biomarkers: biomarkers.into(),
        }
    }
}

impl PartialEq for Protocol {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Protocol {}

impl Hash for Protocol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl PartialOrd for Protocol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Protocol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identifier.cmp(&other.identifier)
    }
}

/// World state as of the last successful scan: identifier → record.
pub type Snapshot = BTreeMap<String, Protocol>;

#[cfg(test)]
mod tests {
    use super::Protocol;

    #[test]
    fn identity_ignores_title_and_biomarkers() {
        let a = Protocol::new("urn:p:1", "Study A", "BRCA1");
        let b = Protocol::new("urn:p:1", "Renamed", "BRCA1, BRCA2");
        let c = Protocol::new("urn:p:2", "Study A", "BRCA1");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn ordering_is_lexicographic_on_identifier() {
        let mut records = vec![
            Protocol::new("urn:p:2", "B", ""),
            Protocol::new("urn:p:10", "A", ""),
            Protocol::new("urn:p:1", "C", ""),
        ];
        records.sort();
        let ids: Vec<&str> = records.iter().map(|p| p.identifier.as_str()).collect();
        assert_eq!(ids, vec!["urn:p:1", "urn:p:10", "urn:p:2"]);
    }
}
