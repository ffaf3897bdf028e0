use std::path::PathBuf;

pub const DEFAULT_PROTOCOLS_RDF: &str =
    "https://edrn.jpl.nasa.gov/cancerdataexpo/rdf-data/protocols/@@rdf";
pub const DEFAULT_RECIPIENTS: &str = "sean.kelly@jpl.nasa.gov,mryancolbert@gmail.com";
pub const DEFAULT_MAIL_HOST: &str = "smtp.jpl.nasa.gov";

const JOURNAL_FILE_NAME: &str = ".biomarker-journal";

/// Everything one scan needs to know: where the journal lives, where the
/// protocol RDF comes from, whom to notify, and through which relay.
///
/// The CLI layer builds this from flags and defaults; the library never
/// consults global state.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub journal: PathBuf,
    pub protocols_rdf: String,
    pub recipients: String,
    pub mail_host: String,
}

impl ScanConfig {
    /// Default journal location: a dotfile in the user's home directory,
    /// falling back to the current directory when no home is resolvable.
    pub fn default_journal_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(JOURNAL_FILE_NAME)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            journal: Self::default_journal_path(),
            protocols_rdf: DEFAULT_PROTOCOLS_RDF.to_string(),
            recipients: DEFAULT_RECIPIENTS.to_string(),
            mail_host: DEFAULT_MAIL_HOST.to_string(),
        }
    }
}
