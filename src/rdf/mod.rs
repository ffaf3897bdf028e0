//! RDF reader: fetch a document by locator and flatten it into a
//! subject → predicate → objects mapping.
//!
//! Parsing is delegated to `oxrdfio`; this module only reshapes the triple
//! stream into the lookup structure the scanner needs.

use crate::core::{NotifierError, Result};
use log::debug;
use oxrdf::{NamedOrBlankNode, Term as RdfTerm};
use oxrdfio::{RdfFormat, RdfParser};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One RDF object value: a reference (IRI or blank node label) or the
/// lexical form of a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Iri(String),
    Literal(String),
}

impl Term {
    /// Stringified form, the only view the scanner ever needs.
    pub fn as_text(&self) -> &str {
        match self {
            Term::Iri(s) | Term::Literal(s) => s,
        }
    }
}

/// Statements made in an RDF document: subject → predicate → ordered objects.
pub type Statements = HashMap<String, HashMap<String, Vec<Term>>>;

/// First object at `predicate`, stringified and trimmed, or `default` when
/// the predicate is absent or has no objects.
pub fn first_value<'a>(
    predicates: &'a HashMap<String, Vec<Term>>,
    predicate: &str,
    default: &'a str,
) -> &'a str {
    predicates
        .get(predicate)
        .and_then(|objects| objects.first())
        .map(|term| term.as_text().trim())
        .unwrap_or(default)
}

/// Reads the RDF document at `locator` (http(s) URL or filesystem path) and
/// returns its statements.
///
/// # Errors
/// Returns `FetchError` when the source is unreachable, returns a non-success
/// HTTP status, or cannot be parsed as RDF.
pub fn read_rdf(locator: &str) -> Result<Statements> {
    let (bytes, format) = if locator.starts_with("http://") || locator.starts_with("https://") {
        fetch_remote(locator)?
    } else {
        read_local(Path::new(locator))?
    };
    parse_rdf(&bytes, format, locator)
}

fn fetch_remote(url: &str) -> Result<(Vec<u8>, RdfFormat)> {
    debug!("Fetching protocol RDF from {}", url);
    let response = reqwest::blocking::Client::new()
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|e| NotifierError::FetchError(format!("Failed to fetch '{}': {}", url, e)))?;
    let format = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(RdfFormat::from_media_type)
        .unwrap_or(RdfFormat::RdfXml);
    let bytes = response
        .bytes()
        .map_err(|e| NotifierError::FetchError(format!("Failed to read body of '{}': {}", url, e)))?
        .to_vec();
    Ok((bytes, format))
}

fn read_local(path: &Path) -> Result<(Vec<u8>, RdfFormat)> {
    debug!("Reading protocol RDF from {}", path.display());
    let bytes = fs::read(path)
        .map_err(|e| NotifierError::FetchError(format!("Failed to read '{}': {}", path.display(), e)))?;
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(RdfFormat::from_extension)
        .unwrap_or(RdfFormat::RdfXml);
    Ok((bytes, format))
}

/// Parses `bytes` as `format`, resolving relative IRIs against `base` when
/// `base` is itself a valid IRI.
pub fn parse_rdf(bytes: &[u8], format: RdfFormat, base: &str) -> Result<Statements> {
    let parser = match RdfParser::from_format(format).with_base_iri(base) {
        Ok(parser) => parser,
        Err(_) => RdfParser::from_format(format),
    };

    let mut statements: Statements = HashMap::new();
    for quad in parser.for_reader(bytes) {
        let quad = quad.map_err(|e| {
            NotifierError::FetchError(format!("Failed to parse RDF from '{}': {}", base, e))
        })?;
        let subject = match quad.subject {
            NamedOrBlankNode::NamedNode(node) => node.into_string(),
            other => other.to_string(),
        };
        let predicate = quad.predicate.into_string();
        let object = match quad.object {
            RdfTerm::Literal(literal) => Term::Literal(literal.value().to_string()),
            RdfTerm::NamedNode(node) => Term::Iri(node.into_string()),
            other => Term::Iri(other.to_string()),
        };
        statements
            .entry(subject)
            .or_default()
            .entry(predicate)
            .or_default()
            .push(object);
    }
    Ok(statements)
}
