//! Error types for teiclean operations.

use thiserror::Error;

/// Errors that can occur while reading or writing a document.
///
/// The cleaning rules themselves never fail; every variant here comes from
/// getting a document into or out of a [`Document`](crate::Document).
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML: {0}")]
    Malformed(String),

    #[error("Unbound namespace prefix: {0}")]
    UnboundPrefix(String),

    #[error("Document has no root element")]
    EmptyDocument,
}

pub type Result<T> = std::result::Result<T, Error>;
