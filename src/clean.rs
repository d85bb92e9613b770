//! The cleaning pipeline: optional rejoin, rule table, optional segmentation.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::dom::parse::{ParseOptions, parse_bytes, parse_str};
use crate::dom::serialize::{SerializeOptions, to_string};
use crate::dom::Document;
use crate::error::Result;
use crate::passes::{add_orig_reg, rejoin_broken_words, segment_sentences};
use crate::rewrite::{CleanReport, Rewriter};
use crate::rules::RuleTable;

/// Which optional passes run around the rule table.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Remove `lb break="no"` and re-join the split word before cleaning.
    pub rejoin_words: bool,
    /// Split cleaned paragraphs into `seg` sentences.
    pub segment: bool,
    /// Wrap each `seg`'s text in `choice/orig/reg`.
    pub orig_reg: bool,
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rejoin_words(mut self, rejoin: bool) -> Self {
        self.rejoin_words = rejoin;
        self
    }

    pub fn with_segmentation(mut self, segment: bool) -> Self {
        self.segment = segment;
        self
    }

    pub fn with_orig_reg(mut self, orig_reg: bool) -> Self {
        self.orig_reg = orig_reg;
        self
    }
}

/// A cleaned document and what happened to it.
#[derive(Debug, Clone)]
pub struct Cleaned {
    pub document: Document,
    pub report: CleanReport,
}

impl Cleaned {
    /// Serialize the cleaned document.
    pub fn to_xml(&self, options: &SerializeOptions) -> String {
        to_string(&self.document, options)
    }

    /// Write the cleaned document to `path`.
    pub fn write(&self, path: impl AsRef<Path>, options: &SerializeOptions) -> Result<()> {
        fs::write(path, self.to_xml(options))?;
        Ok(())
    }
}

/// Clean a parsed document with the TEI rule table.
pub fn clean(input: &Document, options: &CleanOptions) -> Cleaned {
    let table = RuleTable::tei();

    let mut rejoined = 0;
    let (mut document, mut report) = if options.rejoin_words {
        let mut prepared = input.clone();
        rejoined = rejoin_broken_words(&mut prepared);
        Rewriter::new(&table).rewrite(&prepared)
    } else {
        Rewriter::new(&table).rewrite(input)
    };
    report.rejoined_words = rejoined;

    if options.segment {
        report.segments = segment_sentences(&mut document);
    }
    if options.orig_reg {
        report.readings = add_orig_reg(&mut document);
    }

    debug!(
        rules = ?report.rules,
        default_elements = report.default_elements,
        segments = report.segments,
        "cleaned document"
    );
    Cleaned { document, report }
}

/// Parse, clean and serialize a document held in a string.
pub fn clean_str(xml: &str, options: &CleanOptions) -> Result<String> {
    let input = parse_str(xml, &ParseOptions::default())?;
    Ok(clean(&input, options).to_xml(&SerializeOptions::default()))
}

/// Read and clean the document at `path`.
pub fn clean_file(path: impl AsRef<Path>, options: &CleanOptions) -> Result<Cleaned> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read document");
    let input = parse_bytes(&bytes, &ParseOptions::default())?;
    Ok(clean(&input, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(xml: &str, options: &CleanOptions) -> String {
        let input = parse_str(xml, &ParseOptions::default()).unwrap();
        clean(&input, options).to_xml(&SerializeOptions::compact())
    }

    #[test]
    fn test_clean_without_passes() {
        assert_eq!(
            compact("<body><div><p>Hello <lb/>world</p><pb/></div></body>", &CleanOptions::new()),
            "<body><div><p>Hello world</p></div></body>"
        );
    }

    #[test]
    fn test_rejoin_changes_split_words_only_when_enabled() {
        let xml = "<body><p>use\n<lb break=\"no\"/>ful</p></body>";
        assert_eq!(compact(xml, &CleanOptions::new()), "<body><p>use\nful</p></body>");
        assert_eq!(
            compact(xml, &CleanOptions::new().with_rejoin_words(true)),
            "<body><p>useful</p></body>"
        );
    }

    #[test]
    fn test_rejoin_does_not_touch_input() {
        let input = parse_str("<p>a <lb break=\"no\"/>b</p>", &ParseOptions::default()).unwrap();
        let cleaned = clean(&input, &CleanOptions::new().with_rejoin_words(true));
        assert_eq!(cleaned.report.rejoined_words, 1);
        assert_eq!(input.find_all("lb").len(), 1);
    }

    #[test]
    fn test_segmentation_after_cleaning() {
        let input = parse_str(
            "<text><body><p>One. <pb/>Two.</p></body></text>",
            &ParseOptions::default(),
        )
        .unwrap();
        let cleaned = clean(&input, &CleanOptions::new().with_segmentation(true));
        assert_eq!(cleaned.report.segments, 2);
        assert_eq!(
            cleaned.to_xml(&SerializeOptions::compact()),
            "<text><body><p><seg n=\"1\" xml:id=\"s1\">One.</seg>\
             <seg n=\"2\" xml:id=\"s2\">Two.</seg></p></body></text>"
        );
    }

    #[test]
    fn test_orig_reg_after_segmentation() {
        let input = parse_str(
            "<text><body><ab>- Oui.</ab></body></text>",
            &ParseOptions::default(),
        )
        .unwrap();
        let options = CleanOptions::new()
            .with_segmentation(true)
            .with_orig_reg(true);
        let cleaned = clean(&input, &options);
        assert_eq!(cleaned.report.readings, 1);
        assert_eq!(
            cleaned.to_xml(&SerializeOptions::compact()),
            "<text><body><ab><seg n=\"1\" xml:id=\"s1\"><choice>\
             <orig>Oui.</orig><reg>Oui.</reg></choice></seg></ab></body></text>"
        );
    }

    #[test]
    fn test_clean_str_emits_declaration() {
        let out = clean_str("<body><p>x</p></body>", &CleanOptions::new()).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<body>"));
    }

    #[test]
    fn test_clean_str_propagates_parse_errors() {
        assert!(clean_str("<body><p>x</body>", &CleanOptions::new()).is_err());
    }
}
