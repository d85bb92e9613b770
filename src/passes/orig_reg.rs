//! Original/regularized pairs for segmented sentences.
//!
//! Each `seg` gets its text wrapped as
//!
//! ```xml
//! <seg n="1" xml:id="s1"><choice><orig>Hello.</orig><reg>Hello.</reg></choice></seg>
//! ```
//!
//! Both readings start out as the same cleaned text: line breaks become
//! spaces and leading quotes, dashes, brackets and whitespace are dropped.
//! Filling `reg` with a modernized spelling is left to downstream tools.

use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::rules::vocab::{CHOICE, HEADER, ORIGINAL, REGULARIZED, SEGMENT, has_ancestor, is_one_of};

/// Characters stripped from the start of a reading.
const LEADING_NOISE: &[char] = &['-', '(', ')', '\'', '"'];

/// Tidy one sentence for use as a reading.
pub fn clean_reading(text: &str) -> String {
    text.replace('\n', " ")
        .trim_start_matches(|c: char| c.is_whitespace() || LEADING_NOISE.contains(&c))
        .to_string()
}

/// Wrap the text of every `seg` outside `teiHeader` in `choice/orig/reg`.
///
/// Returns the number of `seg` elements rewritten.
pub fn add_orig_reg(doc: &mut Document) -> usize {
    let segs: Vec<NodeId> = doc
        .find_all(SEGMENT)
        .into_iter()
        .filter(|&id| !has_ancestor(doc, id, &[HEADER]) && !holds_choice(doc, id))
        .collect();

    for &seg in &segs {
        let Some(name) = doc.name(seg).cloned() else {
            continue;
        };
        let reading = clean_reading(&doc.text_content(seg));

        doc.clear_children(seg);
        let choice = doc.create_element(name.with_local(CHOICE), vec![]);
        doc.append(seg, choice);
        for local in [ORIGINAL, REGULARIZED] {
            let el = doc.create_element(name.with_local(local), vec![]);
            doc.append(choice, el);
            if !reading.is_empty() {
                doc.append_text(el, &reading);
            }
        }
    }

    if !segs.is_empty() {
        debug!(count = segs.len(), "added orig/reg readings");
    }
    segs.len()
}

fn holds_choice(doc: &Document, id: NodeId) -> bool {
    doc.children(id).any(|child| is_one_of(doc, child, &[CHOICE]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse::{ParseOptions, parse_str};
    use crate::dom::serialize::node_to_string;

    #[test]
    fn test_clean_reading() {
        assert_eq!(clean_reading("- \"Qu'il\nparte.\""), "Qu'il parte.\"");
        assert_eq!(clean_reading("(a) b"), "a) b");
        assert_eq!(clean_reading("plain"), "plain");
        assert_eq!(clean_reading(" -- "), "");
    }

    #[test]
    fn test_seg_wrapped_in_choice() {
        let mut doc = parse_str(
            "<p><seg n=\"1\" xml:id=\"s1\">- Va,\ncours.</seg></p>",
            &ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(add_orig_reg(&mut doc), 1);
        assert_eq!(
            node_to_string(&doc, doc.root_element().unwrap()),
            "<p><seg n=\"1\" xml:id=\"s1\"><choice><orig>Va, cours.</orig>\
             <reg>Va, cours.</reg></choice></seg></p>"
        );
    }

    #[test]
    fn test_keeps_namespace_prefix() {
        let mut doc = parse_str(
            "<tei:p xmlns:tei=\"http://www.tei-c.org/ns/1.0\"><tei:seg>x</tei:seg></tei:p>",
            &ParseOptions::default(),
        )
        .unwrap();
        add_orig_reg(&mut doc);
        let orig = doc.find_all("orig")[0];
        assert_eq!(doc.name(orig).unwrap().qualified(), "tei:orig");
    }

    #[test]
    fn test_header_and_existing_choices_untouched() {
        let mut doc = parse_str(
            "<TEI><teiHeader><seg>h</seg></teiHeader>\
             <text><seg><choice><orig>a</orig><reg>b</reg></choice></seg></text></TEI>",
            &ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(add_orig_reg(&mut doc), 0);
        assert_eq!(doc.find_all("choice").len(), 1);
    }
}
