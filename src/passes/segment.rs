//! Sentence segmentation of cleaned paragraphs.
//!
//! Every `p` inside `text` and every `ab` inside `body` has its content
//! replaced by one `seg` per sentence:
//!
//! ```xml
//! <p>Hello there. How are you?</p>
//! ```
//!
//! becomes
//!
//! ```xml
//! <p><seg n="1" xml:id="s1">Hello there.</seg><seg n="2" xml:id="s2">How are you?</seg></p>
//! ```
//!
//! Inline markup (`hi`, `title`, unknown elements) is flattened into the
//! sentence text. A target that still holds block structure (another
//! container, a verse line) is left alone so the structure survives; its
//! inner `p` elements are segmented on their own.

use tracing::debug;

use crate::dom::{Attribute, Document, NodeId};
use crate::rules::vocab::{
    ANNOTATION_BLOCK, BODY, CONTAINERS, LINE, PARAGRAPH, SEGMENT, TEXT, has_ancestor, is_one_of,
};

/// Characters that close a sentence.
const TERMINATORS: &[char] = &['.', '?', ':', ';', '!'];

/// Split `text` into trimmed, non-empty sentences.
///
/// A sentence is a run of non-terminator characters followed by at most one
/// terminator. Terminators that do not follow such a run (the second `!` in
/// `"Stop!!"`) are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    let mut emit = |current: &mut String| {
        let trimmed = current.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }
        current.clear();
    };

    for c in text.chars() {
        if TERMINATORS.contains(&c) {
            if !current.is_empty() {
                current.push(c);
                emit(&mut current);
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        emit(&mut current);
    }

    sentences
}

/// Segment every eligible `p` and `ab` in `doc`.
///
/// Returns the number of `seg` elements created.
pub fn segment_sentences(doc: &mut Document) -> usize {
    let targets: Vec<NodeId> = doc
        .descendants(NodeId::ROOT)
        .filter(|&id| is_target(doc, id))
        .collect();

    let mut total = 0;
    for id in targets {
        if holds_blocks(doc, id) {
            debug!(node = id.0, "not segmenting element with block content");
            continue;
        }
        total += segment_element(doc, id);
    }
    total
}

fn is_target(doc: &Document, id: NodeId) -> bool {
    (is_one_of(doc, id, &[PARAGRAPH]) && has_ancestor(doc, id, &[TEXT]))
        || (is_one_of(doc, id, &[ANNOTATION_BLOCK]) && has_ancestor(doc, id, &[BODY]))
}

fn holds_blocks(doc: &Document, id: NodeId) -> bool {
    doc.descendants(id)
        .any(|d| is_one_of(doc, d, CONTAINERS) || is_one_of(doc, d, &[LINE]))
}

fn segment_element(doc: &mut Document, id: NodeId) -> usize {
    let Some(seg_name) = doc.name(id).map(|name| name.with_local(SEGMENT)) else {
        return 0;
    };
    let sentences = split_sentences(&doc.text_content(id));

    doc.clear_children(id);
    for (i, sentence) in sentences.iter().enumerate() {
        let n = (i + 1).to_string();
        let seg = doc.create_element(
            seg_name.clone(),
            vec![
                Attribute::new("n", n.as_str()),
                Attribute::new("xml:id", format!("s{n}")),
            ],
        );
        doc.append(id, seg);
        doc.append_text(seg, sentence);
    }
    sentences.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse::{ParseOptions, parse_str};
    use crate::dom::serialize::node_to_string;

    #[test]
    fn test_split_on_each_terminator() {
        assert_eq!(
            split_sentences("One. Two? Three: four; five! six"),
            vec!["One.", "Two?", "Three:", "four;", "five!", "six"]
        );
    }

    #[test]
    fn test_split_drops_stray_terminators_and_blanks() {
        assert_eq!(split_sentences("Stop!! Now..."), vec!["Stop!", "Now."]);
        assert_eq!(split_sentences("  \n "), Vec::<String>::new());
        assert_eq!(split_sentences(""), Vec::<String>::new());
    }

    #[test]
    fn test_split_keeps_lone_space_run_with_terminator() {
        // A whitespace run still opens a sentence, so its terminator survives.
        assert_eq!(split_sentences("a. . b"), vec!["a.", ".", "b"]);
    }

    #[test]
    fn test_segments_paragraph_in_text() {
        let mut doc = parse_str(
            "<text><body><p>Hello there. How are <hi>you</hi>?</p></body></text>",
            &ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(segment_sentences(&mut doc), 2);
        let p = doc.find_all("p")[0];
        assert_eq!(
            node_to_string(&doc, p),
            "<p><seg n=\"1\" xml:id=\"s1\">Hello there.</seg>\
             <seg n=\"2\" xml:id=\"s2\">How are you?</seg></p>"
        );
    }

    #[test]
    fn test_paragraph_outside_text_untouched() {
        let mut doc = parse_str("<front><p>A. B.</p></front>", &ParseOptions::default()).unwrap();
        assert_eq!(segment_sentences(&mut doc), 0);
        assert_eq!(doc.find_all("seg").len(), 0);
    }

    #[test]
    fn test_ab_with_paragraph_keeps_structure() {
        let mut doc = parse_str(
            "<text><body><ab><speaker>A</speaker><p>Hi. Bye.</p></ab></body></text>",
            &ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(segment_sentences(&mut doc), 2);
        let ab = doc.find_all("ab")[0];
        assert_eq!(
            node_to_string(&doc, ab),
            "<ab><speaker>A</speaker><p><seg n=\"1\" xml:id=\"s1\">Hi.</seg>\
             <seg n=\"2\" xml:id=\"s2\">Bye.</seg></p></ab>"
        );
    }

    #[test]
    fn test_plain_ab_in_body_segmented() {
        let mut doc = parse_str("<body><ab>Oh! Ah.</ab></body>", &ParseOptions::default()).unwrap();
        assert_eq!(segment_sentences(&mut doc), 2);
        assert_eq!(doc.find_all("seg").len(), 2);
    }
}
