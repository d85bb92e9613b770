//! The TEI element vocabulary the cleaning rules know about.
//!
//! Names are TEI local names; membership also requires the element to be in
//! the TEI namespace or in no namespace (see [`QName::in_tei`]).

use crate::dom::{Document, NodeId, QName};

pub const HEADER: &str = "teiHeader";
pub const PARAGRAPH: &str = "p";
pub const LINE: &str = "l";
pub const SPEECH: &str = "sp";
pub const ANNOTATION_BLOCK: &str = "ab";
pub const HIGHLIGHT: &str = "hi";
pub const TITLE: &str = "title";
pub const NOTE: &str = "note";
pub const IMPRIMATUR: &str = "imprimatur";
pub const LINE_BREAK: &str = "lb";
pub const PAGE_BREAK: &str = "pb";
pub const FIGURE: &str = "figure";
pub const FORME_WORK: &str = "fw";
pub const GAP: &str = "gap";
pub const TEXT: &str = "text";
pub const BODY: &str = "body";
pub const SEGMENT: &str = "seg";
pub const CHOICE: &str = "choice";
pub const ORIGINAL: &str = "orig";
pub const REGULARIZED: &str = "reg";

/// Elements whose wrapper is kept and whose children are rewritten.
///
/// `sp` is a container too, but it is relabeled, so it has its own rule.
pub const CONTAINERS: &[&str] = &[
    "text", "body", "front", "back", "div", "opener", "closer", "head", "list", "item", "lg",
    "ab", "stage", "speaker", "p",
];

/// Elements whose own text children are always kept.
pub const TEXT_PARENTS: &[&str] = &[LINE, HIGHLIGHT, IMPRIMATUR];

/// Vocabulary elements that are kept but whose direct text is not.
pub const SILENT_PARENTS: &[&str] = &[TITLE, NOTE];

/// Ancestors that make a title's text (and break markers) count as running text.
pub const RUNNING_TEXT: &[&str] = &[PARAGRAPH, LINE];

/// Markers and apparatus deleted wherever they appear.
pub const APPARATUS: &[&str] = &[PAGE_BREAK, FIGURE, FORME_WORK, LINE_BREAK, GAP];

/// Whether `name` is one of the TEI elements in `set`.
pub fn name_in(name: &QName, set: &[&str]) -> bool {
    name.in_tei() && set.contains(&name.local.as_str())
}

/// Whether node `id` is an element whose TEI name is in `set`.
pub fn is_one_of(doc: &Document, id: NodeId, set: &[&str]) -> bool {
    doc.name(id).is_some_and(|name| name_in(name, set))
}

/// Whether any strict ancestor of `id` is a TEI element in `set`.
pub fn has_ancestor(doc: &Document, id: NodeId, set: &[&str]) -> bool {
    doc.ancestors(id).any(|a| is_one_of(doc, a, set))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse::{ParseOptions, parse_str};

    #[test]
    fn test_has_ancestor_walks_whole_chain() {
        let doc = parse_str(
            "<body><p><hi><title>T</title></hi></p></body>",
            &ParseOptions::default(),
        )
        .unwrap();
        let title = doc.find_all("title")[0];
        assert!(has_ancestor(&doc, title, RUNNING_TEXT));
        assert!(!has_ancestor(&doc, title, &[LINE]));

        let p = doc.find_all("p")[0];
        // Strict ancestors only
        assert!(!has_ancestor(&doc, p, &[PARAGRAPH]));
    }

    #[test]
    fn test_foreign_namespace_not_in_vocabulary() {
        let doc = parse_str(
            "<root xmlns:h=\"http://www.w3.org/1999/xhtml\"><h:p/><p/></root>",
            &ParseOptions::default(),
        )
        .unwrap();
        let root = doc.root_element().unwrap();
        let kids: Vec<_> = doc.children(root).collect();
        assert!(!is_one_of(&doc, kids[0], CONTAINERS));
        assert!(is_one_of(&doc, kids[1], CONTAINERS));
    }
}
