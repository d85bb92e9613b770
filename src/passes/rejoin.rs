//! Re-form words that a line break splits in two.
//!
//! ```xml
//! <l>I hope this script is use
//! <lb break="no" rend="-"/>ful</l>
//! ```
//!
//! becomes `<l>I hope this script is useful</l>`: the marker goes away and
//! the text before it loses its trailing whitespace.

use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::rules::vocab::{HEADER, LINE_BREAK, has_ancestor};

/// Remove every `lb break="no"` and glue the word back together.
///
/// Breaks inside `teiHeader` are left alone; the header is copied verbatim.
/// Returns the number of breaks removed.
pub fn rejoin_broken_words(doc: &mut Document) -> usize {
    let breaks: Vec<NodeId> = doc
        .find_all(LINE_BREAK)
        .into_iter()
        .filter(|&id| {
            doc.attr(id, "break") == Some("no") && !has_ancestor(doc, id, &[HEADER])
        })
        .collect();

    for &lb in &breaks {
        rejoin_at(doc, lb);
    }

    if !breaks.is_empty() {
        debug!(count = breaks.len(), "rejoined words across line breaks");
    }
    breaks.len()
}

fn rejoin_at(doc: &mut Document, lb: NodeId) {
    let (prev, next) = match doc.get(lb) {
        Some(node) => (node.prev_sibling, node.next_sibling),
        None => return,
    };

    let prev_text = prev.filter(|&id| doc.text(id).is_some());
    if let Some(text) = prev_text.and_then(|id| doc.text_mut(id)) {
        let trimmed = text.trim_end().len();
        text.truncate(trimmed);
    }

    doc.detach(lb);

    // The two halves are now adjacent text siblings; merge them.
    if let (Some(prev_id), Some(next_id)) = (prev_text, next)
        && let Some(tail) = doc.text(next_id).map(str::to_string)
    {
        if let Some(text) = doc.text_mut(prev_id) {
            text.push_str(&tail);
        }
        doc.detach(next_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse::{ParseOptions, parse_str};
    use crate::dom::serialize::node_to_string;

    fn doc(xml: &str) -> Document {
        parse_str(xml, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn test_rejoins_split_word() {
        let mut d = doc("<l>this script is use\n<lb break=\"no\" rend=\"-\"/>ful</l>");
        assert_eq!(rejoin_broken_words(&mut d), 1);
        let l = d.root_element().unwrap();
        assert_eq!(d.children(l).count(), 1);
        assert_eq!(d.text_content(l), "this script is useful");
    }

    #[test]
    fn test_ordinary_breaks_untouched() {
        let mut d = doc("<p>one <lb/>two</p>");
        assert_eq!(rejoin_broken_words(&mut d), 0);
        assert_eq!(
            node_to_string(&d, d.root_element().unwrap()),
            "<p>one <lb/>two</p>"
        );
    }

    #[test]
    fn test_break_after_element() {
        let mut d = doc("<p><hi>big</hi> <lb break=\"no\"/>ger</p>");
        // The whitespace-only text between hi and lb is stripped at parse.
        rejoin_broken_words(&mut d);
        assert_eq!(
            node_to_string(&d, d.root_element().unwrap()),
            "<p><hi>big</hi>ger</p>"
        );
    }

    #[test]
    fn test_header_breaks_untouched() {
        let mut d = doc("<TEI><teiHeader><p>a <lb break=\"no\"/>b</p></teiHeader></TEI>");
        assert_eq!(rejoin_broken_words(&mut d), 0);
        assert_eq!(d.find_all("lb").len(), 1);
    }

    #[test]
    fn test_break_first_in_parent() {
        let mut d = doc("<p><lb break=\"no\"/>tail</p>");
        rejoin_broken_words(&mut d);
        assert_eq!(node_to_string(&d, d.root_element().unwrap()), "<p>tail</p>");
    }
}
