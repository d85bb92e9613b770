//! Pattern rules and the ordered table that holds them.
//!
//! A [`RuleTable`] is a plain list of [`Rule`]s. For each node the first rule
//! whose [`Pattern`] matches decides the [`Action`]; nodes no rule matches get
//! the default treatment in [`crate::rewrite`]. There is no implicit
//! specificity: table order is the priority.

pub mod tei;
pub mod vocab;

use crate::dom::{Document, NodeId};

use vocab::{has_ancestor, is_one_of};

/// What a rule matches.
///
/// Name sets are TEI local names; see [`vocab::name_in`] for the namespace
/// condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// An element with one of these names.
    Element { names: &'static [&'static str] },
    /// An element with one of these names, below (at any depth) an element
    /// named in `ancestors`.
    ElementWithin {
        names: &'static [&'static str],
        ancestors: &'static [&'static str],
    },
    /// A text node whose parent has one of these names.
    Text { parents: &'static [&'static str] },
    /// A text node whose parent is in `parents` and which has an ancestor
    /// named in `ancestors`.
    TextWithin {
        parents: &'static [&'static str],
        ancestors: &'static [&'static str],
    },
    /// A text node whose parent is in `parents` and whose grandparent is in
    /// `grandparents`.
    TextUnder {
        parents: &'static [&'static str],
        grandparents: &'static [&'static str],
    },
}

impl Pattern {
    /// Test the pattern against node `id`.
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        match *self {
            Pattern::Element { names } => is_one_of(doc, id, names),
            Pattern::ElementWithin { names, ancestors } => {
                is_one_of(doc, id, names) && has_ancestor(doc, id, ancestors)
            }
            Pattern::Text { parents } => text_parent(doc, id, parents).is_some(),
            Pattern::TextWithin { parents, ancestors } => {
                text_parent(doc, id, parents).is_some() && has_ancestor(doc, id, ancestors)
            }
            Pattern::TextUnder {
                parents,
                grandparents,
            } => text_parent(doc, id, parents)
                .and_then(|parent| doc.parent(parent))
                .is_some_and(|gp| is_one_of(doc, gp, grandparents)),
        }
    }
}

/// The parent of text node `id`, if it is one of `parents`.
fn text_parent(doc: &Document, id: NodeId, parents: &[&str]) -> Option<NodeId> {
    doc.text(id)?;
    doc.parent(id).filter(|&p| is_one_of(doc, p, parents))
}

/// What happens to a matched node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit a shallow copy and rewrite the children into it.
    CopyAndRecurse,
    /// Copy the node and its whole subtree without looking inside.
    CopyVerbatim,
    /// Emit the node's text as-is.
    CopyText,
    /// Emit nothing for the node or its subtree.
    Delete,
    /// Emit an element with this local name (same namespace and attributes)
    /// and rewrite the children into it.
    Relabel(&'static str),
}

/// A named (pattern, action) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub pattern: Pattern,
    pub action: Action,
}

impl Rule {
    pub const fn new(name: &'static str, pattern: Pattern, action: Action) -> Self {
        Self {
            name,
            pattern,
            action,
        }
    }
}

/// An ordered list of rules; first match wins.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The fixed TEI cleaning policy.
    pub fn tei() -> Self {
        Self::new(tei::RULES.to_vec())
    }

    /// The first rule matching node `id`, if any.
    pub fn select(&self, doc: &Document, id: NodeId) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.pattern.matches(doc, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse::{ParseOptions, parse_str};

    fn doc(xml: &str) -> Document {
        parse_str(xml, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn test_text_under_requires_grandparent() {
        let d = doc("<div><title><hi>a</hi></title><hi>b</hi></div>");
        let pattern = Pattern::TextUnder {
            parents: &["hi"],
            grandparents: &["title"],
        };
        let his = d.find_all("hi");
        let a = d.children(his[0]).next().unwrap();
        let b = d.children(his[1]).next().unwrap();
        assert!(pattern.matches(&d, a));
        assert!(!pattern.matches(&d, b));
        // Elements never match text patterns
        assert!(!pattern.matches(&d, his[0]));
    }

    #[test]
    fn test_text_within_checks_ancestors() {
        let d = doc("<div><p><title>in</title></p><head><title>out</title></head></div>");
        let pattern = Pattern::TextWithin {
            parents: &["title"],
            ancestors: &["p", "l"],
        };
        let titles = d.find_all("title");
        let inside = d.children(titles[0]).next().unwrap();
        let outside = d.children(titles[1]).next().unwrap();
        assert!(pattern.matches(&d, inside));
        assert!(!pattern.matches(&d, outside));
    }

    #[test]
    fn test_first_match_wins() {
        let table = RuleTable::new(vec![
            Rule::new("first", Pattern::Element { names: &["p"] }, Action::Delete),
            Rule::new(
                "second",
                Pattern::Element { names: &["p"] },
                Action::CopyAndRecurse,
            ),
        ]);
        let d = doc("<p>x</p>");
        let p = d.root_element().unwrap();
        assert_eq!(table.select(&d, p).map(|r| r.name), Some("first"));
    }

    #[test]
    fn test_no_match_returns_none() {
        let table = RuleTable::tei();
        let d = doc("<unknown>x</unknown>");
        let el = d.root_element().unwrap();
        assert!(table.select(&d, el).is_none());
        let text = d.children(el).next().unwrap();
        assert!(table.select(&d, text).is_none());
    }
}
