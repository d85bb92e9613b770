//! Depth-first evaluation of a [`RuleTable`] over a document.
//!
//! The input is never modified; the output is built node by node into a
//! fresh [`Document`]. Nodes that no rule matches get the default
//! treatment:
//!
//! - element: shallow copy (name and attributes), then rewrite the children
//! - text, comment, processing instruction: copy as-is
//!
//! The default is what carries ordinary prose through: container rules only
//! decide that an element is kept, its text children then fall through to
//! the default copy.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use crate::dom::{Document, NodeData, NodeId};
use crate::rules::{Action, RuleTable};

/// Per-run counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    /// Matches per rule name.
    pub rules: BTreeMap<&'static str, usize>,
    /// Elements copied by the default rule.
    pub default_elements: usize,
    /// Text, comment and PI nodes copied by the default rule.
    pub default_leaves: usize,
    /// Words re-joined across `lb break="no"` before cleaning.
    pub rejoined_words: usize,
    /// `seg` elements produced by sentence segmentation.
    pub segments: usize,
    /// `seg` elements given `orig`/`reg` readings.
    pub readings: usize,
}

impl CleanReport {
    /// Number of times `rule` matched.
    pub fn matches(&self, rule: &str) -> usize {
        self.rules.get(rule).copied().unwrap_or(0)
    }

    fn record(&mut self, rule: &'static str) {
        *self.rules.entry(rule).or_default() += 1;
    }
}

/// Applies a rule table to one document.
pub struct Rewriter<'t> {
    table: &'t RuleTable,
    report: CleanReport,
}

impl<'t> Rewriter<'t> {
    pub fn new(table: &'t RuleTable) -> Self {
        Self {
            table,
            report: CleanReport::default(),
        }
    }

    /// Rewrite `input` into a new document.
    ///
    /// The walk keeps its own work list of (input node, output parent)
    /// pairs, so arbitrarily deep documents are handled.
    pub fn rewrite(mut self, input: &Document) -> (Document, CleanReport) {
        let mut out = Document::new();
        let mut pending = Vec::new();
        push_children(input, NodeId::ROOT, NodeId::ROOT, &mut pending);

        while let Some((id, out_parent)) = pending.pop() {
            if let Some(copy) = self.visit(input, id, &mut out, out_parent) {
                push_children(input, id, copy, &mut pending);
            }
        }
        (out, self.report)
    }

    /// Emit node `id` under `out_parent`.
    ///
    /// Returns the output element the children of `id` are to be rewritten
    /// into, or `None` when they are already handled or dropped.
    fn visit(
        &mut self,
        input: &Document,
        id: NodeId,
        out: &mut Document,
        out_parent: NodeId,
    ) -> Option<NodeId> {
        let Some(rule) = self.table.select(input, id) else {
            return self.apply_default(input, id, out, out_parent);
        };
        let (name, action) = (rule.name, rule.action);
        trace!(rule = name, node = id.0, "rule matched");
        self.report.record(name);

        match action {
            Action::CopyVerbatim => {
                input.deep_copy_into(id, out, out_parent);
                None
            }
            Action::CopyAndRecurse => copy_element(input, id, None, out, out_parent),
            Action::Relabel(local) => copy_element(input, id, Some(local), out, out_parent),
            Action::CopyText => {
                let text = input.text_content(id);
                if !text.is_empty() {
                    out.append_text(out_parent, &text);
                }
                None
            }
            Action::Delete => None,
        }
    }

    fn apply_default(
        &mut self,
        input: &Document,
        id: NodeId,
        out: &mut Document,
        out_parent: NodeId,
    ) -> Option<NodeId> {
        match &input.get(id)?.data {
            NodeData::Element { .. } => {
                self.report.default_elements += 1;
                copy_element(input, id, None, out, out_parent)
            }
            NodeData::Text(text) => {
                self.report.default_leaves += 1;
                out.append_text(out_parent, text);
                None
            }
            NodeData::Comment(text) => {
                self.report.default_leaves += 1;
                let copy = out.create_comment(text.as_str());
                out.append(out_parent, copy);
                None
            }
            NodeData::ProcessingInstruction(content) => {
                self.report.default_leaves += 1;
                let copy = out.create_pi(content.as_str());
                out.append(out_parent, copy);
                None
            }
            NodeData::Document => Some(out_parent),
        }
    }
}

/// Queue the children of `id` so they pop in document order.
fn push_children(
    input: &Document,
    id: NodeId,
    out_parent: NodeId,
    pending: &mut Vec<(NodeId, NodeId)>,
) {
    let children: Vec<_> = input.children(id).collect();
    pending.extend(children.into_iter().rev().map(|child| (child, out_parent)));
}

/// Shallow-copy element `id` (optionally renamed) under `out_parent`.
fn copy_element(
    input: &Document,
    id: NodeId,
    relabel: Option<&str>,
    out: &mut Document,
    out_parent: NodeId,
) -> Option<NodeId> {
    let NodeData::Element { name, attrs } = &input.get(id)?.data else {
        return None;
    };
    let name = match relabel {
        Some(local) => name.with_local(local),
        None => name.clone(),
    };
    let copy = out.create_element(name, attrs.clone());
    out.append(out_parent, copy);
    Some(copy)
}
