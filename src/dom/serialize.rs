//! XML writer: turns a [`Document`] back into UTF-8 markup.

use std::io::{self, Write};

use quick_xml::escape::{escape, partial_escape};

use super::{Document, NodeData, NodeId};

/// Options controlling output layout.
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` first.
    pub declaration: bool,
    /// Spaces per nesting level, or `None` for compact output.
    pub indent: Option<usize>,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            declaration: true,
            indent: Some(2),
        }
    }
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// No declaration, no indentation. Handy for comparisons.
    pub fn compact() -> Self {
        Self {
            declaration: false,
            indent: None,
        }
    }

    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }
}

/// Serialize the whole document to a string.
pub fn to_string(doc: &Document, options: &SerializeOptions) -> String {
    let mut out = String::new();
    if options.declaration {
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }
    for child in doc.children(NodeId::ROOT) {
        write_node(doc, child, &mut out, 0, options.indent);
        if options.indent.is_some() {
            out.push('\n');
        }
    }
    out
}

/// Serialize a single subtree without declaration or indentation.
pub fn node_to_string(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, id, &mut out, 0, None);
    out
}

/// Serialize the whole document into `writer`.
pub fn write_to<W: Write>(
    doc: &Document,
    options: &SerializeOptions,
    mut writer: W,
) -> io::Result<()> {
    writer.write_all(to_string(doc, options).as_bytes())?;
    writer.flush()
}

/// One unit of pending output.
enum Step {
    Node {
        id: NodeId,
        depth: usize,
        indent: Option<usize>,
        preserve: bool,
    },
    Close(NodeId),
    Newline(usize),
}

/// Write the subtree at `id`.
///
/// Driven from an explicit stack so document depth is bounded by memory,
/// not by the call stack.
fn write_node(doc: &Document, id: NodeId, out: &mut String, depth: usize, indent: Option<usize>) {
    let mut stack = vec![Step::Node {
        id,
        depth,
        indent,
        preserve: false,
    }];

    while let Some(step) = stack.pop() {
        let (id, depth, indent, preserve) = match step {
            Step::Newline(spaces) => {
                newline(out, spaces);
                continue;
            }
            Step::Close(id) => {
                if let Some(name) = doc.name(id) {
                    out.push_str("</");
                    out.push_str(&name.qualified());
                    out.push('>');
                }
                continue;
            }
            Step::Node {
                id,
                depth,
                indent,
                preserve,
            } => (id, depth, indent, preserve),
        };
        let Some(node) = doc.get(id) else {
            continue;
        };

        match &node.data {
            NodeData::Document => {
                let children: Vec<_> = doc.children(id).collect();
                stack.extend(children.into_iter().rev().map(|child| Step::Node {
                    id: child,
                    depth,
                    indent,
                    preserve,
                }));
            }
            NodeData::Text(text) => out.push_str(&partial_escape(text.as_str())),
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::ProcessingInstruction(content) => {
                out.push_str("<?");
                out.push_str(content);
                out.push_str("?>");
            }
            NodeData::Element { name, attrs } => {
                out.push('<');
                out.push_str(&name.qualified());
                for attr in attrs {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    out.push_str(&escape(attr.value.as_str()));
                    out.push('"');
                }

                if node.first_child.is_none() {
                    out.push_str("/>");
                    continue;
                }
                out.push('>');

                let preserve = match doc.attr(id, "xml:space") {
                    Some("preserve") => true,
                    Some("default") => false,
                    _ => preserve,
                };
                // Layout whitespace next to text, or anywhere under
                // xml:space="preserve", would become content.
                let child_indent = indent.filter(|_| !preserve && !has_text_child(doc, id));

                stack.push(Step::Close(id));
                if let Some(width) = child_indent {
                    stack.push(Step::Newline(depth * width));
                }
                let children: Vec<_> = doc.children(id).collect();
                for child in children.into_iter().rev() {
                    stack.push(Step::Node {
                        id: child,
                        depth: depth + 1,
                        indent: child_indent,
                        preserve,
                    });
                    if let Some(width) = child_indent {
                        stack.push(Step::Newline((depth + 1) * width));
                    }
                }
            }
        }
    }
}

fn has_text_child(doc: &Document, id: NodeId) -> bool {
    doc.children(id).any(|child| doc.text(child).is_some())
}

fn newline(out: &mut String, spaces: usize) {
    out.push('\n');
    out.extend(std::iter::repeat_n(' ', spaces));
}
