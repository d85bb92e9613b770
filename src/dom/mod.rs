//! Arena-based document tree.
//!
//! All nodes live in one vector; parent/child/sibling links are indices into
//! it. Node 0 is always the document node. Nodes are never freed: detaching
//! a node only unlinks it, so a `NodeId` stays valid for the lifetime of the
//! `Document` that issued it.

mod name;
pub mod parse;
pub mod serialize;

pub use name::{Attribute, QName, TEI_NS, XML_NS};

/// Unique identifier for a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The document node.
    pub const ROOT: NodeId = NodeId(0);
}

/// Node payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Document root. Exactly one, at [`NodeId::ROOT`].
    Document,
    /// Element with name and attributes.
    Element { name: QName, attrs: Vec<Attribute> },
    /// Character data (entities already resolved).
    Text(String),
    Comment(String),
    /// Processing instruction, target and content as written.
    ProcessingInstruction(String),
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    /// Element name, if this is an element.
    pub fn name(&self) -> Option<&QName> {
        match &self.data {
            NodeData::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Text content, if this is a text node.
    pub fn text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element { .. })
    }
}

/// An ordered, rooted document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// The single top-level element, if any.
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .find(|&id| self.nodes[id.0 as usize].is_element())
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Element name of `id`, or `None` for non-elements.
    pub fn name(&self, id: NodeId) -> Option<&QName> {
        self.get(id).and_then(Node::name)
    }

    /// Text of `id`, or `None` for non-text nodes.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::text)
    }

    /// Look up an attribute by its name as written (e.g. `break`, `xml:id`).
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.get(id)?.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    pub fn create_element(&mut self, name: QName, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(NodeData::Element { name, attrs })
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(text.into()))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Comment(text.into()))
    }

    pub fn create_pi(&mut self, content: impl Into<String>) -> NodeId {
        self.alloc(NodeData::ProcessingInstruction(content.into()))
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// `child` must be unattached (freshly created or detached).
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last_child = self.get(parent).and_then(|n| n.last_child);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = Some(parent);
            child_node.prev_sibling = last_child;
            child_node.next_sibling = None;
        }

        if let Some(last_id) = last_child
            && let Some(last_node) = self.get_mut(last_id)
        {
            last_node.next_sibling = Some(child);
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = Some(child);
            }
            parent_node.last_child = Some(child);
        }
    }

    /// Append text to `parent`, merging with a trailing text child.
    ///
    /// Returns the text node that now holds the content.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        if let Some(last_id) = self.get(parent).and_then(|n| n.last_child)
            && let Some(Node {
                data: NodeData::Text(existing),
                ..
            }) = self.get_mut(last_id)
        {
            existing.push_str(text);
            return last_id;
        }
        let id = self.create_text(text);
        self.append(parent, id);
        id
    }

    /// Mutable access to a text node's content.
    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut String> {
        match self.get_mut(id).map(|n| &mut n.data) {
            Some(NodeData::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Unlink `id` from its parent and siblings. Its subtree stays intact.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.get_mut(prev_id) {
                    prev_node.next_sibling = next;
                }
            }
            None => {
                if let Some(parent_id) = parent
                    && let Some(parent_node) = self.get_mut(parent_id)
                {
                    parent_node.first_child = next;
                }
            }
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.get_mut(next_id) {
                    next_node.prev_sibling = prev;
                }
            }
            None => {
                if let Some(parent_id) = parent
                    && let Some(parent_node) = self.get_mut(parent_id)
                {
                    parent_node.last_child = prev;
                }
            }
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = None;
            node.prev_sibling = None;
            node.next_sibling = None;
        }
    }

    /// Detach every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        while let Some(child) = self.get(id).and_then(|n| n.first_child) {
            self.detach(child);
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Iterate over the children of `id` in document order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.get(id).and_then(|n| n.first_child),
        }
    }

    /// Iterate over the strict ancestors of `id`, nearest first.
    ///
    /// The document node is included last.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// Iterate over the strict descendants of `id` in document order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            scope: id,
            next: self.get(id).and_then(|n| n.first_child),
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|d| self.text(d))
            .collect()
    }

    /// All attached elements with the given TEI local name, in document order.
    pub fn find_all(&self, local: &str) -> Vec<NodeId> {
        self.descendants(NodeId::ROOT)
            .filter(|&id| self.name(id).is_some_and(|n| n.is_tei(local)))
            .collect()
    }

    /// Copy the subtree at `src` from `self` into `dst` under `dst_parent`.
    ///
    /// Returns the id of the copy's root in `dst`.
    pub fn deep_copy_into(&self, src: NodeId, dst: &mut Document, dst_parent: NodeId) -> NodeId {
        let Some(node) = self.get(src) else {
            return dst_parent;
        };
        let root = dst.alloc(node.data.clone());
        dst.append(dst_parent, root);

        let mut pending = vec![(src, root)];
        while let Some((from, to)) = pending.pop() {
            for child in self.children(from) {
                let Some(node) = self.get(child) else {
                    continue;
                };
                let copy = dst.alloc(node.data.clone());
                dst.append(to, copy);
                pending.push((child, copy));
            }
        }
        root
    }

    /// Node-for-node equality of the subtree at `a` in `self` and `b` in `other`.
    pub fn subtree_eq(&self, a: NodeId, other: &Document, b: NodeId) -> bool {
        let mut pending = vec![(a, b)];
        while let Some((a, b)) = pending.pop() {
            let (Some(left), Some(right)) = (self.get(a), other.get(b)) else {
                return false;
            };
            if left.data != right.data {
                return false;
            }
            let mut lc = self.children(a);
            let mut rc = other.children(b);
            loop {
                match (lc.next(), rc.next()) {
                    (None, None) => break,
                    (Some(l), Some(r)) => pending.push((l, r)),
                    _ => return false,
                }
            }
        }
        true
    }
}

/// Iterator over a node's children.
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.get(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over a node's ancestors.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over a subtree, excluding its root.
pub struct Descendants<'a> {
    doc: &'a Document,
    scope: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        let node = self.doc.get(current)?;

        self.next = if let Some(child) = node.first_child {
            Some(child)
        } else {
            // Climb until a next sibling is found, never leaving the scope.
            let mut cursor = current;
            loop {
                if cursor == self.scope {
                    break None;
                }
                let n = self.doc.get(cursor)?;
                if let Some(sibling) = n.next_sibling {
                    break Some(sibling);
                }
                match n.parent {
                    Some(parent) if parent != self.scope => cursor = parent,
                    _ => break None,
                }
            }
        };

        Some(current)
    }
}
