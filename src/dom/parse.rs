//! XML reader: builds a [`Document`] from markup with `quick_xml`.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Attribute, Document, NodeId, QName, XML_NS};
use crate::error::{Error, Result};
use crate::util::{declared_encoding, decode_text, normalize_newlines, resolve_entity, strip_bom};

/// Options controlling how markup becomes a tree.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Drop whitespace-only text nodes, except under `xml:space="preserve"`.
    pub strip_whitespace: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strip_whitespace: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strip_whitespace(mut self, strip: bool) -> Self {
        self.strip_whitespace = strip;
        self
    }
}

/// Parse raw bytes, detecting the encoding from the BOM or XML declaration.
pub fn parse_bytes(bytes: &[u8], options: &ParseOptions) -> Result<Document> {
    let bytes = strip_bom(bytes);
    let hint = declared_encoding(bytes);
    let content = decode_text(bytes, hint.as_deref());
    parse_str(&content, options)
}

/// Parse a complete document from a string.
pub fn parse_str(content: &str, options: &ParseOptions) -> Result<Document> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);

    let mut builder = TreeBuilder::new(options);

    loop {
        match reader.read_event()? {
            Event::Start(e) => builder.start(&e, false)?,
            Event::Empty(e) => builder.start(&e, true)?,
            Event::End(_) => builder.end()?,
            Event::Text(e) => {
                builder.push_text(&normalize_newlines(&String::from_utf8_lossy(e.as_ref())))
            }
            Event::CData(e) => {
                builder.push_text(&normalize_newlines(&String::from_utf8_lossy(&e.into_inner())))
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                match resolve_entity(&entity) {
                    Some(c) => builder.push_text(c.encode_utf8(&mut [0; 4])),
                    None => return Err(Error::Malformed(format!("unknown entity &{entity};"))),
                }
            }
            Event::Comment(e) => builder.comment(&String::from_utf8_lossy(e.as_ref()))?,
            Event::PI(e) => builder.pi(&String::from_utf8_lossy(&e))?,
            Event::Eof => break,
            // XML declaration and DOCTYPE are regenerated or dropped on output.
            _ => {}
        }
    }

    builder.finish()
}

/// One open element on the builder stack.
struct Frame {
    id: NodeId,
    /// Prefixes this element binds; popped from the scope on close.
    declared: Vec<String>,
    preserve_space: bool,
}

struct TreeBuilder<'o> {
    doc: Document,
    stack: Vec<Frame>,
    /// In-scope namespace bindings, innermost last. The empty prefix is the
    /// default namespace.
    scope: HashMap<String, Vec<String>>,
    pending: String,
    options: &'o ParseOptions,
}

impl<'o> TreeBuilder<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            doc: Document::new(),
            stack: Vec::new(),
            scope: HashMap::new(),
            pending: String::new(),
            options,
        }
    }

    fn current(&self) -> NodeId {
        self.stack.last().map(|f| f.id).unwrap_or(NodeId::ROOT)
    }

    fn preserve_space(&self) -> bool {
        self.stack.last().is_some_and(|f| f.preserve_space)
    }

    fn push_text(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    /// Move buffered character data into the tree.
    ///
    /// Text is buffered because entity references arrive as separate events.
    fn flush_text(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.pending);
        let blank = text.trim().is_empty();

        if self.stack.is_empty() {
            if blank {
                return Ok(());
            }
            return Err(Error::Malformed(
                "text content outside the root element".to_string(),
            ));
        }

        if blank && self.options.strip_whitespace && !self.preserve_space() {
            return Ok(());
        }
        let parent = self.current();
        self.doc.append_text(parent, &text);
        Ok(())
    }

    fn lookup_namespace(&self, prefix: &str, local_decls: &[(String, String)]) -> Option<String> {
        local_decls
            .iter()
            .rev()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.clone())
            .or_else(|| self.scope.get(prefix)?.last().cloned())
    }

    fn start(&mut self, e: &BytesStart, empty: bool) -> Result<()> {
        self.flush_text()?;

        if self.stack.is_empty() && self.doc.root_element().is_some() {
            return Err(Error::Malformed("multiple root elements".to_string()));
        }

        let mut attrs = Vec::new();
        let mut namespaces = Vec::new();
        let mut preserve_space = self.preserve_space();

        for attr in e.attributes() {
            let attr = attr.map_err(|err| Error::Malformed(err.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let raw = String::from_utf8_lossy(&attr.value);
            let value = quick_xml::escape::unescape(&raw)
                .map_err(|err| Error::Malformed(err.to_string()))?
                .into_owned();

            if key == "xmlns" {
                namespaces.push((String::new(), value.clone()));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                namespaces.push((prefix.to_string(), value.clone()));
            } else if key == "xml:space" {
                preserve_space = value == "preserve";
            }
            attrs.push(Attribute { name: key, value });
        }

        let raw_name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let (prefix, local) = match raw_name.split_once(':') {
            Some((p, l)) => (Some(p.to_string()), l.to_string()),
            None => (None, raw_name.clone()),
        };

        let namespace = match prefix.as_deref() {
            Some("xml") => Some(XML_NS.to_string()),
            Some(p) => Some(
                self.lookup_namespace(p, &namespaces)
                    .ok_or_else(|| Error::UnboundPrefix(p.to_string()))?,
            ),
            // An empty default declaration (xmlns="") undeclares it.
            None => self
                .lookup_namespace("", &namespaces)
                .filter(|uri| !uri.is_empty()),
        };

        let name = QName {
            prefix,
            local,
            namespace,
        };
        let id = self.doc.create_element(name, attrs);
        let parent = self.current();
        self.doc.append(parent, id);

        if !empty {
            let mut declared = Vec::with_capacity(namespaces.len());
            for (prefix, uri) in namespaces {
                self.scope.entry(prefix.clone()).or_default().push(uri);
                declared.push(prefix);
            }
            self.stack.push(Frame {
                id,
                declared,
                preserve_space,
            });
        }
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.flush_text()?;
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| Error::Malformed("unexpected closing tag".to_string()))?;
        for prefix in frame.declared {
            if let Some(bindings) = self.scope.get_mut(&prefix) {
                bindings.pop();
            }
        }
        Ok(())
    }

    fn comment(&mut self, text: &str) -> Result<()> {
        self.flush_text()?;
        let id = self.doc.create_comment(text);
        let parent = self.current();
        self.doc.append(parent, id);
        Ok(())
    }

    fn pi(&mut self, content: &str) -> Result<()> {
        self.flush_text()?;
        let id = self.doc.create_pi(content);
        let parent = self.current();
        self.doc.append(parent, id);
        Ok(())
    }

    fn finish(mut self) -> Result<Document> {
        self.flush_text()?;
        if let Some(frame) = self.stack.last() {
            let name = self
                .doc
                .name(frame.id)
                .map(QName::qualified)
                .unwrap_or_default();
            return Err(Error::Malformed(format!("unclosed element <{name}>")));
        }
        if self.doc.root_element().is_none() {
            return Err(Error::EmptyDocument);
        }
        Ok(self.doc)
    }
}
