//! Qualified element names and attributes.

use std::fmt;

/// The TEI namespace URI.
pub const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";

/// The namespace bound to the reserved `xml` prefix.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// An element name with its resolved namespace.
///
/// The prefix is kept as written so the serializer can reproduce it; equality
/// of names for rule matching goes through [`QName::is_tei`], which only looks
/// at the namespace and local part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
    pub namespace: Option<String>,
}

impl QName {
    /// A name in no namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
            namespace: None,
        }
    }

    /// An unprefixed name in the TEI namespace.
    pub fn tei(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
            namespace: Some(TEI_NS.to_string()),
        }
    }

    /// Same prefix and namespace, different local name.
    pub fn with_local(&self, local: impl Into<String>) -> Self {
        Self {
            prefix: self.prefix.clone(),
            local: local.into(),
            namespace: self.namespace.clone(),
        }
    }

    /// Whether this name is in the TEI vocabulary space.
    ///
    /// Unqualified names count as TEI so that fragments written without a
    /// namespace declaration are cleaned the same way.
    pub fn in_tei(&self) -> bool {
        match &self.namespace {
            None => true,
            Some(ns) => ns == TEI_NS,
        }
    }

    /// Whether this is the TEI element with the given local name.
    pub fn is_tei(&self, local: &str) -> bool {
        self.local == local && self.in_tei()
    }

    /// The name as it appears in markup (`prefix:local`).
    pub fn qualified(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// An attribute as written in the source, namespace declarations included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
