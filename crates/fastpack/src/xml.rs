//! Minimal XML element tree and indented writer for the installer descriptor.
//!
//! The descriptor only needs elements with attributes; there is no text
//! content, no namespaces and no comments.

use crate::{PackError, PackResult};
use std::fmt::{self, Write};

/// XML declaration written at the top of every document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

const INDENT: &str = "  ";

/// An element with ordered attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`XmlNode::set_attribute`].
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set an attribute. An existing attribute keeps its position and gets
    /// the new value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Builder form of [`XmlNode::push_child`].
    #[must_use]
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.push_child(child);
        self
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    /// Element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the named attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Render this element as a complete, indented XML document.
    pub fn to_xml_string(&self) -> PackResult<String> {
        let mut out = String::new();
        out.push_str(XML_DECLARATION);
        out.push('\n');
        write_element(&mut out, self, 0)?;
        Ok(out)
    }
}

fn write_element(out: &mut String, node: &XmlNode, depth: usize) -> PackResult<()> {
    check_name(&node.name)?;

    let indent = INDENT.repeat(depth);
    write!(out, "{indent}<{}", node.name).map_err(fmt_error)?;

    for (name, value) in &node.attributes {
        check_name(name)?;
        write!(out, " {name}=\"{}\"", escape_attribute(value)?).map_err(fmt_error)?;
    }

    if node.children.is_empty() {
        out.push_str("/>\n");
        return Ok(());
    }

    out.push_str(">\n");
    for child in &node.children {
        write_element(out, child, depth + 1)?;
    }
    writeln!(out, "{indent}</{}>", node.name).map_err(fmt_error)?;

    Ok(())
}

fn fmt_error(err: fmt::Error) -> PackError {
    PackError::Serialization(err.to_string())
}

/// Check an element or attribute name against a conservative subset of the
/// XML `Name` production.
fn check_name(name: &str) -> PackResult<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':');
    let valid_rest = chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'));

    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(PackError::Serialization(format!(
            "invalid XML name: {name:?}"
        )))
    }
}

/// Characters allowed in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

fn escape_attribute(value: &str) -> PackResult<String> {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            c if is_xml_char(c) => escaped.push(c),
            c => {
                return Err(PackError::Serialization(format!(
                    "character U+{:04X} is not allowed in XML",
                    u32::from(c)
                )));
            }
        }
    }
    Ok(escaped)
}
