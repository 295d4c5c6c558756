//! XML document handling
//!
//! This module turns raw metadata text into a lightweight element tree.
//! Element and attribute names are stored by local name only: namespace
//! prefixes such as `edmx:` are dropped and `xmlns` declarations are skipped,
//! because CSDL elements are matched on local name regardless of the
//! namespace version in use.

use crate::error::{ParseError, Result};
use crate::limits::Limits;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Local name of the element
    pub name: String,
    /// Attributes keyed by local name
    pub attributes: HashMap<String, String>,
    /// Child elements
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value by local name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Set an attribute value
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Find direct child elements by local name
    pub fn find_children<'a>(&'a self, local_name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |e| e.local_name() == local_name)
    }

    /// Find descendant elements by local name, in document order.
    ///
    /// The element itself is included when its name matches.
    pub fn find_descendants(&self, local_name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            if element.local_name() == local_name {
                found.push(element);
            }
            // Reverse so the first child is visited first
            stack.extend(element.children.iter().rev());
        }
        found
    }
}

/// XML Document representation
#[derive(Debug)]
pub struct Document {
    /// Root element of the document
    pub root: Element,
}

impl Document {
    /// Parse an XML document from a string with default limits
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes(), &Limits::default())
    }

    /// Parse an XML document from bytes.
    ///
    /// Fails on any syntax error, on unclosed or mismatched tags, on text
    /// outside the root element, and on documents with zero or several
    /// root elements.
    pub fn parse(xml: &[u8], limits: &Limits) -> Result<Self> {
        limits.check_xml_size(xml.len())?;

        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut root: Option<Element> = None;
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            let position = reader.buffer_position();
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let element = Self::parse_element(&e, position)?;
                    element_stack.push(element);
                    limits.check_xml_depth(element_stack.len())?;
                }
                Ok(Event::End(e)) => {
                    let current = element_stack.pop().ok_or_else(|| {
                        ParseError::new(format!(
                            "unexpected closing tag '{}'",
                            String::from_utf8_lossy(e.name().as_ref())
                        ))
                        .with_location(format!("byte {}", position))
                    })?;
                    Self::attach(current, &mut element_stack, &mut root, position)?;
                }
                Ok(Event::Empty(e)) => {
                    let element = Self::parse_element(&e, position)?;
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    Self::attach(element, &mut element_stack, &mut root, position)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| {
                            ParseError::new(format!("failed to unescape text: {}", e))
                                .with_location(format!("byte {}", position))
                        })?;
                    // Element text is not part of the tree
                    if element_stack.is_empty() && !text.trim().is_empty() {
                        return Err(ParseError::new("text content outside of the root element")
                            .with_location(format!("byte {}", position))
                            .into());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ParseError::new(format!("malformed XML: {}", e))
                        .with_location(format!("byte {}", reader.buffer_position()))
                        .into())
                }
                _ => {} // Ignore other events (comments, processing instructions, etc.)
            }
            buf.clear();
        }

        if let Some(unclosed) = element_stack.last() {
            return Err(ParseError::new(format!(
                "element '{}' is never closed",
                unclosed.local_name()
            ))
            .with_location("end of document")
            .into());
        }

        let root = root.ok_or_else(|| ParseError::new("document has no root element"))?;
        Ok(Document { root })
    }

    /// Attach a completed element to its parent, or make it the root
    fn attach(
        element: Element,
        element_stack: &mut [Element],
        root: &mut Option<Element>,
        position: usize,
    ) -> Result<()> {
        if let Some(parent) = element_stack.last_mut() {
            parent.add_child(element);
        } else if root.is_some() {
            return Err(ParseError::new(format!(
                "second root element '{}'",
                element.local_name()
            ))
            .with_location(format!("byte {}", position))
            .into());
        } else {
            *root = Some(element);
        }
        Ok(())
    }

    /// Parse element from BytesStart event
    fn parse_element(start: &BytesStart, position: usize) -> Result<Element> {
        let name = std::str::from_utf8(start.local_name().as_ref())
            .map_err(|e| ParseError::new(format!("invalid element name: {}", e)))?
            .to_string();

        let mut element = Element::new(name);

        for attr_result in start.attributes() {
            let attr = attr_result.map_err(|e| {
                ParseError::new(format!("failed to parse attribute: {}", e))
                    .with_location(format!("byte {}", position))
            })?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| ParseError::new(format!("invalid attribute name: {}", e)))?;

            // Namespace declarations carry no CSDL meaning
            if attr_name == "xmlns" || attr_name.starts_with("xmlns:") {
                continue;
            }

            let attr_value = attr
                .unescape_value()
                .map_err(|e| {
                    ParseError::new(format!("failed to unescape attribute value: {}", e))
                        .with_location(format!("byte {}", position))
                })?
                .to_string();

            let local = attr_name
                .split_once(':')
                .map(|(_prefix, local)| local)
                .unwrap_or(attr_name);
            element.set_attribute(local, attr_value);
        }

        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> &Element {
        &self.root
    }
}
