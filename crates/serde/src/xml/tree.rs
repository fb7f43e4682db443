//! Namespace-resolved XML element tree.

use std::fmt;

use quick_xml::NsReader;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::error::XmlError;

/// A namespace-qualified element name in Clark notation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    pub namespace: String,
    pub local: String,
}

impl QName {
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local)
    }
}

/// An attribute. Unprefixed attributes have no namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub local: String,
    pub value: String,
}

impl Attribute {
    pub fn new(local: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
            value: value.into(),
        }
    }

    /// Display name for error messages, e.g. `@version`.
    pub(crate) fn display_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("@{{{}}}{}", ns, self.local),
            None => format!("@{}", self.local),
        }
    }
}

/// An XML element. Elements either hold text or child elements, never both.
///
/// Namespace declarations are not kept: prefixes are a property of one
/// serialization pass, not of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: QName,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn leaf(name: QName, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(name)
        }
    }

    /// Text content, empty when there is none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// First child with the given local name, in any namespace.
    pub fn child(&self, local: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name.local == local)
    }

    /// Value of an unprefixed attribute.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.local == local)
            .map(|a| a.value.as_str())
    }

    /// This element and all its descendants in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    pub fn parse(xml: &str) -> Result<Element, XmlError> {
        parse_document(xml)
    }

    pub fn parse_slice(bytes: &[u8]) -> Result<Element, XmlError> {
        let xml = std::str::from_utf8(bytes)
            .map_err(|e| XmlError::Malformed(format!("invalid UTF-8: {}", e)))?;
        parse_document(xml)
    }
}

/// Pre-order iterator returned by [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

fn parse_document(xml: &str) -> Result<Element, XmlError> {
    let mut reader = NsReader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (resolved, event) = reader
            .read_resolved_event()
            .map_err(|e| XmlError::Malformed(e.to_string()))?;
        let namespace = owned_namespace(resolved)?;

        match event {
            Event::Start(start) => {
                let element = open_element(&reader, namespace, &start)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&reader, namespace, &start)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Malformed("unbalanced end tag".to_string()))?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                append_text(&mut stack, &String::from_utf8_lossy(text.as_ref()))?;
            }
            Event::CData(data) => {
                append_text(&mut stack, &String::from_utf8_lossy(data.as_ref()))?;
            }
            Event::GeneralRef(reference) => {
                let resolved = resolve_reference(&reference)?;
                append_text(&mut stack, &resolved)?;
            }
            Event::Eof => break,
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    if !stack.is_empty() {
        return Err(XmlError::Malformed(
            "unexpected end of document".to_string(),
        ));
    }
    root.ok_or(XmlError::EmptyDocument)
}

fn owned_namespace(resolved: ResolveResult<'_>) -> Result<Option<String>, XmlError> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(XmlError::UnboundPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

fn open_element(
    reader: &NsReader<&[u8]>,
    namespace: Option<String>,
    start: &BytesStart<'_>,
) -> Result<Element, XmlError> {
    let local = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let namespace = namespace.ok_or_else(|| XmlError::MissingNamespace(local.clone()))?;
    let mut element = Element::new(QName::new(namespace, local));

    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Malformed(e.to_string()))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (resolved, local) = reader.resolve_attribute(attr.key);
        let namespace = owned_namespace(resolved)?;
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::Malformed(e.to_string()))?;
        element.attributes.push(Attribute {
            namespace,
            local: String::from_utf8_lossy(local.as_ref()).into_owned(),
            value: value.into_owned(),
        });
    }
    Ok(element)
}

fn close_element(
    mut element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), XmlError> {
    if !element.children.is_empty() {
        if element.text.as_deref().is_some_and(|t| !t.trim().is_empty()) {
            return Err(XmlError::MixedContent(element.name.local));
        }
        element.text = None;
    }

    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(XmlError::Malformed(
                "more than one root element".to_string(),
            ));
        }
    }
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(element) => {
            element.text.get_or_insert_with(String::new).push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(XmlError::Malformed(
            "text outside the root element".to_string(),
        )),
    }
}

fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, XmlError> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| XmlError::Malformed(e.to_string()))?
    {
        return Ok(ch.to_string());
    }
    let name = reference
        .decode()
        .map_err(|e| XmlError::Malformed(e.to_string()))?;
    quick_xml::escape::resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| XmlError::Malformed(format!("unknown entity &{};", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://www.ech.ch/xmlns/eCH-0010/5";

    #[test]
    fn test_parse_resolves_prefixes() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<a:addressInformation xmlns:a="http://www.ech.ch/xmlns/eCH-0010/5">
  <a:town>Bister</a:town>
  <a:swissZipCode>3983</a:swissZipCode>
</a:addressInformation>"#;
        let root = Element::parse(xml).unwrap();
        assert_eq!(root.name, QName::new(NS, "addressInformation"));
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.text, None);
        assert_eq!(root.child("town").unwrap().text(), "Bister");
        assert_eq!(root.descendants().count(), 3);
    }

    #[test]
    fn test_default_namespace_and_entities() {
        let xml = r#"<town xmlns="http://www.ech.ch/xmlns/eCH-0010/5" lang="de">Saint&#45;Imier &amp; co</town>"#;
        let root = Element::parse(xml).unwrap();
        assert_eq!(root.name.namespace, NS);
        assert_eq!(root.text(), "Saint-Imier & co");
        assert_eq!(root.attribute("lang"), Some("de"));
    }

    #[test]
    fn test_unqualified_element_is_an_error() {
        let err = Element::parse("<town>Bister</town>").unwrap_err();
        assert_eq!(err, XmlError::MissingNamespace("town".to_string()));
    }

    #[test]
    fn test_mixed_content_is_an_error() {
        let xml = r#"<a xmlns="urn:x">text<b/></a>"#;
        assert!(matches!(
            Element::parse(xml),
            Err(XmlError::MixedContent(_))
        ));
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            Element::parse(r#"<a xmlns="urn:x"><b></a>"#),
            Err(XmlError::Malformed(_))
        ));
        assert_eq!(Element::parse("  "), Err(XmlError::EmptyDocument));
    }
}
