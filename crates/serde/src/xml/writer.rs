//! Element tree to XML text, with one prefix binding per namespace.

use std::collections::BTreeMap;
use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::XmlError;
use crate::schema::XSI_NAMESPACE;

use super::Element;

/// Prefixes for every namespace used in one document.
///
/// Lives for a single write call and is declared on the root element.
#[derive(Debug, Default)]
pub(crate) struct NamespaceBindings {
    by_uri: BTreeMap<String, String>,
    order: Vec<(String, String)>,
    generated: usize,
}

impl NamespaceBindings {
    /// Collects namespaces in document order, asking `preferred` for a prefix
    /// and falling back to `ns1`, `ns2`, ...
    pub(crate) fn for_tree(root: &Element, preferred: &dyn Fn(&str) -> Option<String>) -> Self {
        let mut bindings = Self::default();
        for element in root.descendants() {
            bindings.bind(&element.name.namespace, preferred);
            for attr in &element.attributes {
                if let Some(ns) = &attr.namespace {
                    bindings.bind(ns, preferred);
                }
            }
        }
        bindings
    }

    fn bind(&mut self, uri: &str, preferred: &dyn Fn(&str) -> Option<String>) {
        if self.by_uri.contains_key(uri) {
            return;
        }
        let base = if uri == XSI_NAMESPACE {
            "xsi".to_string()
        } else {
            match preferred(uri) {
                Some(prefix) => prefix,
                None => {
                    self.generated += 1;
                    format!("ns{}", self.generated)
                }
            }
        };
        let mut prefix = base.clone();
        let mut n = 1;
        while self.order.iter().any(|(p, _)| *p == prefix) {
            n += 1;
            prefix = format!("{}{}", base, n);
        }
        self.by_uri.insert(uri.to_string(), prefix.clone());
        self.order.push((prefix, uri.to_string()));
    }

    fn qualified(&self, uri: &str, local: &str) -> String {
        match self.by_uri.get(uri) {
            Some(prefix) => format!("{}:{}", prefix, local),
            None => local.to_string(),
        }
    }
}

/// Writes a complete document with an XML declaration.
pub(crate) fn write_document(
    root: &Element,
    bindings: &NamespaceBindings,
) -> Result<String, XmlError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| XmlError::Write(e.to_string()))?;
    write_element(&mut writer, root, bindings, true)?;

    let mut bytes = writer.into_inner();
    bytes
        .write_all(b"\n")
        .map_err(|e| XmlError::Write(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| XmlError::Write(e.to_string()))
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    element: &Element,
    bindings: &NamespaceBindings,
    is_root: bool,
) -> Result<(), XmlError> {
    let name = bindings.qualified(&element.name.namespace, &element.name.local);
    let mut start = BytesStart::new(name.as_str());

    if is_root {
        for (prefix, uri) in &bindings.order {
            let key = format!("xmlns:{}", prefix);
            start.push_attribute((key.as_str(), uri.as_str()));
        }
    }
    for attr in &element.attributes {
        let key = match &attr.namespace {
            Some(ns) => bindings.qualified(ns, &attr.local),
            None => attr.local.clone(),
        };
        start.push_attribute((key.as_str(), attr.value.as_str()));
    }

    if element.children.is_empty() && element.text.is_none() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| XmlError::Write(e.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| XmlError::Write(e.to_string()))?;
    if let Some(text) = &element.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| XmlError::Write(e.to_string()))?;
    }
    for child in &element.children {
        write_element(writer, child, bindings, false)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(name.as_str())))
        .map_err(|e| XmlError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{Attribute, QName};

    const ADDR: &str = "http://www.ech.ch/xmlns/eCH-0010/5";
    const OTHER: &str = "urn:example:other";

    fn prefix(uri: &str) -> Option<String> {
        (uri == ADDR).then(|| "eCH-0010".to_string())
    }

    #[test]
    fn test_declares_each_namespace_once_on_root() {
        let mut root = Element::new(QName::new(ADDR, "addressInformation"));
        root.children.push(Element::leaf(QName::new(ADDR, "town"), "Bister"));
        root.children.push(Element::leaf(QName::new(OTHER, "note"), "a < b"));
        root.attributes.push(Attribute {
            namespace: Some(XSI_NAMESPACE.to_string()),
            local: "type".to_string(),
            value: "x".to_string(),
        });

        let bindings = NamespaceBindings::for_tree(&root, &prefix);
        let xml = write_document(&root, &bindings).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(xml.matches("xmlns:eCH-0010=").count(), 1);
        assert!(xml.contains("xmlns:ns1=\"urn:example:other\""));
        assert!(xml.contains("xsi:type=\"x\""));
        assert!(xml.contains("<eCH-0010:town>Bister</eCH-0010:town>"));
        assert!(xml.contains("a &lt; b"));

        let reparsed = Element::parse(&xml).unwrap();
        assert_eq!(reparsed, root);
    }

    #[test]
    fn test_prefix_clash_gets_suffix() {
        let mut root = Element::new(QName::new(ADDR, "a"));
        root.children.push(Element::new(QName::new(OTHER, "b")));
        let same = |_: &str| Some("p".to_string());
        let bindings = NamespaceBindings::for_tree(&root, &same);
        assert_eq!(bindings.qualified(ADDR, "a"), "p:a");
        assert_eq!(bindings.qualified(OTHER, "b"), "p2:b");
    }
}
