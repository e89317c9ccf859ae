use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::api::parsers::text::repair_mojibake;
use crate::errors::{SmartPingError, with_parse_context};

const DOCUMENT_NODE: &str = "#document";

/// Minimal element tree; upstream documents carry data in element text, never in attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a decoded document, tolerating mismatched or unclosed end tags
    pub fn parse(document: &str) -> Result<XmlNode, SmartPingError> {
        let mut reader = Reader::from_str(document);
        let config = reader.config_mut();
        config.trim_text(true);
        config.check_end_names = false;

        let mut stack = vec![XmlNode::named(DOCUMENT_NODE)];

        loop {
            match with_parse_context(reader.read_event(), "XML document")? {
                Event::Start(start) => stack.push(XmlNode::named(element_name(&start))),
                Event::Empty(start) => attach(&mut stack, XmlNode::named(element_name(&start))),
                Event::End(_) => close(&mut stack),
                Event::Text(text) => {
                    let value = text
                        .unescape()
                        .map(|value| value.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&text).into_owned());
                    append_text(&mut stack, &value);
                }
                Event::CData(data) => {
                    let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    append_text(&mut stack, &value);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        while stack.len() > 1 {
            close(&mut stack);
        }
        Ok(stack.pop().unwrap_or_else(|| XmlNode::named(DOCUMENT_NODE)))
    }

    /// Every outermost element with this name, in document order
    ///
    /// Matches are not searched for nested elements of the same name, so a
    /// `<licence>` record keeps its own `<licence>` number child.
    pub fn records(&self, name: &str) -> Vec<&XmlNode> {
        let mut found = Vec::new();
        self.collect_records(name, &mut found);
        found
    }

    fn collect_records<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            } else {
                child.collect_records(name, found);
            }
        }
    }

    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Trimmed text of a direct child, `None` when absent or blank
    pub fn text_of(&self, name: &str) -> Option<String> {
        self.child(name)
            .map(|child| child.text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }

    /// Text of the first present tag among aliases
    pub fn first_text(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.text_of(name))
    }

    pub fn string(&self, name: &str) -> String {
        self.text_of(name).unwrap_or_default()
    }

    /// Human-readable text, with mojibake repaired
    pub fn repaired(&self, name: &str) -> String {
        repair_mojibake(&self.string(name))
    }
}

fn element_name(start: &BytesStart) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn attach(stack: &mut [XmlNode], node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn close(stack: &mut Vec<XmlNode>) {
    if stack.len() > 1 {
        if let Some(node) = stack.pop() {
            attach(stack, node);
        }
    }
}

fn append_text(stack: &mut [XmlNode], value: &str) {
    if let Some(current) = stack.last_mut() {
        current.text.push_str(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_records_keep_inner_namesake() {
        let doc = XmlNode::parse(
            "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\
             <liste><licence><licence>621234</licence><nom>DUPONT</nom></licence>\
             <licence><licence>625678</licence><nom>MARTIN</nom></licence></liste>",
        )
        .unwrap();

        let records = doc.records("licence");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].string("licence"), "621234");
        assert_eq!(records[1].string("nom"), "MARTIN");
    }

    #[test]
    fn test_cdata_and_entities() {
        let doc = XmlNode::parse(
            "<liste><tour><lien><![CDATA[renc_id=1&equip_id1=5]]></lien><equa>A &amp; B</equa></tour></liste>",
        )
        .unwrap();
        let tour = doc.records("tour")[0];
        assert_eq!(tour.string("lien"), "renc_id=1&equip_id1=5");
        assert_eq!(tour.string("equa"), "A & B");
    }

    #[test]
    fn test_blank_and_empty_elements_are_absent() {
        let doc = XmlNode::parse("<liste><joueur><nom>  </nom><cat/></joueur></liste>").unwrap();
        let joueur = doc.records("joueur")[0];
        assert_eq!(joueur.text_of("nom"), None);
        assert_eq!(joueur.text_of("cat"), None);
        assert_eq!(joueur.first_text(&["cat", "nom", "missing"]), None);
    }

    #[test]
    fn test_unclosed_elements_are_kept() {
        let doc = XmlNode::parse("<liste><club><numero>07620112</numero>").unwrap();
        assert_eq!(doc.records("club")[0].string("numero"), "07620112");
    }
}
