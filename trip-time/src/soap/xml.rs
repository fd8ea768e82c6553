//! Lenient XML element tree.
//!
//! Built from the quick-xml event stream. Parsing never fails: on the first
//! syntax error the reader stops and whatever elements were seen so far are
//! kept, so tag lookups still work on truncated or malformed payloads.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Index of an element in a [`Document`], in document order.
pub type NodeId = usize;

/// How an element name is compared during lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    /// Compare against the name as written, prefix included (`soap:Fault`).
    Qualified,
    /// Compare against the local part only, ignoring any namespace prefix.
    AnyNamespace,
}

#[derive(Debug)]
struct Element {
    qualified: String,
    local: String,
    /// One past the last descendant's id.
    end: NodeId,
    /// Concatenated text of the element and all its descendants.
    text: String,
}

/// Flat, document-ordered list of elements.
#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
    error: Option<String>,
    unclosed: bool,
}

impl Document {
    /// Parse `input`, keeping a partial tree if it is not well-formed.
    pub fn parse(input: &str) -> Self {
        let mut reader = Reader::from_str(input);
        let mut elements: Vec<Element> = Vec::new();
        let mut open: Vec<NodeId> = Vec::new();
        let mut error = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    open.push(elements.len());
                    elements.push(new_element(&e));
                }
                Ok(Event::Empty(e)) => {
                    let mut element = new_element(&e);
                    element.end = elements.len() + 1;
                    elements.push(element);
                }
                Ok(Event::End(_)) => {
                    if let Some(id) = open.pop() {
                        elements[id].end = elements.len();
                    }
                }
                Ok(Event::Text(t)) => {
                    let text = t
                        .unescape()
                        .map(|s| s.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&t).into_owned());
                    append_text(&mut elements, &open, &text);
                }
                Ok(Event::CData(c)) => {
                    let text = String::from_utf8_lossy(&c).into_owned();
                    append_text(&mut elements, &open, &text);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    error = Some(format!(
                        "{e} at position {}",
                        reader.error_position()
                    ));
                    break;
                }
            }
        }

        let unclosed = !open.is_empty();
        for id in open {
            elements[id].end = elements.len();
        }

        Self {
            elements,
            error,
            unclosed,
        }
    }

    /// Whether the input parsed cleanly into a single closed tree.
    pub fn is_well_formed(&self) -> bool {
        self.error.is_none() && !self.unclosed && !self.elements.is_empty()
    }

    /// Description of the syntax error that stopped parsing, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// First element in document order with the given name.
    pub fn find(&self, name: &str, mode: NameMatch) -> Option<NodeId> {
        self.find_in_range(0, self.elements.len(), name, mode)
    }

    /// First descendant of `scope` in document order with the given name.
    pub fn find_within(&self, scope: NodeId, name: &str, mode: NameMatch) -> Option<NodeId> {
        let element = self.elements.get(scope)?;
        self.find_in_range(scope + 1, element.end, name, mode)
    }

    /// First element directly below `scope`.
    pub fn first_child(&self, scope: NodeId) -> Option<NodeId> {
        let element = self.elements.get(scope)?;
        (scope + 1 < element.end).then_some(scope + 1)
    }

    /// Text content of an element, descendants included.
    pub fn text(&self, id: NodeId) -> &str {
        self.elements.get(id).map_or("", |e| e.text.as_str())
    }

    /// Local name (prefix stripped) of an element.
    pub fn local_name(&self, id: NodeId) -> &str {
        self.elements.get(id).map_or("", |e| e.local.as_str())
    }

    fn find_in_range(
        &self,
        start: NodeId,
        end: NodeId,
        name: &str,
        mode: NameMatch,
    ) -> Option<NodeId> {
        (start..end.min(self.elements.len())).find(|&id| {
            let element = &self.elements[id];
            match mode {
                NameMatch::Qualified => element.qualified == name,
                NameMatch::AnyNamespace => element.local == name,
            }
        })
    }
}

fn new_element(start: &BytesStart<'_>) -> Element {
    let name = start.name();
    Element {
        qualified: String::from_utf8_lossy(name.as_ref()).into_owned(),
        local: String::from_utf8_lossy(name.local_name().as_ref()).into_owned(),
        end: NodeId::MAX,
        text: String::new(),
    }
}

fn append_text(elements: &mut [Element], open: &[NodeId], text: &str) {
    for &id in open {
        elements[id].text.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <tns:answer xmlns:tns="urn:test"><tns:value>4<b>2</b></tns:value></tns:answer>
    <value>7</value>
  </soap:Body>
</soap:Envelope>"#;

    #[test]
    fn qualified_lookup_requires_prefix() {
        let doc = Document::parse(SAMPLE);
        assert!(doc.is_well_formed());
        assert!(doc.find("Body", NameMatch::Qualified).is_none());
        assert!(doc.find("soap:Body", NameMatch::Qualified).is_some());
        assert!(doc.find("Body", NameMatch::AnyNamespace).is_some());
    }

    #[test]
    fn lookups_follow_document_order() {
        let doc = Document::parse(SAMPLE);
        let any = doc.find("value", NameMatch::AnyNamespace).unwrap();
        assert_eq!(doc.text(any), "42");

        let plain = doc.find("value", NameMatch::Qualified).unwrap();
        assert_eq!(doc.text(plain), "7");
    }

    #[test]
    fn find_within_stays_inside_scope() {
        let doc = Document::parse(SAMPLE);
        let answer = doc.find("answer", NameMatch::AnyNamespace).unwrap();
        assert!(doc.find_within(answer, "value", NameMatch::Qualified).is_none());
        let inner = doc
            .find_within(answer, "value", NameMatch::AnyNamespace)
            .unwrap();
        assert_eq!(doc.text(inner), "42");
        assert_eq!(doc.first_child(answer), Some(inner));
        assert_eq!(doc.local_name(inner), "value");
    }

    #[test]
    fn empty_elements_have_no_children() {
        let doc = Document::parse("<root><a/><b>x</b></root>");
        let a = doc.find("a", NameMatch::Qualified).unwrap();
        assert!(doc.first_child(a).is_none());
        assert!(doc.find_within(a, "b", NameMatch::Qualified).is_none());
    }

    #[test]
    fn entities_are_unescaped() {
        let doc = Document::parse("<m>a &lt; b &amp; c</m>");
        let m = doc.find("m", NameMatch::Qualified).unwrap();
        assert_eq!(doc.text(m), "a < b & c");
    }

    #[test]
    fn malformed_input_keeps_partial_tree() {
        let doc = Document::parse("<root><result>3.5</result><broken></root>");
        assert!(!doc.is_well_formed());
        let result = doc.find("result", NameMatch::Qualified).unwrap();
        assert_eq!(doc.text(result), "3.5");
    }

    #[test]
    fn truncated_input_keeps_partial_tree() {
        let doc = Document::parse("<root><result>1.25</result><other>");
        assert!(!doc.is_well_formed());
        assert!(doc.find("result", NameMatch::Qualified).is_some());
    }

    #[test]
    fn plain_text_is_not_well_formed() {
        let doc = Document::parse("Internal Server Error");
        assert!(!doc.is_well_formed());
        assert!(doc.find("float", NameMatch::Qualified).is_none());
    }
}
