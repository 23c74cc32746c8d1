//! XML to nested-mapping conversion.
//!
//! The feed body is turned into a [`serde_json::Value`] with the usual
//! xml-to-dict conventions:
//!
//! - the root element is the single top-level key
//! - child elements become keys, repeated siblings become an ordered array
//! - attributes become keys prefixed with `@`
//! - text next to attributes or children is stored under `#text`
//! - a text-only element is a string, an empty element is `null`
//!
//! Namespace prefixes are kept verbatim (`yt:videoId`, `@xmlns:yt`).

pub mod entries;

pub use entries::{extract_video_ids, FeedDocument, FeedEntry, OneOrMany};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::app::{MonitorError, Result};

pub const ATTR_PREFIX: &str = "@";
pub const TEXT_KEY: &str = "#text";

struct Element {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut children = Map::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| MonitorError::Xml(e.to_string()))?;
            let key = format!(
                "{}{}",
                ATTR_PREFIX,
                String::from_utf8_lossy(attr.key.as_ref())
            );
            let value = attr
                .unescape_value()
                .map_err(|e| MonitorError::Xml(e.to_string()))?;
            children.insert(key, Value::String(value.into_owned()));
        }

        Ok(Self {
            name,
            children,
            text: String::new(),
        })
    }

    fn push_child(&mut self, name: String, value: Value) {
        match self.children.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(items) => items.push(value),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            },
        }
    }

    fn close(self) -> (String, Value) {
        let Element {
            name,
            mut children,
            text,
        } = self;
        let text = text.trim();

        let value = if children.is_empty() {
            if text.is_empty() {
                Value::Null
            } else {
                Value::String(text.to_string())
            }
        } else {
            if !text.is_empty() {
                children.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
            }
            Value::Object(children)
        };

        (name, value)
    }
}

/// Parse an XML document into a nested mapping.
///
/// Malformed XML, unclosed elements and documents without a root element
/// are errors.
pub fn parse_mapping(xml: &[u8]) -> Result<Value> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => open.push(Element::open(&e)?),
            Event::Empty(e) => {
                let element = Element::open(&e)?;
                attach(&mut open, &mut root, element)?;
            }
            Event::End(e) => {
                let element = open.pop().ok_or_else(|| {
                    MonitorError::Xml(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                attach(&mut open, &mut root, element)?;
            }
            Event::Text(e) => {
                if let Some(current) = open.last_mut() {
                    let text = e.unescape().map_err(|e| MonitorError::Xml(e.to_string()))?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(element) = open.last() {
        return Err(MonitorError::Xml(format!(
            "unclosed element <{}>",
            element.name
        )));
    }

    let (name, value) = root.ok_or_else(|| MonitorError::Xml("no root element".into()))?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

fn attach(
    open: &mut [Element],
    root: &mut Option<(String, Value)>,
    element: Element,
) -> Result<()> {
    let (name, value) = element.close();
    match open.last_mut() {
        Some(parent) => parent.push_child(name, value),
        None if root.is_none() => *root = Some((name, value)),
        None => {
            return Err(MonitorError::Xml(format!(
                "unexpected second root element <{}>",
                name
            )))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_only_elements_are_strings() {
        let value = parse_mapping(b"<a><b>one</b><c>  two  </c></a>").unwrap();
        assert_eq!(value, json!({"a": {"b": "one", "c": "two"}}));
    }

    #[test]
    fn test_repeated_siblings_become_array() {
        let value = parse_mapping(b"<a><b>1</b><c/><b>2</b><b>3</b></a>").unwrap();
        assert_eq!(value, json!({"a": {"b": ["1", "2", "3"], "c": null}}));
    }

    #[test]
    fn test_attributes_and_text() {
        let xml = br#"<feed xmlns:yt="http://www.youtube.com/xml/schemas/2015">
            <link rel="alternate" href="https://example.com"/>
            <title type="text">Hello &amp; bye</title>
        </feed>"#;
        let value = parse_mapping(xml).unwrap();
        assert_eq!(
            value,
            json!({"feed": {
                "@xmlns:yt": "http://www.youtube.com/xml/schemas/2015",
                "link": {"@rel": "alternate", "@href": "https://example.com"},
                "title": {"@type": "text", "#text": "Hello & bye"}
            }})
        );
    }

    #[test]
    fn test_cdata_is_text() {
        let value = parse_mapping(b"<a><![CDATA[<raw>]]></a>").unwrap();
        assert_eq!(value, json!({"a": "<raw>"}));
    }

    #[test]
    fn test_empty_root_is_null() {
        let value = parse_mapping(b"<?xml version=\"1.0\"?><feed/>").unwrap();
        assert_eq!(value, json!({"feed": null}));
    }

    #[test]
    fn test_mismatched_tags_are_errors() {
        assert!(parse_mapping(b"<a><b></a></b>").is_err());
    }

    #[test]
    fn test_unclosed_document_is_error() {
        assert!(parse_mapping(b"<feed><entry>").is_err());
    }

    #[test]
    fn test_no_root_is_error() {
        assert!(parse_mapping(b"").is_err());
        assert!(parse_mapping(b"<?xml version=\"1.0\"?>").is_err());
    }
}
