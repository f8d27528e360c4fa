//! XML documents via `quick-xml`.
//!
//! Elements map onto structured values as follows:
//!
//! - the document is a single-key mapping from the root element's name to its
//!   content;
//! - attributes become keys prefixed with `_`;
//! - child elements become keys, and repeated children with the same name
//!   collapse into a sequence;
//! - an element with neither attributes nor children is its text (a string);
//! - text next to attributes or children is stored under `__text`.
//!
//! Comments, processing instructions and the declaration are discarded on
//! parse; a document without a root element parses to an empty mapping. Serialization writes a UTF-8 declaration and indents by two spaces.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::Map;

use crate::formats::{scalar_text, FormatError, FormatHandler};
use crate::StructuredValue;

#[cfg(test)]
#[path = "xml_tests.rs"]
mod tests;

const ATTRIBUTE_PREFIX: &str = "_";
const TEXT_KEY: &str = "__text";

/// XML handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFormat;

impl FormatHandler for XmlFormat {
    fn name(&self) -> &str {
        "xml"
    }

    fn extensions(&self) -> &[&str] {
        &["xml"]
    }

    fn parse(&self, text: &str) -> Result<StructuredValue, FormatError> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<OpenElement> = Vec::new();
        let mut root: Option<(String, StructuredValue)> = None;

        loop {
            let event = reader.read_event().map_err(|e| malformed(&reader, e))?;
            match event {
                Event::Start(start) => stack.push(OpenElement::from_start(&start)?),
                Event::Empty(start) => {
                    let element = OpenElement::from_start(&start)?;
                    close(element, &mut stack, &mut root)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| FormatError::Malformed("unexpected closing tag".into()))?;
                    close(element, &mut stack, &mut root)?;
                }
                Event::Text(content) => {
                    let unescaped = content
                        .unescape()
                        .map_err(|e| FormatError::Malformed(e.to_string()))?;
                    match stack.last_mut() {
                        Some(current) => current.text.push_str(&unescaped),
                        None if unescaped.trim().is_empty() => {}
                        None => {
                            return Err(FormatError::Malformed(
                                "text outside the root element".into(),
                            ))
                        }
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(FormatError::Malformed(format!(
                "element <{}> is never closed",
                open.name
            )));
        }

        // A document with only a declaration or comments holds no values.
        let mut document = Map::new();
        if let Some((name, content)) = root {
            document.insert(name, content);
        }
        Ok(StructuredValue::Object(document))
    }

    fn serialize(&self, value: &StructuredValue) -> Result<String, FormatError> {
        let root = match value {
            StructuredValue::Object(map) if map.len() == 1 => map.iter().next(),
            _ => None,
        };
        let Some((name, content)) = root else {
            return Err(FormatError::Unrepresentable(
                "an XML document needs a mapping with exactly one root element".into(),
            ));
        };
        if content.is_array() {
            return Err(FormatError::Unrepresentable(format!(
                "root element <{name}> cannot be repeated"
            )));
        }

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(unrepresentable)?;
        write_element(&mut writer, name, content)?;

        let mut document = String::from_utf8(writer.into_inner()).map_err(unrepresentable)?;
        document.push('\n');
        Ok(document)
    }
}

/// An element whose closing tag has not been read yet.
struct OpenElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<(String, StructuredValue)>,
    text: String,
}

impl OpenElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, FormatError> {
        let name = utf8(start.name().as_ref())?;
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| FormatError::Malformed(e.to_string()))?;
            let key = utf8(attribute.key.as_ref())?;
            let value = attribute
                .unescape_value()
                .map_err(|e| FormatError::Malformed(e.to_string()))?;
            attributes.push((key, value.into_owned()));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    fn into_value(self) -> StructuredValue {
        if self.attributes.is_empty() && self.children.is_empty() {
            return StructuredValue::String(self.text);
        }

        let mut map = Map::new();
        for (key, value) in self.attributes {
            map.insert(format!("{ATTRIBUTE_PREFIX}{key}"), StructuredValue::String(value));
        }
        for (name, child) in self.children {
            match map.get_mut(&name) {
                // Only repeated children produce sequences, so an existing
                // sequence here is always one started by an earlier sibling.
                Some(StructuredValue::Array(items)) => items.push(child),
                Some(existing) => {
                    let first = existing.take();
                    *existing = StructuredValue::Array(vec![first, child]);
                }
                None => {
                    map.insert(name, child);
                }
            }
        }
        if !self.text.trim().is_empty() {
            map.insert(TEXT_KEY.to_string(), StructuredValue::String(self.text));
        }
        StructuredValue::Object(map)
    }
}

fn close(
    element: OpenElement,
    stack: &mut [OpenElement],
    root: &mut Option<(String, StructuredValue)>,
) -> Result<(), FormatError> {
    let name = element.name.clone();
    let value = element.into_value();
    match stack.last_mut() {
        Some(parent) => parent.children.push((name, value)),
        None if root.is_none() => *root = Some((name, value)),
        None => {
            return Err(FormatError::Malformed(format!(
                "second root element <{name}>"
            )))
        }
    }
    Ok(())
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &StructuredValue,
) -> Result<(), FormatError> {
    match value {
        StructuredValue::Object(map) => {
            let mut start = BytesStart::new(name);
            let mut text = None;
            let mut children = Vec::new();
            for (key, child) in map {
                if key == TEXT_KEY {
                    text = Some(scalar_text(child)?);
                } else if let Some(attribute) = key.strip_prefix(ATTRIBUTE_PREFIX) {
                    start.push_attribute((attribute, scalar_text(child)?.as_str()));
                } else {
                    children.push((key, child));
                }
            }

            if text.is_none() && children.is_empty() {
                return writer
                    .write_event(Event::Empty(start))
                    .map_err(unrepresentable);
            }

            writer
                .write_event(Event::Start(start))
                .map_err(unrepresentable)?;
            if let Some(text) = text {
                writer
                    .write_event(Event::Text(BytesText::new(&text)))
                    .map_err(unrepresentable)?;
            }
            for (key, child) in children {
                match child {
                    StructuredValue::Array(items) => {
                        for item in items {
                            write_element(writer, key, item)?;
                        }
                    }
                    single => write_element(writer, key, single)?,
                }
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(unrepresentable)
        }
        StructuredValue::Array(_) => Err(FormatError::Unrepresentable(format!(
            "<{name}> holds a nested sequence"
        ))),
        StructuredValue::Null => writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(unrepresentable),
        scalar => {
            let text = scalar_text(scalar)?;
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(unrepresentable)?;
            writer
                .write_event(Event::Text(BytesText::new(&text)))
                .map_err(unrepresentable)?;
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(unrepresentable)
        }
    }
}

fn utf8(bytes: &[u8]) -> Result<String, FormatError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| FormatError::Malformed(e.to_string()))
}

fn malformed(reader: &Reader<&[u8]>, error: impl std::fmt::Display) -> FormatError {
    FormatError::Malformed(format!(
        "{error} at byte {}",
        reader.buffer_position()
    ))
}

fn unrepresentable(error: impl std::fmt::Display) -> FormatError {
    FormatError::Unrepresentable(error.to_string())
}
