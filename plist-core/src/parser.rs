use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;
use thiserror::Error;

use crate::value::{Dict, Value};

/// Errors that can occur while parsing a property list document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for tag or text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode text entity or bytes.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input file.
    #[error("failed to read plist file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in the XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),
    /// Well-formed XML that is not a valid property list.
    #[error("invalid plist: {0}")]
    Invalid(String),
}

/// Raw element collected while tokenizing, before plist typing is applied.
struct Element {
    tag: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(tag: String) -> Self {
        Self {
            tag,
            text: String::new(),
            children: Vec::new(),
        }
    }
}

/// Parse an XML property list document into its root [`Value`].
pub fn parse(xml: &[u8]) -> Result<Value, ParseError> {
    let root = parse_elements(xml)?;
    if root.tag != "plist" {
        return Err(ParseError::Invalid(format!(
            "root element is <{}>, expected <plist>",
            root.tag
        )));
    }

    let mut children = root.children.into_iter();
    let value = children
        .next()
        .ok_or_else(|| ParseError::Invalid("<plist> has no value".to_string()))?;
    if children.next().is_some() {
        return Err(ParseError::Invalid(
            "<plist> holds more than one value".to_string(),
        ));
    }
    element_to_value(value)
}

/// Parse a property list file into its root [`Value`].
pub fn parse_file(path: &Path) -> Result<Value, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

fn parse_elements(xml: &[u8]) -> Result<Element, ParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                stack.push(Element::new(qname_to_string(e.name())?));
            }
            Event::Empty(e) => {
                let element = Element::new(qname_to_string(e.name())?);
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(std::str::from_utf8(e.as_ref())?);
                }
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::Malformed(
            "unclosed element(s) at end of document".to_string(),
        ));
    }

    root.ok_or_else(|| ParseError::Malformed("no root element found".to_string()))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(ParseError::Malformed(
            "multiple top-level elements found".to_string(),
        ));
    }
    Ok(())
}

fn element_to_value(element: Element) -> Result<Value, ParseError> {
    match element.tag.as_str() {
        "dict" => {
            let mut dict = Dict::new();
            let mut children = element.children.into_iter();
            while let Some(key) = children.next() {
                if key.tag != "key" {
                    return Err(ParseError::Invalid(format!(
                        "expected <key> inside <dict>, found <{}>",
                        key.tag
                    )));
                }
                let value = children.next().ok_or_else(|| {
                    ParseError::Invalid(format!("key '{}' has no value", key.text))
                })?;
                dict.insert(key.text, element_to_value(value)?);
            }
            Ok(Value::Dict(dict))
        }
        "array" => element
            .children
            .into_iter()
            .map(element_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        "string" => Ok(Value::String(element.text)),
        "integer" => {
            let text = element.text.trim();
            text.parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| ParseError::Invalid(format!("invalid <integer> value '{text}'")))
        }
        "real" => {
            let text = element.text.trim();
            text.parse::<f64>()
                .map(Value::Real)
                .map_err(|_| ParseError::Invalid(format!("invalid <real> value '{text}'")))
        }
        "true" => Ok(Value::Boolean(true)),
        "false" => Ok(Value::Boolean(false)),
        "data" => Ok(Value::Data(
            element
                .text
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect(),
        )),
        "date" => Ok(Value::Date(element.text.trim().to_string())),
        other => Err(ParseError::Invalid(format!(
            "unsupported plist element <{other}>"
        ))),
    }
}

fn qname_to_string(name: QName<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}
