use std::fs;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::value::Value;

const DOCTYPE: &str =
    r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;

/// Errors that can occur while writing a property list document.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to serialize XML bytes.
    #[error("failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Failed to write output file.
    #[error("failed to write plist file: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize `value` as a complete XML property list document.
pub fn write(value: &Value) -> Result<Vec<u8>, WriteError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;

    let mut plist = BytesStart::new("plist");
    plist.push_attribute(("version", "1.0"));
    writer.write_event(Event::Start(plist))?;
    write_value(&mut writer, value)?;
    writer.write_event(Event::End(BytesEnd::new("plist")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// Serialize `value` and write it to `path`.
pub fn write_file(value: &Value, path: &Path) -> Result<(), WriteError> {
    let bytes = write(value)?;
    fs::write(path, bytes)?;
    Ok(())
}

fn write_value(writer: &mut Writer<Vec<u8>>, value: &Value) -> Result<(), quick_xml::Error> {
    match value {
        Value::Dict(dict) if dict.is_empty() => empty(writer, "dict"),
        Value::Dict(dict) => {
            writer.write_event(Event::Start(BytesStart::new("dict")))?;
            for (key, item) in dict {
                text_element(writer, "key", key)?;
                write_value(writer, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new("dict")))?;
            Ok(())
        }
        Value::Array(items) if items.is_empty() => empty(writer, "array"),
        Value::Array(items) => {
            writer.write_event(Event::Start(BytesStart::new("array")))?;
            for item in items {
                write_value(writer, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new("array")))?;
            Ok(())
        }
        Value::String(text) => text_element(writer, "string", text),
        Value::Integer(n) => text_element(writer, "integer", &n.to_string()),
        Value::Real(n) => text_element(writer, "real", &n.to_string()),
        Value::Boolean(_) => empty(writer, value.type_name()),
        Value::Data(text) => text_element(writer, "data", text),
        Value::Date(text) => text_element(writer, "date", text),
    }
}

fn text_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    if text.is_empty() {
        return empty(writer, tag);
    }
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn empty(writer: &mut Writer<Vec<u8>>, tag: &str) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Empty(BytesStart::new(tag)))?;
    Ok(())
}
