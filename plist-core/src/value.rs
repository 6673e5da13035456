use std::collections::BTreeMap;

use serde::Serialize;

/// Dictionary body of a plist `<dict>`. Keys are kept sorted, which is also
/// the order they are written back out in.
pub type Dict = BTreeMap<String, Value>;

/// A property list value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// `<dict>` of `<key>`/value pairs.
    Dict(Dict),
    /// `<array>` of values.
    Array(Vec<Value>),
    /// `<string>` text.
    String(String),
    /// `<integer>` value.
    Integer(i64),
    /// `<real>` value.
    Real(f64),
    /// `<true/>` or `<false/>`.
    Boolean(bool),
    /// `<data>` payload, kept as its base64 text with whitespace removed.
    Data(String),
    /// `<date>` payload, kept as its ISO 8601 text.
    Date(String),
}

impl Value {
    /// Element name used for this value in the XML encoding.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Dict(_) => "dict",
            Value::Array(_) => "array",
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Boolean(true) => "true",
            Value::Boolean(false) => "false",
            Value::Data(_) => "data",
            Value::Date(_) => "date",
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Look up `key` when this value is a dictionary.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_dict().and_then(|dict| dict.get(key))
    }

    /// Walk nested dictionary keys and return the terminal value if found.
    pub fn get_path<'a>(&'a self, path: &[&str]) -> Option<&'a Value> {
        let mut current = self;
        for segment in path {
            current = current.get(segment)?;
        }
        Some(current)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Boolean(flag)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Dict> for Value {
    fn from(dict: Dict) -> Self {
        Value::Dict(dict)
    }
}
