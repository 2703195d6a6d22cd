// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::value::DecodedValue;

static NIL_VALUE_TYPE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\((.*?)\)").unwrap());

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Float,
    Int,
    List,
    Object,
    String,
    // Declared in a comment, e.g. `# -- (list) the birds`. Not checked against the known names.
    Explicit(String),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Bool => f.write_str("bool"),
            ValueType::Float => f.write_str("float"),
            ValueType::Int => f.write_str("int"),
            ValueType::List => f.write_str("list"),
            ValueType::Object => f.write_str("object"),
            ValueType::String => f.write_str("string"),
            ValueType::Explicit(name) => f.write_str(name),
        }
    }
}

impl ValueType {
    pub fn from_name(name: &str) -> ValueType {
        match name {
            "bool" => ValueType::Bool,
            "float" => ValueType::Float,
            "int" => ValueType::Int,
            "list" => ValueType::List,
            "object" => ValueType::Object,
            "" | "string" => ValueType::String,
            _ => ValueType::Explicit(name.to_string()),
        }
    }

    pub fn of(value: &DecodedValue) -> ValueType {
        match value {
            DecodedValue::Boolean(_) => ValueType::Bool,
            DecodedValue::Real(_) => ValueType::Float,
            DecodedValue::Integer(_) => ValueType::Int,
            DecodedValue::String(_) => ValueType::String,
            DecodedValue::List(_) => ValueType::List,
            DecodedValue::Object(_) => ValueType::Object,
            // Nulls without a declared type are documented as strings.
            DecodedValue::Null => ValueType::String,
        }
    }
}

// Splits a leading `(typeName)` off a description, together with the separator that follows it.
pub fn split_type_prefix(description: &str) -> Option<(&str, &str)> {
    let captures = NIL_VALUE_TYPE_REGEX.captures(description)?;
    let whole = captures.get(0)?;
    let type_name = captures.get(1)?.as_str();

    let mut rest = description[whole.end()..].chars();
    if rest.clone().next().is_some_and(char::is_whitespace) {
        rest.next();
    }

    Some((type_name, rest.as_str()))
}

// Type and description of a row whose value is null.
pub fn nil_value_type(description: &str) -> (ValueType, String) {
    match split_type_prefix(description) {
        Some((type_name, rest)) => (ValueType::from_name(type_name), rest.to_string()),
        None => (ValueType::String, description.to_string()),
    }
}
