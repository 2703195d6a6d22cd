// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Decoded form of a values subtree. Scalars are decoded strictly by their tag.

#[cfg(test)]
mod tests;

use std::{collections::BTreeMap, io};

use saphyr::Yaml;
use serde::Serialize;
use serde_json::ser::Formatter;

use crate::ast::{NodeKind, ScalarNode, ScalarTag, ValueNode};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(String),
    List(Vec<DecodedValue>),
    // Sorted by key, so that rendered objects don't depend on source order.
    Object(BTreeMap<String, DecodedValue>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum DecodeError {
    // The scalar's content doesn't match its tag (e.g. `!!int foo`).
    Mismatch { tag: ScalarTag, value: String },
    UnsupportedTag { tag: String },
    // Mapping keys must be scalars to be used as object members.
    ComplexKey,
}

// Resolves the tag of an untagged plain scalar.
pub fn resolve_plain_tag(value: &str) -> ScalarTag {
    match value {
        "" | "~" | "null" | "Null" | "NULL" => return ScalarTag::Null,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => return ScalarTag::Bool,
        _ => {}
    }

    match Yaml::from_str(value) {
        Yaml::Integer(_) => ScalarTag::Int,
        // Rust's float parser also accepts words like `inf` and `nan`, which are strings in YAML.
        Yaml::Real(_) if looks_numeric(value) => ScalarTag::Float,
        _ => ScalarTag::Str,
    }
}

// Resolves the tag name of an explicitly tagged scalar (e.g. `!!int` or `tag:yaml.org,2002:int`).
pub fn resolve_explicit_tag(tag: &str) -> ScalarTag {
    let name = tag
        .strip_prefix("tag:yaml.org,2002:")
        .or_else(|| tag.strip_prefix("!!"));

    match name {
        Some("null") => ScalarTag::Null,
        Some("bool") => ScalarTag::Bool,
        Some("int") => ScalarTag::Int,
        Some("float") => ScalarTag::Float,
        Some("str") => ScalarTag::Str,
        Some("timestamp") => ScalarTag::Timestamp,
        _ => ScalarTag::Other(tag.to_string()),
    }
}

fn looks_numeric(value: &str) -> bool {
    value.bytes().any(|b| b.is_ascii_digit()) || value.trim_start_matches(['+', '-']).starts_with('.')
}

pub fn decode_scalar(scalar: &ScalarNode) -> Result<DecodedValue, DecodeError> {
    let mismatch = || DecodeError::Mismatch {
        tag: scalar.tag.clone(),
        value: scalar.value.clone(),
    };

    match &scalar.tag {
        ScalarTag::Null => Ok(DecodedValue::Null),
        ScalarTag::Str | ScalarTag::Timestamp => Ok(DecodedValue::String(scalar.value.clone())),
        ScalarTag::Bool => match scalar.value.as_str() {
            "true" | "True" | "TRUE" => Ok(DecodedValue::Boolean(true)),
            "false" | "False" | "FALSE" => Ok(DecodedValue::Boolean(false)),
            _ => Err(mismatch()),
        },
        ScalarTag::Int => match Yaml::from_str(&scalar.value) {
            Yaml::Integer(value) => Ok(DecodedValue::Integer(value)),
            _ => Err(mismatch()),
        },
        ScalarTag::Float => {
            if !looks_numeric(&scalar.value) {
                return Err(mismatch());
            }

            let yaml = Yaml::from_str(&scalar.value);
            match yaml {
                Yaml::Integer(value) => Ok(DecodedValue::Real(value as f64)),
                Yaml::Real(_) => yaml.as_f64().map(DecodedValue::Real).ok_or_else(mismatch),
                _ => Err(mismatch()),
            }
        }
        ScalarTag::Other(tag) => Err(DecodeError::UnsupportedTag { tag: tag.clone() }),
    }
}

// Decodes a whole subtree, following aliases.
pub fn decode_node(node: &ValueNode) -> Result<DecodedValue, DecodeError> {
    match &node.kind {
        NodeKind::Alias(target) => decode_node(target),
        NodeKind::Scalar(scalar) => decode_scalar(scalar),
        NodeKind::Sequence(seq) => {
            let mut values = Vec::new();
            for value in &seq.values {
                values.push(decode_node(value)?);
            }
            Ok(DecodedValue::List(values))
        }
        NodeKind::Mapping(map) => {
            let mut entries = BTreeMap::new();
            for entry in &map.entries {
                let Some(key) = entry.key.resolve().as_scalar() else {
                    return Err(DecodeError::ComplexKey);
                };
                let value = decode_node(&entry.value)?;
                entries.insert(key.value.clone(), value);
            }
            Ok(DecodedValue::Object(entries))
        }
    }
}

impl DecodedValue {
    pub fn empty_list() -> DecodedValue {
        DecodedValue::List(Vec::new())
    }

    pub fn empty_object() -> DecodedValue {
        DecodedValue::Object(BTreeMap::new())
    }

    fn is_finite(&self) -> bool {
        match self {
            DecodedValue::Real(value) => value.is_finite(),
            DecodedValue::List(values) => values.iter().all(DecodedValue::is_finite),
            DecodedValue::Object(entries) => entries.values().all(DecodedValue::is_finite),
            DecodedValue::Null | DecodedValue::Boolean(_) | DecodedValue::Integer(_) | DecodedValue::String(_) => true,
        }
    }

    // Renders the value as compact JSON, without HTML escaping and without a trailing newline.
    pub fn to_json(&self) -> Result<String, String> {
        if !self.is_finite() {
            return Err("json: unsupported value: non-finite float".to_string());
        }

        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, NumberFormatter);
        self.serialize(&mut serializer).map_err(|err| err.to_string())?;

        let out = String::from_utf8(out).map_err(|err| err.to_string())?;
        Ok(out.trim_end_matches('\n').to_string())
    }
}

// Writes floats the same way Go's encoding/json does, so that integral floats don't get a `.0` suffix.
struct NumberFormatter;

impl Formatter for NumberFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(format_float(value).as_bytes())
    }
}

pub fn format_float(value: f64) -> String {
    let abs = value.abs();
    if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        };
    }

    value.to_string()
}
