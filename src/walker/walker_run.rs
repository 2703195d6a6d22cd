// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::rc::Rc;

use tracing::trace;

use crate::{
    annotation::{structural_description, Description},
    ast::{MappingNode, NodeKind, ScalarNode, ScalarTag, SequenceNode, SourceLocation, ValueNode},
    error::{format_location, DocsError},
    key_path::{format_next_list_key_prefix, format_next_object_key_prefix},
    value::{decode_node, decode_scalar, DecodeError, DecodedValue},
    value_type::{nil_value_type, ValueType},
};

use super::ValueRow;

pub struct WalkerRun {
    filename: Rc<String>,
}

impl WalkerRun {
    pub fn new(filename: Rc<String>) -> WalkerRun {
        WalkerRun { filename }
    }

    // `key` is the node that documents `value`: the mapping key, or the element itself inside a list.
    // `document_leaf_nodes` is cleared for everything below a described container.
    pub fn create_value_rows_from_field(
        &self,
        prefix: &str,
        key: Option<&ValueNode>,
        value: &ValueNode,
        document_leaf_nodes: bool,
    ) -> Result<Vec<ValueRow>, DocsError> {
        match &value.kind {
            NodeKind::Mapping(mapping) => {
                self.create_value_rows_from_object(prefix, key, value, mapping, document_leaf_nodes)
            }
            NodeKind::Sequence(sequence) => {
                self.create_value_rows_from_list(prefix, key, value, sequence, document_leaf_nodes)
            }
            NodeKind::Alias(target) => self.create_value_rows_from_field(prefix, key, target, document_leaf_nodes),
            NodeKind::Scalar(scalar) => self.create_value_rows_from_scalar(prefix, key, value, scalar, document_leaf_nodes),
        }
    }

    fn create_value_rows_from_object(
        &self,
        prefix: &str,
        key: Option<&ValueNode>,
        value: &ValueNode,
        mapping: &MappingNode,
        mut document_leaf_nodes: bool,
    ) -> Result<Vec<ValueRow>, DocsError> {
        let description = Self::description_of(key);
        let src_loc = key.unwrap_or(value).src_loc;

        if mapping.entries.is_empty() {
            // A values file without any keys has nothing to document.
            if prefix.is_empty() {
                return Ok(Vec::new());
            }

            if !(document_leaf_nodes || description.has_description()) {
                return Ok(Vec::new());
            }

            let row = self.create_value_row(prefix, &DecodedValue::empty_object(), description, &src_loc)?;
            return Ok(vec![row]);
        }

        let mut rows = Vec::new();

        // A described object is documented as a whole. Below it, only described fields are documented.
        if description.has_description() {
            let decoded = decode_node(value).map_err(|err| self.decode_error(err, prefix, value))?;
            let row = self.create_value_row(prefix, &decoded, description, &src_loc)?;
            rows.push(row);
            document_leaf_nodes = false;
        }

        for entry in &mapping.entries {
            let Some(entry_key) = entry.key.resolve().as_scalar() else {
                return Err(DocsError::Structural {
                    location: format_location(&self.filename, &entry.key.src_loc),
                    message: format!("mapping keys must be scalars, found {}", entry.key.resolve().kind_name()),
                });
            };

            let next_prefix = format_next_object_key_prefix(prefix, &entry_key.value);
            let entry_rows =
                self.create_value_rows_from_field(&next_prefix, Some(&entry.key), &entry.value, document_leaf_nodes)?;
            rows.extend(entry_rows);
        }

        Ok(rows)
    }

    fn create_value_rows_from_list(
        &self,
        prefix: &str,
        key: Option<&ValueNode>,
        value: &ValueNode,
        sequence: &SequenceNode,
        mut document_leaf_nodes: bool,
    ) -> Result<Vec<ValueRow>, DocsError> {
        let description = Self::description_of(key);
        let src_loc = key.unwrap_or(value).src_loc;

        if sequence.values.is_empty() {
            if !(document_leaf_nodes || description.has_description()) {
                return Ok(Vec::new());
            }

            let row = self.create_value_row(prefix, &DecodedValue::empty_list(), description, &src_loc)?;
            return Ok(vec![row]);
        }

        let mut rows = Vec::new();

        if description.has_description() {
            let decoded = decode_node(value).map_err(|err| self.decode_error(err, prefix, value))?;
            let row = self.create_value_row(prefix, &decoded, description, &src_loc)?;
            rows.push(row);
            document_leaf_nodes = false;
        }

        for (i, item) in sequence.values.iter().enumerate() {
            let next_prefix = format_next_list_key_prefix(prefix, i);
            let item_rows = self.create_value_rows_from_field(&next_prefix, Some(item), item, document_leaf_nodes)?;
            rows.extend(item_rows);
        }

        Ok(rows)
    }

    fn create_value_rows_from_scalar(
        &self,
        prefix: &str,
        key: Option<&ValueNode>,
        value: &ValueNode,
        scalar: &ScalarNode,
        document_leaf_nodes: bool,
    ) -> Result<Vec<ValueRow>, DocsError> {
        let description = Self::description_of(key);
        if !document_leaf_nodes && !description.has_description() {
            trace!("skipping undocumented value {}", prefix);
            return Ok(Vec::new());
        }

        let src_loc = key.unwrap_or(value).src_loc;

        if let ScalarTag::Other(tag) = &scalar.tag {
            return Err(DocsError::InvalidNode {
                location: format_location(&self.filename, &src_loc),
                key: prefix.to_string(),
                kind: tag.clone(),
            });
        }

        let decoded = decode_scalar(scalar).map_err(|err| self.decode_error(err, prefix, key.unwrap_or(value)))?;
        let row = self.create_value_row(prefix, &decoded, description, &src_loc)?;
        Ok(vec![row])
    }

    fn create_value_row(
        &self,
        key: &str,
        value: &DecodedValue,
        description: Description,
        src_loc: &SourceLocation,
    ) -> Result<ValueRow, DocsError> {
        // Null values may declare their type in the description, e.g. `# -- (list) the birds`.
        if let DecodedValue::Null = value {
            let (value_type, description_text) = nil_value_type(&description.description);
            let row = ValueRow {
                key: key.to_string(),
                value_type: value_type.to_string(),
                default: description.default.unwrap_or_else(|| "`nil`".to_string()),
                description: description_text,
                line: src_loc.line,
                column: src_loc.col,
            };
            return Ok(row);
        }

        let default = match description.default {
            Some(default) => default,
            None => {
                let json = value.to_json().map_err(|message| DocsError::Render {
                    key: key.to_string(),
                    message,
                })?;
                format!("`{}`", json)
            }
        };

        let row = ValueRow {
            key: key.to_string(),
            value_type: ValueType::of(value).to_string(),
            default,
            description: description.description,
            line: src_loc.line,
            column: src_loc.col,
        };
        Ok(row)
    }

    fn description_of(key: Option<&ValueNode>) -> Description {
        match key {
            Some(key) => structural_description(key.comment.as_slice()),
            None => Description::default(),
        }
    }

    fn decode_error(&self, err: DecodeError, key: &str, node: &ValueNode) -> DocsError {
        let location = format_location(&self.filename, &node.src_loc);
        match err {
            DecodeError::Mismatch { tag, value } => DocsError::Decode {
                location,
                key: key.to_string(),
                tag: tag.name().to_string(),
                value,
            },
            DecodeError::UnsupportedTag { tag } => DocsError::InvalidNode {
                location,
                key: key.to_string(),
                kind: tag,
            },
            DecodeError::ComplexKey => DocsError::Structural {
                location,
                message: format!("mapping keys must be scalars in {}", key),
            },
        }
    }
}
