// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Value tree of a parsed values file.

use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct ValuesFile {
    pub filename: Rc<String>,
    pub docs: Vec<ValuesDocument>,
}

#[derive(Clone, Debug)]
pub struct ValuesDocument {
    pub src_loc: SourceLocation,
    pub root: ValueNode,
}

#[derive(Clone, Debug)]
pub struct ValueNode {
    pub src_loc: SourceLocation,
    // Raw comment lines directly above the node. Only filled in for mapping keys and sequence items.
    pub comment: Vec<String>,
    pub kind: NodeKind,
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    Mapping(MappingNode),
    Sequence(SequenceNode),
    Alias(Rc<ValueNode>),
    Scalar(ScalarNode),
}

#[derive(Clone, Debug)]
pub struct MappingNode {
    pub entries: Vec<MapEntry>,
}

#[derive(Clone, Debug)]
pub struct MapEntry {
    pub key: ValueNode,
    pub value: ValueNode,
}

#[derive(Clone, Debug)]
pub struct SequenceNode {
    pub values: Vec<ValueNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarNode {
    pub value: String,
    pub tag: ScalarTag,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScalarTag {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Timestamp,
    // Any tag outside of the YAML core schema, e.g. `!!binary` or `!custom`.
    Other(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub index: usize,
    pub line: usize,
    pub col: usize,
}

impl ValueNode {
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Mapping(_) => "mapping",
            NodeKind::Sequence(_) => "sequence",
            NodeKind::Alias(_) => "alias",
            NodeKind::Scalar(_) => "scalar",
        }
    }

    // Follows aliases until a concrete node is reached.
    pub fn resolve(&self) -> &ValueNode {
        match &self.kind {
            NodeKind::Alias(target) => target.resolve(),
            _ => self,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarNode> {
        match &self.kind {
            NodeKind::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }
}

impl ScalarTag {
    pub fn name(&self) -> &str {
        match self {
            ScalarTag::Null => "!!null",
            ScalarTag::Bool => "!!bool",
            ScalarTag::Int => "!!int",
            ScalarTag::Float => "!!float",
            ScalarTag::Str => "!!str",
            ScalarTag::Timestamp => "!!timestamp",
            ScalarTag::Other(tag) => tag,
        }
    }
}
