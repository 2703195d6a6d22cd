// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::ast::SourceLocation;

// Every variant is terminal for the values file that produced it.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error("values file {} does not exist", path.display())]
    MissingSource { path: PathBuf },

    #[error("failed to read values file {}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{filename}: invalid yaml: {message}")]
    Parse { filename: String, message: String },

    #[error("{location} {message}")]
    Structural { location: String, message: String },

    #[error("{location} cannot decode {value:?} as {tag} for {key}")]
    Decode {
        location: String,
        key: String,
        tag: String,
        value: String,
    },

    #[error("{location} invalid node type {kind} received for {key}")]
    InvalidNode {
        location: String,
        key: String,
        kind: String,
    },

    #[error("failed to marshal default value for {key} to json: {message}")]
    Render { key: String, message: String },

    #[error("failed to read template file {}", path.display())]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render template {name}")]
    Template {
        name: String,
        #[source]
        source: tera::Error,
    },
}

pub fn format_location(filename: &str, src_loc: &SourceLocation) -> String {
    format!("{}:{}:{}", filename, src_loc.line, src_loc.col)
}
