// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod walker_run;


use std::rc::Rc;

use serde::Serialize;

use crate::{ast::ValueNode, error::DocsError};

use walker_run::WalkerRun;

// One documented key of a values file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValueRow {
    pub key: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub default: String,
    pub description: String,
    pub line: usize,
    pub column: usize,
}

// Walks a document's root and returns its rows in encounter order.
pub fn create_value_rows(filename: &Rc<String>, root: &ValueNode) -> Result<Vec<ValueRow>, DocsError> {
    let walker_run = WalkerRun::new(filename.clone());
    walker_run.create_value_rows_from_field("", None, root, true)
}
