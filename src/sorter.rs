// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::{cmp::Ordering, fmt};

use tracing::{debug, warn};

use crate::walker::ValueRow;

pub const FILE_SORT_ORDER: &str = "file";
pub const ALPHANUM_SORT_ORDER: &str = "alphanum";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    // By source line, then column.
    File,
    // By key path.
    #[default]
    AlphaNum,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::File => f.write_str(FILE_SORT_ORDER),
            SortOrder::AlphaNum => f.write_str(ALPHANUM_SORT_ORDER),
        }
    }
}

impl SortOrder {
    // Unrecognized values fall back to alphanumeric order.
    pub fn from_setting(value: &str) -> SortOrder {
        match value {
            FILE_SORT_ORDER => SortOrder::File,
            ALPHANUM_SORT_ORDER => SortOrder::AlphaNum,
            "" => {
                debug!("No sort order provided, defaulting to {}", ALPHANUM_SORT_ORDER);
                SortOrder::AlphaNum
            }
            _ => {
                warn!("Invalid sort order `{}`, defaulting to {}", value, ALPHANUM_SORT_ORDER);
                SortOrder::AlphaNum
            }
        }
    }
}

pub fn sort_value_rows(rows: &mut [ValueRow], order: SortOrder) {
    match order {
        SortOrder::File => rows.sort_by(compare_position),
        SortOrder::AlphaNum => rows.sort_by(|a, b| a.key.cmp(&b.key)),
    }
}

fn compare_position(a: &ValueRow, b: &ValueRow) -> Ordering {
    a.line.cmp(&b.line).then_with(|| a.column.cmp(&b.column))
}
