// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Parses documentation comments.
//
//   # -- The description, which may continue
//   # on the following lines.
//   # @default -- A default that is displayed verbatim
//   key: value
//
// A comment block may also name its key explicitly (`# some.key -- description`). Such blocks don't
// describe the node below them and are only collected by `parse_keyed_comments`.

#[cfg(test)]
mod tests;

use hashlink::LinkedHashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::{key_path::parse_key_path, value_type::split_type_prefix};

static DESCRIPTION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\s*--\s*(.*)$").unwrap());
static KEYED_DESCRIPTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#\s*([^@\s].*?)\s+--\s*(.*)$").unwrap());
static DEFAULT_VALUE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\s*@default\s*--\s*(.*)$").unwrap());
static CONTINUATION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*# (.*)$").unwrap());

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Description {
    pub description: String,
    pub default: Option<String>,
    // Leading `(typeName)` of the description. Only honored for null values.
    pub type_override: Option<String>,
}

enum StartLine {
    Structural(String),
    Keyed(String, String),
}

fn match_start_line(line: &str) -> Option<StartLine> {
    if let Some(captures) = DESCRIPTION_REGEX.captures(line) {
        return Some(StartLine::Structural(captures[1].to_string()));
    }

    if DEFAULT_VALUE_REGEX.is_match(line) {
        return None;
    }

    let captures = KEYED_DESCRIPTION_REGEX.captures(line)?;
    Some(StartLine::Keyed(captures[1].to_string(), captures[2].to_string()))
}

fn is_block_line(line: &str) -> bool {
    DEFAULT_VALUE_REGEX.is_match(line) || CONTINUATION_REGEX.is_match(line)
}

impl Description {
    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}

// Parses a contiguous comment block. When several description groups are present, the last one wins.
// Returns the key named by the block, if any.
pub fn parse_comment<S: AsRef<str>>(lines: &[S]) -> (Option<String>, Description) {
    let mut start = None;
    for (i, line) in lines.iter().enumerate() {
        if let Some(start_line) = match_start_line(line.as_ref()) {
            start = Some((i, start_line));
        }
    }

    // Comments without a description marker don't document anything.
    let Some((start_index, start_line)) = start else {
        return (None, Description::default());
    };

    let (key, mut description) = match start_line {
        StartLine::Structural(text) => (None, text),
        StartLine::Keyed(key, text) => (Some(key), text),
    };

    let mut default = None;
    for line in &lines[start_index + 1..] {
        let line = line.as_ref();

        if let Some(captures) = DEFAULT_VALUE_REGEX.captures(line) {
            default = Some(captures[1].to_string());
            continue;
        }

        if let Some(captures) = CONTINUATION_REGEX.captures(line) {
            if !description.is_empty() {
                description.push(' ');
            }
            description.push_str(&captures[1]);
        }
    }

    let description = description.trim_end().to_string();
    let type_override = split_type_prefix(&description).map(|(type_name, _)| type_name.to_string());
    let default = default.map(|default| default.trim_end().to_string()).filter(|default| !default.is_empty());

    let key = key.filter(|key| !key.is_empty());
    let desc = Description {
        description,
        default,
        type_override,
    };
    (key, desc)
}

// Description attached to a node through its leading comment.
pub fn structural_description<S: AsRef<str>>(lines: &[S]) -> Description {
    if lines.is_empty() {
        return Description::default();
    }

    match parse_comment(lines) {
        (None, desc) => desc,
        // Keyed comments are collected separately.
        (Some(_), _) => Description::default(),
    }
}

// Collects every keyed comment block (`# key -- description`) in the source, in source order.
pub fn parse_keyed_comments(source: &str) -> LinkedHashMap<String, Description> {
    let mut descriptions = LinkedHashMap::new();
    let mut block: Vec<&str> = Vec::new();

    let mut flush = |block: &mut Vec<&str>| {
        if block.is_empty() {
            return;
        }

        if let (Some(key), desc) = parse_comment(block.as_slice()) {
            let key = match parse_key_path(&key) {
                Ok(path) => path.to_string(),
                Err(_) => key,
            };
            descriptions.insert(key, desc);
        }
        block.clear();
    };

    for line in source.lines() {
        match match_start_line(line) {
            Some(StartLine::Keyed(..)) => {
                flush(&mut block);
                block.push(line);
            }
            Some(StartLine::Structural(_)) => flush(&mut block),
            None if !block.is_empty() && is_block_line(line) => block.push(line),
            None => flush(&mut block),
        }
    }
    flush(&mut block);

    descriptions
}
