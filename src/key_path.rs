// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Key paths of value rows, e.g. `animals.byTrait[2]."stupidchess.jmn23.com"`.

#[cfg(test)]
mod tests;

use std::fmt;

use anyhow::{anyhow, Error};
use chumsky::prelude::*;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeySegment {
    Field(String),
    Index(usize),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPath {
    pub segments: Vec<KeySegment>,
}

pub fn format_next_list_key_prefix(prefix: &str, index: usize) -> String {
    format!("{}[{}]", prefix, index)
}

pub fn format_next_object_key_prefix(prefix: &str, key: &str) -> String {
    let escaped_key = if key.contains('.') || key.contains(' ') {
        format!("\"{}\"", key)
    } else {
        key.to_string()
    };

    if prefix.is_empty() {
        escaped_key
    } else {
        format!("{}.{}", prefix, escaped_key)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prefix = String::new();
        for segment in &self.segments {
            prefix = match segment {
                KeySegment::Field(name) => format_next_object_key_prefix(&prefix, name),
                KeySegment::Index(index) => format_next_list_key_prefix(&prefix, *index),
            };
        }
        f.write_str(&prefix)
    }
}

pub fn parse_key_path(input: &str) -> Result<KeyPath, Error> {
    let parser = gen_key_path_parser();
    let res = parser.parse(input);
    match res {
        Ok(path) => Ok(path),
        Err(errs) => {
            for err in &errs {
                debug!("key path {:?}: {}", input, err);
            }
            Err(anyhow!("key path parse errors (count={})", errs.len()))
        }
    }
}

fn gen_key_path_parser() -> impl Parser<char, KeyPath, Error = Simple<char>> {
    let quoted = just('"')
        .ignore_then(filter(|c: &char| *c != '"').repeated().at_least(1))
        .then_ignore(just('"'))
        .collect::<String>()
        .labelled("quoted key");

    let bare = filter(|c: &char| !matches!(c, '.' | '[' | ']' | '"' | ' '))
        .repeated()
        .at_least(1)
        .collect::<String>()
        .labelled("key");

    let field = quoted.or(bare).map(KeySegment::Field);

    let index = text::int(10)
        .delimited_by(just('['), just(']'))
        .try_map(|digits: String, span| {
            digits
                .parse::<usize>()
                .map(KeySegment::Index)
                .map_err(|err| Simple::custom(span, err.to_string()))
        })
        .labelled("index");

    let member = just('.').ignore_then(field.clone());

    field
        .or(index.clone())
        .then(member.or(index).repeated())
        .map(|(head, rest)| {
            let mut segments = vec![head];
            segments.extend(rest);
            KeyPath { segments }
        })
        .then_ignore(end())
}
