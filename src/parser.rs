// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Builds the value tree of a values file from the YAML event stream.


use std::{
    collections::{HashMap, HashSet},
    rc::Rc,
    str::Chars,
};

use saphyr_parser::{Event, Marker, Parser as YamlParser, ScanError, TScalarStyle, Tag};

use crate::{
    ast::{
        MapEntry, MappingNode, NodeKind, ScalarNode, ScalarTag, SequenceNode, SourceLocation, ValueNode,
        ValuesDocument, ValuesFile,
    },
    error::{format_location, DocsError},
    value::{resolve_explicit_tag, resolve_plain_tag},
};

pub fn parse_values_str(filename: &str, input: &str) -> Result<ValuesFile, DocsError> {
    let mut run = ParserRun::new(filename, input);
    run.parse(input)
}

struct ParserRun<'a> {
    filename: Rc<String>,
    lines: Vec<&'a str>,
    anchors: HashMap<usize, Rc<ValueNode>>,
    // Lines whose leading comment block has already been given to a node.
    claimed_lines: HashSet<usize>,
}

impl<'a> ParserRun<'a> {
    fn new(filename: &str, input: &'a str) -> ParserRun<'a> {
        ParserRun {
            filename: Rc::new(filename.to_string()),
            lines: input.lines().collect(),
            anchors: HashMap::new(),
            claimed_lines: HashSet::new(),
        }
    }

    fn parse(&mut self, input: &str) -> Result<ValuesFile, DocsError> {
        let yaml_parser = &mut YamlParser::new(input.chars());

        // Parse StreamStart.
        let (evt_strm_start, mark) = self.next_event(yaml_parser)?;
        if evt_strm_start != Event::StreamStart {
            return Err(self.unexpected_event(&evt_strm_start, &mark));
        }

        // Parse docs.
        let mut docs = Vec::new();
        loop {
            let (event, mark) = self.peek_event(yaml_parser)?;
            match event {
                Event::DocumentStart => {
                    let doc = self.parse_yaml_doc(yaml_parser)?;
                    docs.push(doc);
                }
                Event::StreamEnd => break,
                event => return Err(self.unexpected_event(&event, &mark)),
            }
        }

        // Parse StreamEnd.
        self.next_event(yaml_parser)?;

        // Return result.
        let file = ValuesFile {
            filename: self.filename.clone(),
            docs,
        };
        Ok(file)
    }

    fn parse_yaml_doc(&mut self, yaml_parser: &mut YamlParser<Chars>) -> Result<ValuesDocument, DocsError> {
        // Parse DocumentStart.
        let (_, start) = self.next_event(yaml_parser)?;

        // Parse node. The root has no key, so nothing documents it.
        let root = self.parse_node(yaml_parser, false)?;

        // Parse DocumentEnd.
        let (doc_end, mark) = self.next_event(yaml_parser)?;
        if doc_end != Event::DocumentEnd {
            return Err(self.unexpected_event(&doc_end, &mark));
        }

        // Return result.
        let doc = ValuesDocument {
            src_loc: Self::to_source_location(&start),
            root,
        };
        Ok(doc)
    }

    // Mapping keys and sequence items take the comment block written above them.
    fn parse_node(
        &mut self,
        yaml_parser: &mut YamlParser<Chars>,
        attach_comment: bool,
    ) -> Result<ValueNode, DocsError> {
        let (event, mark) = self.peek_event(yaml_parser)?;
        match event {
            Event::SequenceStart(..) => self.parse_sequence(yaml_parser, attach_comment),
            Event::MappingStart(..) => self.parse_mapping(yaml_parser, attach_comment),
            Event::Scalar(..) => self.parse_scalar(yaml_parser, attach_comment),
            Event::Alias(_) => self.parse_alias(yaml_parser, attach_comment),
            event => Err(self.unexpected_event(&event, &mark)),
        }
    }

    fn parse_sequence(
        &mut self,
        yaml_parser: &mut YamlParser<Chars>,
        attach_comment: bool,
    ) -> Result<ValueNode, DocsError> {
        // Parse SequenceStart.
        let (seq_start, start) = self.next_event(yaml_parser)?;
        let Event::SequenceStart(anchor_id, _) = seq_start else {
            return Err(self.unexpected_event(&seq_start, &start));
        };
        let comment = self.take_comment(attach_comment, start.line());

        // Parse nodes.
        let mut values = Vec::new();
        loop {
            let (event, _) = self.peek_event(yaml_parser)?;
            if event == Event::SequenceEnd {
                break;
            }

            let value = self.parse_node(yaml_parser, true)?;
            values.push(value);
        }

        // Parse SequenceEnd.
        self.next_event(yaml_parser)?;

        // Return result.
        let node = ValueNode {
            src_loc: Self::to_source_location(&start),
            comment,
            kind: NodeKind::Sequence(SequenceNode { values }),
        };
        self.register_anchor(anchor_id, &node);
        Ok(node)
    }

    fn parse_mapping(
        &mut self,
        yaml_parser: &mut YamlParser<Chars>,
        attach_comment: bool,
    ) -> Result<ValueNode, DocsError> {
        // Parse MappingStart.
        let (map_start, start) = self.next_event(yaml_parser)?;
        let Event::MappingStart(anchor_id, _) = map_start else {
            return Err(self.unexpected_event(&map_start, &start));
        };
        let comment = self.take_comment(attach_comment, start.line());

        // Parse entries.
        let mut entries = Vec::new();
        loop {
            let (event, _) = self.peek_event(yaml_parser)?;
            if event == Event::MappingEnd {
                break;
            }

            let key = self.parse_node(yaml_parser, true)?;
            let value = self.parse_node(yaml_parser, false)?;

            let entry = MapEntry { key, value };
            entries.push(entry);
        }

        // Parse MappingEnd.
        self.next_event(yaml_parser)?;

        let mut src_loc = Self::to_source_location(&start);

        // In YAML, you don't know that you are parsing a map until you see the first colon ':' character.
        // So, the MappingStart's mark may point past the start of the first key.
        if let Some(first) = entries.first() {
            if first.key.src_loc.index < src_loc.index {
                src_loc = first.key.src_loc;
            }
        }

        // Return result.
        let node = ValueNode {
            src_loc,
            comment,
            kind: NodeKind::Mapping(MappingNode { entries }),
        };
        self.register_anchor(anchor_id, &node);
        Ok(node)
    }

    fn parse_scalar(
        &mut self,
        yaml_parser: &mut YamlParser<Chars>,
        attach_comment: bool,
    ) -> Result<ValueNode, DocsError> {
        // Parse Scalar.
        let (scalar, start) = self.next_event(yaml_parser)?;
        let Event::Scalar(value, style, anchor_id, tag) = scalar else {
            return Err(self.unexpected_event(&scalar, &start));
        };
        let comment = self.take_comment(attach_comment, start.line());

        let tag = match (tag, style) {
            (Some(tag), _) => Self::resolve_tag(&tag),
            (None, TScalarStyle::Plain) => resolve_plain_tag(&value),
            (None, _) => ScalarTag::Str,
        };

        let node = ValueNode {
            src_loc: Self::to_source_location(&start),
            comment,
            kind: NodeKind::Scalar(ScalarNode { value, tag }),
        };
        self.register_anchor(anchor_id, &node);
        Ok(node)
    }

    fn parse_alias(
        &mut self,
        yaml_parser: &mut YamlParser<Chars>,
        attach_comment: bool,
    ) -> Result<ValueNode, DocsError> {
        // Parse Alias.
        let (alias, start) = self.next_event(yaml_parser)?;
        let Event::Alias(anchor_id) = alias else {
            return Err(self.unexpected_event(&alias, &start));
        };

        let src_loc = Self::to_source_location(&start);
        let Some(target) = self.anchors.get(&anchor_id).cloned() else {
            return Err(DocsError::Structural {
                location: format_location(&self.filename, &src_loc),
                message: "alias refers to an unknown anchor".to_string(),
            });
        };
        let comment = self.take_comment(attach_comment, start.line());

        let node = ValueNode {
            src_loc,
            comment,
            kind: NodeKind::Alias(target),
        };
        Ok(node)
    }

    fn resolve_tag(tag: &Tag) -> ScalarTag {
        let tag = format!("{}{}", tag.handle, tag.suffix);
        match tag.as_str() {
            // The non-specific tag forces a string.
            "!" => ScalarTag::Str,
            tag => resolve_explicit_tag(tag),
        }
    }

    fn register_anchor(&mut self, anchor_id: usize, node: &ValueNode) {
        if anchor_id > 0 {
            self.anchors.insert(anchor_id, Rc::new(node.clone()));
        }
    }

    fn take_comment(&mut self, attach_comment: bool, line: usize) -> Vec<String> {
        if !attach_comment {
            return Vec::new();
        }
        self.leading_comment(line)
    }

    // The run of comment lines directly above `line` (1-based), stopping at the first blank or non-comment line.
    // Only the first node that starts on a line gets the block.
    fn leading_comment(&mut self, line: usize) -> Vec<String> {
        if line == 0 || line > self.lines.len() || !self.claimed_lines.insert(line) {
            return Vec::new();
        }

        let end = line - 1;
        let mut start = end;
        while start > 0 && self.lines[start - 1].trim_start().starts_with('#') {
            start -= 1;
        }

        self.lines[start..end].iter().map(|line| line.to_string()).collect()
    }

    fn next_event(&self, yaml_parser: &mut YamlParser<Chars>) -> Result<(Event, Marker), DocsError> {
        yaml_parser.next_token().map_err(|err| self.scan_error(err))
    }

    fn peek_event(&self, yaml_parser: &mut YamlParser<Chars>) -> Result<(Event, Marker), DocsError> {
        match yaml_parser.peek() {
            Ok((event, mark)) => Ok((event.clone(), *mark)),
            Err(err) => Err(self.scan_error(err)),
        }
    }

    fn scan_error(&self, err: ScanError) -> DocsError {
        DocsError::Parse {
            filename: self.filename.to_string(),
            message: err.to_string(),
        }
    }

    fn unexpected_event(&self, event: &Event, mark: &Marker) -> DocsError {
        DocsError::Parse {
            filename: self.filename.to_string(),
            message: format!(
                "unexpected event {:?} at line {} column {}",
                event,
                mark.line(),
                mark.col() + 1
            ),
        }
    }

    fn to_source_location(mark: &Marker) -> SourceLocation {
        SourceLocation {
            index: mark.index(),
            line: mark.line(),
            col: mark.col() + 1,
        }
    }
}
