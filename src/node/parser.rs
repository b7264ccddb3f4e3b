use crate::error::{TextParse, TextParseResult};
use crate::grammar::Grammar;
use crate::lexer::{Line, LineIterator};
use crate::node::Node;
use crate::tokens::{classify, LineKind, KEY_VALUE, NODE_LINES};
use std::io::Read;
use std::num::NonZeroU64;
use std::string::String;
use std::vec::Vec;

pub fn parse<R: Read>(reader: R) -> TextParseResult<Vec<Node>> {
    parse_named(reader, "Node file")
}

/// Parse the top-level nodes of a brace-nested document. `name` identifies
/// the source in errors.
pub fn parse_named<R: Read>(
    reader: R,
    name: &str,
) -> TextParseResult<Vec<Node>> {
    let mut roots: Vec<Node> = Vec::new();
    // open nodes, innermost last; its length is the nesting depth
    let mut open: Vec<Node> = Vec::new();
    let mut node_type: Option<String> = None;
    let mut last_line: Option<NonZeroU64> = None;

    for line in LineIterator::new(reader) {
        let line = line?;
        last_line = Some(line.line_number);

        if line.is_blank() {
            continue;
        }

        log::trace!("{}", line);

        match classify(&line.text, &NODE_LINES) {
            Some(LineKind::NodeType) => node_type = Some(line.text),
            Some(LineKind::Open) => {
                let node_type = node_type.take().ok_or_else(|| {
                    TextParse::from_parser(
                        String::from("`{` without a node type"),
                        line.line_number,
                    )
                })?;
                open.push(Node::new(node_type));
            }
            Some(LineKind::Close) => {
                let node = open.pop().ok_or_else(|| unexpected(&line))?;

                match open.last_mut() {
                    Some(parent) => parent.nodes.push(node),
                    None => roots.push(node),
                }
            }
            Some(LineKind::KeyValue) => {
                let (key, value) = KEY_VALUE.parse(&line.text).map_err(|e| {
                    TextParse::from_grammar(e, line.line_number)
                })?;
                let node = open.last_mut().ok_or_else(|| unexpected(&line))?;
                node.push(key, value);
            }
            _ => {
                return Err(TextParse::unrecognized(
                    &line.text,
                    line.line_number,
                ))
            }
        }
    }

    if !open.is_empty() {
        return Err(TextParse::premature(name, last_line));
    }

    log::debug!("Parsed {} top-level nodes from {}", roots.len(), name);
    Ok(roots)
}

fn unexpected(line: &Line) -> TextParse {
    TextParse::from_parser(
        format!("Unexpected `{}` outside of a node", line.text),
        line.line_number,
    )
}
