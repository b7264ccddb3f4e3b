use crate::error::{TextParse, TextParseResult};
use crate::grammar::Grammar;
use crate::lexer::{Line, LineIterator};
use crate::map::{Brush, BrushSide, Entity, MapFile};
use crate::tokens::{
    classify, LineKind, Token, COMMENT, KEY_VALUE, MAP_LINES, QUAKE_SIDE,
    VALVE_SIDE,
};
use std::io::Read;
use std::num::NonZeroU64;
use std::string::String;

const ENTITY_DEPTH: u8 = 1;
const BRUSH_DEPTH: u8 = 2;

pub fn parse<R: Read>(reader: R) -> TextParseResult<MapFile> {
    parse_named(reader, "Map file")
}

/// Parse a map file; `name` identifies the source in errors
pub fn parse_named<R: Read>(
    reader: R,
    name: &str,
) -> TextParseResult<MapFile> {
    let mut map = MapFile::new();
    let mut depth = 0u8;
    let mut last_line: Option<NonZeroU64> = None;

    for line in LineIterator::new(reader) {
        let line = line?;
        last_line = Some(line.line_number);

        // blank lines are allowed anywhere
        if line.is_blank() {
            continue;
        }

        log::trace!("{}", line);

        match classify(&line.text, &MAP_LINES) {
            Some(LineKind::Comment) => {
                let comment = parse_line(&COMMENT, &line)?;
                map.comments.insert(line.line_number.get(), comment);
            }
            Some(LineKind::Open) => {
                depth += 1;

                match depth {
                    ENTITY_DEPTH => map.entities.push(Entity::new()),
                    BRUSH_DEPTH => {
                        current_entity(&mut map, &line)?
                            .brushes
                            .push(Brush::default());
                    }
                    _ => {
                        return Err(TextParse::from_parser(
                            String::from("Brushes can't contain `{`"),
                            line.line_number,
                        ))
                    }
                }
            }
            Some(LineKind::Close) => {
                if depth == 0 {
                    return Err(misplaced(&line, "`}` without a matching `{`"));
                }

                depth -= 1;
            }
            Some(LineKind::KeyValue) => {
                if depth != ENTITY_DEPTH {
                    return Err(misplaced(&line, "Key/value outside of entity"));
                }

                let (key, value) = parse_line(&KEY_VALUE, &line)?;
                current_entity(&mut map, &line)?.set(key, value);
            }
            Some(LineKind::QuakeSide) => {
                let side = parse_line(&QUAKE_SIDE, &line)?;
                push_side(&mut map, depth, side, &line)?;
            }
            Some(LineKind::ValveSide) => {
                let side = parse_line(&VALVE_SIDE, &line)?;
                push_side(&mut map, depth, side, &line)?;
            }
            _ => {
                return Err(TextParse::unrecognized(
                    &line.text,
                    line.line_number,
                ))
            }
        }
    }

    if depth != 0 {
        return Err(TextParse::premature(name, last_line));
    }

    log::debug!(
        "Parsed {} entities ({} brushes) from {}",
        map.entities.len(),
        map.brush_count(),
        name
    );

    Ok(map)
}

fn parse_line<T>(token: &Token<T>, line: &Line) -> TextParseResult<T> {
    token
        .parse(&line.text)
        .map_err(|e| TextParse::from_grammar(e, line.line_number))
}

fn push_side(
    map: &mut MapFile,
    depth: u8,
    side: BrushSide,
    line: &Line,
) -> TextParseResult<()> {
    if depth != BRUSH_DEPTH {
        return Err(misplaced(line, "Brush side outside of brush"));
    }

    current_entity(map, line)?
        .brushes
        .last_mut()
        .ok_or_else(|| misplaced(line, "Brush side outside of brush"))?
        .sides
        .push(side);

    Ok(())
}

fn current_entity<'a>(
    map: &'a mut MapFile,
    line: &Line,
) -> TextParseResult<&'a mut Entity> {
    map.entities
        .last_mut()
        .ok_or_else(|| misplaced(line, "Expected an entity"))
}

fn misplaced(line: &Line, message: &str) -> TextParse {
    TextParse::from_parser(
        format!("{}: `{}`", message, line.text),
        line.line_number,
    )
}
