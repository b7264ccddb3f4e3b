use crate::common::Writes;
use crate::error::{WriteAttempt, WriteError};
use crate::grammar::Grammar;
use crate::map::{Brush, Entity, MapFile, Validates};
use crate::tokens::{COMMENT, KEY_VALUE, QUAKE_SIDE, VALVE_SIDE};
use std::io;

const NEWLINE: &[u8] = b"\r\n";

/// How brush sides spell their texture alignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dialect {
    /// Offsets, rotation and scales; axes follow from the plane
    #[default]
    Standard,
    /// Explicit `[ axis offset ]` pairs per side
    Valve220,
}

/// Validate `map`, then write its comments followed by its entities.
///
/// Comments keep their order but not their line positions: all of them
/// come before the first entity.
pub fn write<W: io::Write>(
    map: &MapFile,
    dialect: Dialect,
    writer: &mut W,
) -> WriteAttempt {
    map.validate().map_err(WriteError::Validation)?;

    for comment in map.comments.values() {
        writer.write_all(COMMENT.unparse(comment)?.as_bytes())?;
        writer.write_all(NEWLINE)?;
    }

    for entity in &map.entities {
        write_entity(entity, dialect, writer)?;
    }

    Ok(())
}

fn write_entity<W: io::Write>(
    entity: &Entity,
    dialect: Dialect,
    writer: &mut W,
) -> WriteAttempt {
    writer.write_all(b"{\r\n")?;

    for (key, value) in &entity.attributes {
        let pair = (key.clone(), value.clone());
        writer.write_all(KEY_VALUE.unparse(&pair)?.as_bytes())?;
        writer.write_all(NEWLINE)?;
    }

    for brush in &entity.brushes {
        write_brush(brush, dialect, writer)?;
    }

    writer.write_all(b"}\r\n")?;
    Ok(())
}

fn write_brush<W: io::Write>(
    brush: &Brush,
    dialect: Dialect,
    writer: &mut W,
) -> WriteAttempt {
    writer.write_all(b"{\r\n")?;

    for side in &brush.sides {
        let text = match dialect {
            Dialect::Standard => QUAKE_SIDE.unparse(side)?,
            Dialect::Valve220 => VALVE_SIDE.unparse(side)?,
        };
        writer.write_all(text.as_bytes())?;
        writer.write_all(NEWLINE)?;
    }

    writer.write_all(b"}\r\n")?;
    Ok(())
}

impl<W: io::Write> Writes<W> for MapFile {
    fn write_to(&self, writer: &mut W) -> WriteAttempt {
        write(self, Dialect::Standard, writer)
    }
}
