use crate::error::TextParseResult;
use crate::map::Attributes;
use crate::qmap;
use std::io::Read;
use std::vec::Vec;

const HEADER_PREFIX: &[u8] = b"ENTITIES";

/// Parse the attribute bags of a compiled entity lump or `.ent` side file
pub fn parse_entities<R: Read>(reader: R) -> TextParseResult<Vec<Attributes>> {
    parse_entities_named(reader, "Entity lump")
}

pub fn parse_entities_named<R: Read>(
    mut reader: R,
    name: &str,
) -> TextParseResult<Vec<Attributes>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    // strip off null-terminator(s)
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    bytes.truncate(end);

    // side files open with an `ENTITIESxx` line; keep its line break so
    // errors still report source line numbers
    if bytes.starts_with(HEADER_PREFIX) {
        let header_end = bytes
            .iter()
            .position(|&b| b == b'\n')
            .unwrap_or(bytes.len());
        bytes.drain(..header_end);
    }

    let map = qmap::parse_named(bytes.as_slice(), name)?;

    Ok(map
        .entities
        .into_iter()
        .map(|entity| entity.attributes)
        .collect())
}
