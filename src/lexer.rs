use crate::error::{TextParse, TextParseResult};
use std::fmt;
use std::io::{BufRead, BufReader, Lines, Read};
use std::num::NonZeroU64;
use std::string::String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub line_number: NonZeroU64,
}

impl Line {
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: line {}", self.text, self.line_number)
    }
}

/// Yields every line of a text source, trimmed, with 1-based line numbers
pub struct LineIterator<R: Read> {
    lines: Lines<BufReader<R>>,
    line_number: NonZeroU64,
}

impl<R: Read> LineIterator<R> {
    pub fn new(reader: R) -> LineIterator<R> {
        LineIterator {
            lines: BufReader::new(reader).lines(),
            line_number: NonZeroU64::MIN,
        }
    }
}

impl<R: Read> Iterator for LineIterator<R> {
    type Item = TextParseResult<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = match self.lines.next()? {
            Ok(raw) => Ok(Line {
                text: String::from(raw.trim()),
                line_number: self.line_number,
            }),
            Err(e) => Err(TextParse::Io(e)),
        };

        self.line_number = self.line_number.saturating_add(1);
        Some(result)
    }
}
