use crate::error::TextParse;
use crate::lexer::{Line, LineIterator};
use std::io;

struct ErroringReader {}

impl io::Read for ErroringReader {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "Generic test error"))
    }
}

// Successes

#[test]
fn lines_are_trimmed_and_numbered() {
    let input = b" // a comment  \n\t{\r\n\n  \"k\" \"v\"  ";
    let lines: Vec<Line> = LineIterator::new(&input[..])
        .map(|line| line.unwrap())
        .collect();

    let expected = [
        ("// a comment", 1u64),
        ("{", 2),
        ("", 3),
        ("\"k\" \"v\"", 4),
    ];

    assert_eq!(lines.len(), expected.len());

    for (line, (text, line_number)) in lines.iter().zip(expected) {
        assert_eq!(line.text, text);
        assert_eq!(line.line_number.get(), line_number);
    }

    assert!(lines[2].is_blank());
    assert!(!lines[1].is_blank());
}

#[test]
fn line_display() {
    let line = LineIterator::new(&b"\n}\n"[..]).nth(1).unwrap().unwrap();
    assert_eq!(line.to_string(), "}: line 2");
}

#[test]
fn empty_input() {
    assert!(LineIterator::new(&b""[..]).next().is_none());
}

// Failures

#[test]
fn lex_io_error() {
    let err = LineIterator::new(ErroringReader {}).next().unwrap();
    assert!(matches!(err, Err(TextParse::Io(_))));
}

#[test]
fn lex_invalid_utf8() {
    let err = LineIterator::new(&b"\"k\" \"\xff\"\n"[..]).next().unwrap();

    match err {
        Err(TextParse::Io(e)) => {
            assert_eq!(e.kind(), io::ErrorKind::InvalidData)
        }
        other => panic!("Unexpected result {:?}", other),
    }
}
