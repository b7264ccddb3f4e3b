use crate::error::TextParse;
use crate::node::{parse, parse_named, Node};
use std::io;

struct ErroringReader {}

impl io::Read for ErroringReader {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "Generic test error"))
    }
}

const DOCUMENT: &str = r#"versioninfo
{
	"editorversion" "400"
	"prefab" "0"
}
world
{
	"id" "1"
	"classname" "worldspawn"
	"detailvbsp" "detail.vbsp"
	"detailvbsp" "detail_2fort.vbsp"
	solid
	{
		"id" "2"
		side
		{
			"plane" "(0 0 0) (0 1 0) (1 0 0)"
		}
	}

	solid
	{
		"id" "3"
	}
}
"#;

// Parse successes

#[test]
fn parse_empty() {
    let nodes = parse(&b""[..]).unwrap();
    assert!(nodes.is_empty());
}

#[test]
fn parse_document() {
    let nodes = parse(DOCUMENT.as_bytes()).unwrap();
    assert_eq!(nodes.len(), 2);

    let version = &nodes[0];
    assert_eq!(version.node_type, "versioninfo");
    assert_eq!(version.get("editorversion"), Some("400"));
    assert!(version.nodes.is_empty());

    let world = &nodes[1];
    assert_eq!(world.node_type, "world");
    assert_eq!(
        world.get_all("detailvbsp"),
        ["detail.vbsp", "detail_2fort.vbsp"]
    );
    assert_eq!(world.nodes.len(), 2);

    let solid = &world.nodes[0];
    assert_eq!(solid.get("id"), Some("2"));
    assert_eq!(solid.nodes[0].node_type, "side");
    assert_eq!(
        solid.nodes[0].get("plane"),
        Some("(0 0 0) (0 1 0) (1 0 0)")
    );
    assert_eq!(world.nodes[1].get("id"), Some("3"));
}

#[test]
fn parse_display_round_trip() {
    let nodes = parse(DOCUMENT.as_bytes()).unwrap();
    let text: String = nodes.iter().map(Node::to_string).collect();

    assert_eq!(parse(text.as_bytes()).unwrap(), nodes);
    // the blank line between the solids is not preserved
    assert_eq!(text, DOCUMENT.replace("\n\n", "\n"));
}

// Parse errors

#[test]
fn parse_unbalanced() {
    let err = parse_named(&b"world\n{\n\"id\" \"1\"\n"[..], "test.vmf")
        .unwrap_err();

    match err {
        TextParse::Parser(line_err) => {
            assert_eq!(u64::from(line_err.line_number.unwrap()), 3);
            assert_eq!(line_err.message, "test.vmf ends prematurely at line 3");
        }
        other => panic!("Unexpected error variant for {}", other),
    }
}

#[test]
fn parse_unrecognized_line() {
    let err = parse(&b"world\n{\n\"id\" 1\n}\n"[..]).unwrap_err();

    match err {
        TextParse::Lexer(line_err) => {
            assert_eq!(u64::from(line_err.line_number.unwrap()), 3);
            assert!(line_err.message.contains("\"id\" 1"));
        }
        other => panic!("Unexpected error variant for {}", other),
    }
}

#[test]
fn parse_brace_without_type() {
    let err = parse(&b"{\n}\n"[..]).unwrap_err();
    assert!(matches!(err, TextParse::Parser(_)));
}

#[test]
fn parse_stray_close() {
    let err = parse(&b"world\n{\n}\n}\n"[..]).unwrap_err();

    if let TextParse::Parser(line_err) = err {
        assert_eq!(u64::from(line_err.line_number.unwrap()), 4);
    } else {
        panic!("Unexpected error variant for {}", err);
    }
}

#[test]
fn parse_key_value_outside_node() {
    let err = parse(&b"\"a\" \"b\"\n"[..]).unwrap_err();
    assert!(matches!(err, TextParse::Parser(_)));
}

#[test]
fn parse_io_error() {
    let err = parse(ErroringReader {}).unwrap_err();
    assert!(matches!(err, TextParse::Io(_)));
}
