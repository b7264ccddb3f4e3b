use crate::geom::Vec3;
use std::fmt;
use std::io;
use std::num::NonZeroU64;
use std::string::String;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub message: String,
    pub line_number: Option<NonZeroU64>,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.line_number {
            Some(ln) => write!(f, "Line {}: {}", ln, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Error, Debug)]
pub enum TextParse {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Lexer(LineError),
    #[error("{0}")]
    Parser(LineError),
}

impl TextParse {
    pub fn from_lexer(message: String, line_number: NonZeroU64) -> TextParse {
        TextParse::Lexer(LineError {
            message,
            line_number: Some(line_number),
        })
    }

    pub fn from_parser(message: String, line_number: NonZeroU64) -> TextParse {
        TextParse::Parser(LineError {
            message,
            line_number: Some(line_number),
        })
    }

    pub fn from_grammar(err: Grammar, line_number: NonZeroU64) -> TextParse {
        TextParse::from_lexer(err.to_string(), line_number)
    }

    pub fn unrecognized(text: &str, line_number: NonZeroU64) -> TextParse {
        TextParse::from_lexer(format!("Couldn't parse `{}`", text), line_number)
    }

    pub fn premature(name: &str, line_number: Option<NonZeroU64>) -> TextParse {
        let message = match line_number {
            Some(ln) => format!("{} ends prematurely at line {}", name, ln),
            None => format!("{} ends prematurely", name),
        };

        TextParse::Parser(LineError {
            message,
            line_number,
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Geometry {
    #[error("Degenerate triangle {0:?}")]
    DegenerateTriangle([Vec3; 3]),
    #[error("Plane normal has zero length")]
    ZeroNormal,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Grammar {
    #[error("`{text}` does not match pattern `{pattern}`")]
    NoMatch { pattern: String, text: String },
    #[error("Missing field `{0}`")]
    MissingField(String),
    #[error("Field `{field}` is not {expected}")]
    FieldKind { field: String, expected: &'static str },
    #[error("Pattern `{pattern}` can't render {found}")]
    ValueKind { pattern: String, found: String },
    #[error("Bad number `{0}`")]
    Number(String),
    #[error(transparent)]
    Geometry(#[from] Geometry),
}

#[derive(Error, Debug)]
pub enum Document {
    #[error("Expected one `{node_type}` node, found {count}")]
    SectionCount { node_type: String, count: usize },
    #[error("`{node_type}` node is missing key `{key}`")]
    MissingKey { node_type: String, key: String },
    #[error("Expected `{expected}` node, got `{found}`")]
    NodeType { expected: String, found: String },
    #[error(transparent)]
    Grammar(#[from] Grammar),
    #[error(transparent)]
    Parse(#[from] TextParse),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Decompile {
    #[error("Not a brush entity (classname `{0}`)")]
    NotBrushEntity(String),
    #[error("First entity must be worldspawn, got `{0}`")]
    NotWorldspawn(String),
    #[error("Bad model reference `{0}`")]
    BadModel(String),
    #[error("Index {index} out of range for {table}")]
    Index { table: &'static str, index: usize },
    #[error(transparent)]
    Geometry(#[from] Geometry),
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Grammar(#[from] Grammar),
    #[error(transparent)]
    Document(#[from] Document),
}

pub type TextParseResult<T> = Result<T, TextParse>;
pub type GeometryResult<T> = Result<T, Geometry>;
pub type GrammarResult<T> = Result<T, Grammar>;
pub type DocumentResult<T> = Result<T, Document>;
pub type DecompileResult<T> = Result<T, Decompile>;
pub type WriteAttempt = Result<(), WriteError>;
