//! Reading, writing and converting the text map formats of Quake-family
//! engines (`.map` and `.vmf`), and rebuilding editable brushes from the
//! collision tables of compiled maps.

pub mod bsp;
pub mod common;
pub mod error;
pub mod geom;
pub mod grammar;
pub mod lexer;
pub mod map;
pub mod node;
pub mod qmap;
pub mod tokens;
pub mod vmf;

pub use common::{format_float, Writes};
pub use error::{
    Decompile, DecompileResult, Document, DocumentResult, Geometry,
    GeometryResult, Grammar as GrammarError, GrammarResult, LineError,
    TextParse, TextParseResult, WriteAttempt, WriteError,
};

#[cfg(test)]
mod lexer_test;
