//! Composable line grammars.
//!
//! A grammar describes one kind of text token: it can tell whether a piece of
//! text is fully described by its pattern, parse it into a value and render a
//! value back into text. [`Atom`]s are the built-in leaves (numbers, strings,
//! comments); [`Composite`]s concatenate fields and literal separators, one
//! space apart, and can be nested inside each other.

mod rule;

pub use rule::{Atom, AtomKind, Composite, Entry, Record, Rule, Value};

use crate::error::GrammarResult;

pub trait Grammar {
    type Value;

    /// The pattern used when this grammar is embedded in a composite
    fn pattern(&self) -> &str;

    /// Whether `text` is matched in full by this grammar
    fn describes(&self, text: &str) -> bool;

    fn parse(&self, text: &str) -> GrammarResult<Self::Value>;

    fn unparse(&self, value: &Self::Value) -> GrammarResult<String>;
}
