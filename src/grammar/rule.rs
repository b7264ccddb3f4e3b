use super::Grammar;
use crate::common::format_float;
use crate::error::{Grammar as GrammarError, GrammarResult};
use regex::Regex;
use std::str::FromStr;
use std::string::{String, ToString};
use std::vec::Vec;

const COMMENT_MARKER: &str = "//";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomKind {
    Integer,
    Float,
    /// Any run of non-whitespace characters
    Text,
    /// Double-quoted text without escapes; the value excludes the quotes
    Quoted,
    Identifier,
    /// A line comment; the value is the text after the marker and one space
    Comment,
}

impl AtomKind {
    pub fn pattern(self) -> &'static str {
        match self {
            AtomKind::Integer => r"[+-]?[0-9]+",
            AtomKind::Float => r"[+-]?[0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?",
            AtomKind::Text => r"[^\s]+",
            AtomKind::Quoted => r#""[^"]*""#,
            AtomKind::Identifier => r"[A-Za-z_][A-Za-z0-9_]*",
            AtomKind::Comment => r"//.*",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    Record(Record),
    /// Pre-rendered text, emitted as-is by any rule
    Verbatim(String),
}

impl Value {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "an integer",
            Value::Float(_) => "a float",
            Value::Text(_) => "text",
            Value::Record(_) => "a record",
            Value::Verbatim(_) => "verbatim text",
        }
    }
}

/// Named field values of a composite, in entry order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    source: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    fn parsed(source: &str) -> Record {
        Record {
            source: source.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn with(mut self, name: &str, value: Value) -> Record {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: &str, value: Value) {
        self.fields.push((name.to_string(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// The text this record was parsed from; empty when built by hand
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn float(&self, name: &str) -> GrammarResult<f64> {
        self.field(name)?
            .as_float()
            .ok_or_else(|| field_kind(name, "a number"))
    }

    pub fn text(&self, name: &str) -> GrammarResult<&str> {
        self.field(name)?
            .as_text()
            .ok_or_else(|| field_kind(name, "text"))
    }

    pub fn record(&self, name: &str) -> GrammarResult<&Record> {
        self.field(name)?
            .as_record()
            .ok_or_else(|| field_kind(name, "a record"))
    }

    pub fn field(&self, name: &str) -> GrammarResult<&Value> {
        self.get(name)
            .ok_or_else(|| GrammarError::MissingField(name.to_string()))
    }
}

fn field_kind(name: &str, expected: &'static str) -> GrammarError {
    GrammarError::FieldKind {
        field: name.to_string(),
        expected,
    }
}

fn no_match(pattern: &str, text: &str) -> GrammarError {
    GrammarError::NoMatch {
        pattern: pattern.to_string(),
        text: text.to_string(),
    }
}

fn full_match(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{})$", pattern)).unwrap_or_else(|e| {
        panic!("Invalid grammar pattern `{}`: {}", pattern, e)
    })
}

#[derive(Clone, Debug)]
pub struct Atom {
    kind: AtomKind,
    matcher: Regex,
}

impl Atom {
    pub fn new(kind: AtomKind) -> Atom {
        Atom {
            kind,
            matcher: full_match(kind.pattern()),
        }
    }

    pub fn kind(&self) -> AtomKind {
        self.kind
    }
}

impl Grammar for Atom {
    type Value = Value;

    fn pattern(&self) -> &str {
        self.kind.pattern()
    }

    fn describes(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    fn parse(&self, text: &str) -> GrammarResult<Value> {
        if !self.describes(text) {
            return Err(no_match(self.pattern(), text));
        }

        match self.kind {
            AtomKind::Integer => i64::from_str(text)
                .map(Value::Integer)
                .map_err(|_| GrammarError::Number(text.to_string())),
            AtomKind::Float => f64::from_str(text)
                .map(Value::Float)
                .map_err(|_| GrammarError::Number(text.to_string())),
            AtomKind::Text | AtomKind::Identifier => {
                Ok(Value::Text(text.to_string()))
            }
            AtomKind::Quoted => {
                Ok(Value::Text(text[1..text.len() - 1].to_string()))
            }
            AtomKind::Comment => {
                let body = &text[COMMENT_MARKER.len()..];
                let body = body.strip_prefix(' ').unwrap_or(body);
                Ok(Value::Text(body.to_string()))
            }
        }
    }

    fn unparse(&self, value: &Value) -> GrammarResult<String> {
        match (self.kind, value) {
            (_, Value::Verbatim(text)) => Ok(text.clone()),
            (AtomKind::Integer | AtomKind::Float, Value::Integer(n)) => {
                Ok(n.to_string())
            }
            (AtomKind::Float, Value::Float(n)) => Ok(format_float(*n)),
            (AtomKind::Text | AtomKind::Identifier, Value::Text(text)) => {
                Ok(text.clone())
            }
            (AtomKind::Quoted, Value::Text(text)) => {
                Ok(format!("\"{}\"", text))
            }
            (AtomKind::Comment, Value::Text(text)) => {
                Ok(format!("{} {}", COMMENT_MARKER, text))
            }
            (_, other) => Err(GrammarError::ValueKind {
                pattern: self.pattern().to_string(),
                found: other.kind_name().to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Hug {
    Neither,
    Next,
    Previous,
}

/// One slot of a composite: a named field parsed by a sub-rule, or a literal
/// separator rendered verbatim
#[derive(Clone, Debug)]
pub struct Entry {
    name: String,
    rule: Option<Rule>,
    hug: Hug,
}

impl Entry {
    pub fn field(name: &str, rule: impl Into<Rule>) -> Entry {
        Entry {
            name: name.to_string(),
            rule: Some(rule.into()),
            hug: Hug::Neither,
        }
    }

    pub fn literal(text: &str) -> Entry {
        Entry {
            name: text.to_string(),
            rule: None,
            hug: Hug::Neither,
        }
    }

    /// An opening bracket; the space after it is optional on input and
    /// omitted on output
    pub fn open(text: &str) -> Entry {
        Entry {
            hug: Hug::Next,
            ..Entry::literal(text)
        }
    }

    /// A closing bracket; the space before it is optional on input and
    /// omitted on output
    pub fn close(text: &str) -> Entry {
        Entry {
            hug: Hug::Previous,
            ..Entry::literal(text)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }

    pub fn is_literal(&self) -> bool {
        self.rule.is_none()
    }
}

fn hugs(previous: &Entry, next: &Entry) -> bool {
    previous.hug == Hug::Next || next.hug == Hug::Previous
}

/// Entries joined by exactly one space (optional beside brackets)
#[derive(Clone, Debug)]
pub struct Composite {
    entries: Vec<Entry>,
    pattern: String,
    matcher: Regex,
}

impl Composite {
    pub fn new(entries: Vec<Entry>) -> Composite {
        let mut pattern = String::new();
        // same as `pattern`, but with one capture group per field
        let mut capturing = String::new();

        for (index, entry) in entries.iter().enumerate() {
            if index > 0 {
                let separator = if hugs(&entries[index - 1], entry) {
                    " ?"
                } else {
                    " "
                };
                pattern.push_str(separator);
                capturing.push_str(separator);
            }

            match &entry.rule {
                Some(rule) => {
                    pattern.push_str(&format!("(?:{})", rule.pattern()));
                    capturing.push_str(&format!("({})", rule.pattern()));
                }
                None => {
                    let escaped = regex::escape(&entry.name);
                    pattern.push_str(&escaped);
                    capturing.push_str(&escaped);
                }
            }
        }

        Composite {
            matcher: full_match(&capturing),
            entries,
            pattern,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl Grammar for Composite {
    type Value = Value;

    fn pattern(&self) -> &str {
        &self.pattern
    }

    fn describes(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    fn parse(&self, text: &str) -> GrammarResult<Value> {
        let captures = self
            .matcher
            .captures(text)
            .ok_or_else(|| no_match(&self.pattern, text))?;
        let mut record = Record::parsed(text);
        let fields = self
            .entries
            .iter()
            .filter_map(|entry| Some((&entry.name, entry.rule.as_ref()?)));

        for (group, (name, rule)) in fields.enumerate() {
            let field_text = captures.get(group + 1).map_or("", |m| m.as_str());
            record.push(name, rule.parse(field_text)?);
        }

        Ok(Value::Record(record))
    }

    fn unparse(&self, value: &Value) -> GrammarResult<String> {
        let record = match value {
            Value::Verbatim(text) => return Ok(text.clone()),
            Value::Record(record) => record,
            other => {
                return Err(GrammarError::ValueKind {
                    pattern: self.pattern.clone(),
                    found: other.kind_name().to_string(),
                })
            }
        };

        let mut text = String::new();

        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 && !hugs(&self.entries[index - 1], entry) {
                text.push(' ');
            }

            match &entry.rule {
                Some(rule) => {
                    let field = record.get(&entry.name).ok_or_else(|| {
                        GrammarError::MissingField(entry.name.clone())
                    })?;
                    text.push_str(&rule.unparse(field)?);
                }
                None => text.push_str(&entry.name),
            }
        }

        Ok(text)
    }
}

#[derive(Clone, Debug)]
pub enum Rule {
    Atom(Atom),
    Composite(Box<Composite>),
}

impl From<Atom> for Rule {
    fn from(atom: Atom) -> Rule {
        Rule::Atom(atom)
    }
}

impl From<AtomKind> for Rule {
    fn from(kind: AtomKind) -> Rule {
        Rule::Atom(Atom::new(kind))
    }
}

impl From<Composite> for Rule {
    fn from(composite: Composite) -> Rule {
        Rule::Composite(Box::new(composite))
    }
}

impl Grammar for Rule {
    type Value = Value;

    fn pattern(&self) -> &str {
        match self {
            Rule::Atom(atom) => atom.pattern(),
            Rule::Composite(composite) => composite.pattern(),
        }
    }

    fn describes(&self, text: &str) -> bool {
        match self {
            Rule::Atom(atom) => atom.describes(text),
            Rule::Composite(composite) => composite.describes(text),
        }
    }

    fn parse(&self, text: &str) -> GrammarResult<Value> {
        match self {
            Rule::Atom(atom) => atom.parse(text),
            Rule::Composite(composite) => composite.parse(text),
        }
    }

    fn unparse(&self, value: &Value) -> GrammarResult<String> {
        match self {
            Rule::Atom(atom) => atom.unparse(value),
            Rule::Composite(composite) => composite.unparse(value),
        }
    }
}
