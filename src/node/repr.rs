use crate::common::Writes;
use crate::error::{Document, DocumentResult, WriteAttempt};
use crate::grammar::Grammar;
use crate::tokens::KEY_VALUE;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::ops::Index;
use std::string::{String, ToString};
use std::vec::Vec;

/// One element of a brace-nested document: a type tag, key/value pairs in
/// source order (keys may repeat) and child nodes.
///
/// Lookups by key see the most recent occurrence, the same as collecting the
/// pairs into a map would.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub node_type: String,
    pub key_values: Vec<(String, String)>,
    pub nodes: Vec<Node>,
}

impl Node {
    pub fn new(node_type: impl Into<String>) -> Node {
        Node {
            node_type: node_type.into(),
            ..Node::default()
        }
    }

    /// Append a pair, keeping any earlier pairs with the same key
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.key_values.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.key_values
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like `get`, but a missing key is a document error
    pub fn require(&self, key: &str) -> DocumentResult<&str> {
        self.get(key).ok_or_else(|| Document::MissingKey {
            node_type: self.node_type.clone(),
            key: key.to_string(),
        })
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.key_values
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Overwrite the first pair equal to `(key, self.get(key))` in place, or
    /// append a new pair if `key` is absent
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.current_index(&key) {
            Some(index) => self.key_values[index].1 = value,
            None => self.key_values.push((key, value)),
        }
    }

    pub fn update<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in pairs {
            self.set(key, value);
        }
    }

    /// Remove the first pair equal to `(key, self.get(key))`
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.current_index(key)?;
        Some(self.key_values.remove(index).1)
    }

    fn current_index(&self, key: &str) -> Option<usize> {
        let current = self.get(key)?;

        self.key_values
            .iter()
            .position(|(k, v)| k == key && v == current)
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.key_values
    }

    pub fn pair(&self, index: usize) -> Option<&(String, String)> {
        self.key_values.get(index)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.key_values.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn values(&self) -> Vec<&str> {
        self.key_values.iter().map(|(_, v)| v.as_str()).collect()
    }

    /// Children grouped by type, types in sorted order, each group in its
    /// original order
    pub fn nodes_by_type(&self) -> BTreeMap<&str, Vec<&Node>> {
        group_by_type(&self.nodes)
    }

    fn write_lines(&self, out: &mut String, depth: usize) -> WriteAttempt {
        let indent = "\t".repeat(depth);

        out.push_str(&format!("{}{}\n", indent, self.node_type));
        out.push_str(&format!("{}{{\n", indent));

        for pair in &self.key_values {
            let line = KEY_VALUE.unparse(pair)?;
            out.push_str(&format!("{}\t{}\n", indent, line));
        }

        for child in &self.nodes {
            child.write_lines(out, depth + 1)?;
        }

        out.push_str(&format!("{}}}\n", indent));
        Ok(())
    }
}

/// Nodes grouped by type, types in sorted order
pub fn group_by_type(nodes: &[Node]) -> BTreeMap<&str, Vec<&Node>> {
    let mut groups: BTreeMap<&str, Vec<&Node>> = BTreeMap::new();

    for node in nodes {
        groups.entry(node.node_type.as_str()).or_default().push(node);
    }

    groups
}

impl Index<usize> for Node {
    type Output = (String, String);

    fn index(&self, index: usize) -> &Self::Output {
        &self.key_values[index]
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut text = String::new();
        self.write_lines(&mut text, 0).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl<W: io::Write> Writes<W> for Node {
    fn write_to(&self, writer: &mut W) -> WriteAttempt {
        let mut text = String::new();
        self.write_lines(&mut text, 0)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }
}
