//! Nested message catalogs.
//!
//! A catalog is a tree: every key maps either to a literal string or to a
//! nested catalog. Keys are addressed with dotted paths, so
//! `"greeting.hello"` reaches `catalog["greeting"]["hello"]`. A flat key
//! that itself contains dots (`{"greeting.hello": "Hello"}`) is also found
//! when no nested path matches.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::error::{I18nError, Result};

/// A node in a message catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageNode {
    /// A translated string.
    Text(String),
    /// A nested level of keys.
    Nested(MessageCatalog),
}

/// Message catalog for a locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    entries: BTreeMap<String, MessageNode>,
}

impl MessageCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a parsed JSON document.
    ///
    /// The root must be an object and every leaf must be a string. Anything
    /// else (numbers, booleans, null, arrays) is rejected with the dotted
    /// path of the offending value, as are keys with an empty segment
    /// (`""`, `"a..b"`, `".a"`), which no lookup could reach.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_object(map, ""),
            other => Err(I18nError::shape("", value_kind(&other))),
        }
    }

    fn from_object(map: serde_json::Map<String, Value>, prefix: &str) -> Result<Self> {
        let mut catalog = Self::new();
        for (key, value) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            if has_empty_segment(&key) {
                return Err(I18nError::shape(path, "empty key segment"));
            }
            let node = match value {
                Value::String(text) => MessageNode::Text(text),
                Value::Object(nested) => MessageNode::Nested(Self::from_object(nested, &path)?),
                other => return Err(I18nError::shape(path, value_kind(&other))),
            };
            catalog.entries.insert(key, node);
        }
        Ok(catalog)
    }

    /// Insert a message at a dotted path, creating intermediate levels.
    ///
    /// A string found where a level is needed is replaced by a new level.
    /// Paths with an empty segment are ignored.
    pub fn insert(&mut self, path: &str, text: impl Into<String>) {
        if has_empty_segment(path) {
            warn!(path, "ignoring message with an empty key segment");
            return;
        }
        let (parents, leaf) = match path.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, path),
        };
        let mut level = self;
        if let Some(parents) = parents {
            for segment in parents.split('.') {
                let node = level
                    .entries
                    .entry(segment.to_string())
                    .or_insert_with(|| MessageNode::Nested(MessageCatalog::new()));
                if let MessageNode::Text(_) = node {
                    *node = MessageNode::Nested(MessageCatalog::new());
                }
                let MessageNode::Nested(catalog) = node else {
                    return;
                };
                level = catalog;
            }
        }
        level
            .entries
            .insert(leaf.to_string(), MessageNode::Text(text.into()));
    }

    /// Get the node stored directly under `segment`.
    pub fn get(&self, segment: &str) -> Option<&MessageNode> {
        self.entries.get(segment)
    }

    /// Look up a message by dotted path.
    ///
    /// Nested levels are tried first; at each level the remaining path is
    /// also tried as a literal key. Returns `None` if nothing matches or if
    /// the path has an empty segment.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        if has_empty_segment(key) {
            return None;
        }
        self.lookup_path(key)
    }

    fn lookup_path(&self, key: &str) -> Option<&str> {
        if let Some((head, rest)) = key.split_once('.') {
            if let Some(MessageNode::Nested(nested)) = self.entries.get(head) {
                if let Some(text) = nested.lookup_path(rest) {
                    return Some(text);
                }
            }
        }
        match self.entries.get(key)? {
            MessageNode::Text(text) => Some(text),
            MessageNode::Nested(_) => None,
        }
    }

    /// All message keys as dotted paths, in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.collect_keys("", &mut keys);
        keys
    }

    fn collect_keys(&self, prefix: &str, keys: &mut Vec<String>) {
        for (key, node) in &self.entries {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            match node {
                MessageNode::Text(_) => keys.push(path),
                MessageNode::Nested(nested) => nested.collect_keys(&path, keys),
            }
        }
    }

    /// Number of messages, counting leaves at every depth.
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                MessageNode::Text(_) => 1,
                MessageNode::Nested(nested) => nested.len(),
            })
            .sum()
    }

    /// Whether the catalog holds no messages.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TryFrom<Value> for MessageCatalog {
    type Error = I18nError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

fn has_empty_segment(path: &str) -> bool {
    path.split('.').any(str::is_empty)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
