//! Style specification tree and its lazily compiled view
//!
//! ## Layout
//!
//! ```toml
//! default = "reset"          # fallback descriptor for any missing slot
//! brace = "gray"             # a bare descriptor applies to every slot
//!
//! [info]
//! default = "reset"          # style for plain text at this level
//! prefix = "cyan.bold"       # style for the level glyph / tag
//! path = "underline"         # field slot: { path: "..." } arguments
//! ```
//!
//! The tree is the source of truth. `StyleResolver` compiles descriptors
//! on first access and caches them per (level, slot).

pub mod compile;
pub mod resolver;

pub use compile::{compile, parse_descriptor, StyleFn};
pub use resolver::{LevelStyles, StyleResolver};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Root key holding the fallback descriptor
pub const DEFAULT_KEY: &str = "default";

/// Descriptor used when the tree has no usable `default`
pub const FALLBACK_DESCRIPTOR: &str = "reset";

/// One node of the style tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleNode {
    /// A style descriptor string, compiled on demand
    Descriptor(String),
    /// Named slots, e.g. the per-level tables
    Table(BTreeMap<String, StyleNode>),
    /// Anything else, carried as plain data and never compiled
    Data(Value),
}

impl StyleNode {
    pub fn descriptor(value: impl Into<String>) -> Self {
        StyleNode::Descriptor(value.into())
    }

    pub fn as_descriptor(&self) -> Option<&str> {
        match self {
            StyleNode::Descriptor(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&BTreeMap<String, StyleNode>> {
        match self {
            StyleNode::Table(t) => Some(t),
            _ => None,
        }
    }
}

impl From<&str> for StyleNode {
    fn from(value: &str) -> Self {
        StyleNode::Descriptor(value.to_string())
    }
}

impl From<String> for StyleNode {
    fn from(value: String) -> Self {
        StyleNode::Descriptor(value)
    }
}

/// Raw style specification tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleTree {
    nodes: BTreeMap<String, StyleNode>,
}

impl StyleTree {
    /// Empty tree, useful as an override layer
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in styles
    pub fn defaults() -> Self {
        let mut tree = Self::empty();
        tree.insert(DEFAULT_KEY, "reset");
        tree.insert("brace", "gray");
        tree.insert("timestamp", "gray.dim");

        let levels: [(&str, &str, &str); 5] = [
            ("error", "red", "red.bold"),
            ("warn", "yellow", "yellow.bold"),
            ("info", "reset", "cyan.bold"),
            ("log", "reset", "white.bold"),
            ("debug", "gray", "magenta"),
        ];

        for (level, text, prefix) in levels {
            let mut table = field_slots();
            table.insert("default".to_string(), StyleNode::descriptor(text));
            table.insert("prefix".to_string(), StyleNode::descriptor(prefix));
            if level == "error" {
                table.insert("name".to_string(), StyleNode::descriptor("red.bold"));
                table.insert("message".to_string(), StyleNode::descriptor("red"));
                table.insert("stack".to_string(), StyleNode::descriptor("gray"));
            }
            tree.insert(level, StyleNode::Table(table));
        }

        tree
    }

    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<StyleNode>) {
        self.nodes.insert(key.into(), node.into());
    }

    pub fn get(&self, key: &str) -> Option<&StyleNode> {
        self.nodes.get(key)
    }

    /// Root fallback descriptor
    pub fn default_descriptor(&self) -> &str {
        self.nodes
            .get(DEFAULT_KEY)
            .and_then(StyleNode::as_descriptor)
            .unwrap_or(FALLBACK_DESCRIPTOR)
    }

    /// Descriptor stored for (level, slot), if it is a string.
    ///
    /// A bare descriptor at the level applies to every slot.
    pub fn slot_descriptor(&self, level: &str, slot: &str) -> Option<&str> {
        match self.nodes.get(level)? {
            StyleNode::Descriptor(d) => Some(d),
            StyleNode::Table(table) => table.get(slot).and_then(StyleNode::as_descriptor),
            StyleNode::Data(_) => None,
        }
    }

    /// Whether the level table names `slot`
    pub fn has_slot(&self, level: &str, slot: &str) -> bool {
        self.nodes
            .get(level)
            .and_then(StyleNode::as_table)
            .map(|table| table.contains_key(slot))
            .unwrap_or(false)
    }

    /// Set a single slot, turning the level into a table if needed
    pub fn set_slot(&mut self, level: &str, slot: &str, node: impl Into<StyleNode>) {
        let entry = self
            .nodes
            .entry(level.to_string())
            .or_insert_with(|| StyleNode::Table(BTreeMap::new()));
        if !matches!(entry, StyleNode::Table(_)) {
            *entry = StyleNode::Table(BTreeMap::new());
        }
        if let StyleNode::Table(table) = entry {
            table.insert(slot.to_string(), node.into());
        }
    }

    /// Merge `other` over this tree. Later keys win; tables merge recursively.
    pub fn merge(&mut self, other: StyleTree) {
        merge_maps(&mut self.nodes, other.nodes);
    }

    pub fn merged(mut self, other: StyleTree) -> Self {
        self.merge(other);
        self
    }
}

fn field_slots() -> BTreeMap<String, StyleNode> {
    [
        ("path", "underline"),
        ("url", "cyan.underline"),
        ("id", "magenta"),
        ("count", "yellow"),
        ("value", "green"),
    ]
    .into_iter()
    .map(|(slot, descriptor)| (slot.to_string(), StyleNode::descriptor(descriptor)))
    .collect()
}

fn merge_maps(base: &mut BTreeMap<String, StyleNode>, over: BTreeMap<String, StyleNode>) {
    for (key, node) in over {
        match node {
            StyleNode::Table(incoming) => {
                if let Some(StyleNode::Table(existing)) = base.get_mut(&key) {
                    merge_maps(existing, incoming);
                    continue;
                }
                base.insert(key, StyleNode::Table(incoming));
            }
            node => {
                base.insert(key, node);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_every_level() {
        let tree = StyleTree::defaults();
        for level in crate::Level::ALL {
            assert!(tree.has_slot(level.as_str(), "prefix"), "missing prefix for {}", level);
            assert!(tree.has_slot(level.as_str(), "default"));
        }
        assert_eq!(tree.default_descriptor(), "reset");
        assert_eq!(tree.slot_descriptor("error", "name"), Some("red.bold"));
    }

    #[test]
    fn test_bare_descriptor_covers_all_slots() {
        let tree = StyleTree::defaults();
        assert_eq!(tree.slot_descriptor("brace", "default"), Some("gray"));
        assert_eq!(tree.slot_descriptor("brace", "anything"), Some("gray"));
        assert!(!tree.has_slot("brace", "default"));
    }

    #[test]
    fn test_merge_is_recursive() {
        let mut overrides = StyleTree::empty();
        overrides.set_slot("info", "prefix", "green");
        overrides.insert("brace", "white");

        let tree = StyleTree::defaults().merged(overrides);
        assert_eq!(tree.slot_descriptor("info", "prefix"), Some("green"));
        // untouched sibling slot survives
        assert_eq!(tree.slot_descriptor("info", "path"), Some("underline"));
        assert_eq!(tree.slot_descriptor("brace", "default"), Some("white"));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let tree: StyleTree = toml::from_str(
            r#"
            default = "white"
            [warn]
            prefix = "magenta"
            enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(tree.default_descriptor(), "white");
        assert_eq!(tree.slot_descriptor("warn", "prefix"), Some("magenta"));
        assert_eq!(tree.slot_descriptor("warn", "enabled"), None);
        assert!(tree.has_slot("warn", "enabled"));
    }

    #[test]
    fn test_set_slot_replaces_bare_descriptor() {
        let mut tree = StyleTree::defaults();
        tree.set_slot("brace", "open", "red");
        assert_eq!(tree.slot_descriptor("brace", "open"), Some("red"));
        assert_eq!(tree.slot_descriptor("brace", "close"), None);
    }
}
