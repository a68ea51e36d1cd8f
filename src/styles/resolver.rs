//! Lazily compiled, memoized view over a style tree
//!
//! Two-level cache: level name -> slot name -> compiled function. A slot
//! is compiled the first time it is looked up and reused afterwards.
//! Writes to the raw tree go through methods that drop the affected
//! cache entries, so the next lookup recompiles from the new source.

use super::compile::{compile, StyleFn};
use super::{StyleNode, StyleTree, DEFAULT_KEY};
use crate::engine::ColorEngine;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct StyleResolver {
    ingress: RwLock<StyleTree>,
    cache: RwLock<HashMap<String, HashMap<String, StyleFn>>>,
    engine: Arc<ColorEngine>,
    compilations: AtomicUsize,
}

impl StyleResolver {
    pub fn new(tree: StyleTree, engine: Arc<ColorEngine>) -> Self {
        Self {
            ingress: RwLock::new(tree),
            cache: RwLock::new(HashMap::new()),
            engine,
            compilations: AtomicUsize::new(0),
        }
    }

    pub fn engine(&self) -> &Arc<ColorEngine> {
        &self.engine
    }

    /// Compiled style for (level, slot)
    pub fn get(&self, level: &str, slot: &str) -> StyleFn {
        if let Some(style) = self
            .cache
            .read()
            .get(level)
            .and_then(|slots| slots.get(slot))
        {
            return Arc::clone(style);
        }

        // Lock order is ingress then cache. Holding the tree read lock until
        // the insert keeps a concurrent edit from racing its invalidation.
        let tree = self.ingress.read();
        let mut cache = self.cache.write();
        let slots = cache.entry(level.to_string()).or_default();
        // Another thread may have compiled it while we waited for the lock
        if let Some(style) = slots.get(slot) {
            return Arc::clone(style);
        }

        let descriptor = tree
            .slot_descriptor(level, slot)
            .unwrap_or_else(|| tree.default_descriptor());
        let style = compile(descriptor, &self.engine);
        self.compilations.fetch_add(1, Ordering::Relaxed);
        slots.insert(slot.to_string(), Arc::clone(&style));
        style
    }

    /// View of a single level, mirroring `target[level]`
    pub fn level<'a>(&'a self, level: &str) -> LevelStyles<'a> {
        LevelStyles {
            resolver: self,
            level: level.to_string(),
        }
    }

    /// Paint `text` with the style for (level, slot)
    pub fn paint(&self, level: &str, slot: &str, text: &str) -> String {
        (self.get(level, slot))(text)
    }

    pub fn has_slot(&self, level: &str, slot: &str) -> bool {
        self.ingress.read().has_slot(level, slot)
    }

    /// Raw node stored under `key`, passed through uncompiled
    pub fn raw(&self, key: &str) -> Option<StyleNode> {
        self.ingress.read().get(key).cloned()
    }

    /// Snapshot of the raw style tree
    pub fn ingress(&self) -> StyleTree {
        self.ingress.read().clone()
    }

    /// Set one slot in the raw tree and drop its compiled entry
    pub fn set_slot(&self, level: &str, slot: &str, node: impl Into<StyleNode>) {
        let mut tree = self.ingress.write();
        tree.set_slot(level, slot, node);
        if level == DEFAULT_KEY {
            self.invalidate_all();
        } else {
            self.invalidate_slot(level, slot);
        }
    }

    /// Replace a whole level node and drop the level's compiled entries
    pub fn set_level(&self, level: &str, node: impl Into<StyleNode>) {
        let mut tree = self.ingress.write();
        tree.insert(level, node);
        if level == DEFAULT_KEY {
            self.invalidate_all();
        } else {
            self.invalidate_level(level);
        }
    }

    /// Arbitrary edit of the raw tree. Drops the whole cache.
    pub fn update_ingress<F>(&self, edit: F)
    where
        F: FnOnce(&mut StyleTree),
    {
        let mut tree = self.ingress.write();
        edit(&mut tree);
        self.invalidate_all();
    }

    pub fn invalidate_slot(&self, level: &str, slot: &str) {
        if let Some(slots) = self.cache.write().get_mut(level) {
            slots.remove(slot);
        }
        log::trace!(target: "stylelog::styles", "Invalidated style {}.{}", level, slot);
    }

    pub fn invalidate_level(&self, level: &str) {
        self.cache.write().remove(level);
        log::trace!(target: "stylelog::styles", "Invalidated styles for {}", level);
    }

    pub fn invalidate_all(&self) {
        self.cache.write().clear();
        log::trace!(target: "stylelog::styles", "Invalidated all compiled styles");
    }

    /// Number of descriptors compiled so far
    pub fn compilations(&self) -> usize {
        self.compilations.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for StyleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached: usize = self.cache.read().values().map(HashMap::len).sum();
        f.debug_struct("StyleResolver")
            .field("ingress", &*self.ingress.read())
            .field("cached", &cached)
            .field("engine", &self.engine)
            .finish()
    }
}

/// Compiled styles of one level
pub struct LevelStyles<'a> {
    resolver: &'a StyleResolver,
    level: String,
}

impl LevelStyles<'_> {
    pub fn slot(&self, slot: &str) -> StyleFn {
        self.resolver.get(&self.level, slot)
    }

    pub fn paint(&self, slot: &str, text: &str) -> String {
        self.resolver.paint(&self.level, slot, text)
    }

    pub fn has_slot(&self, slot: &str) -> bool {
        self.resolver.has_slot(&self.level, slot)
    }

    pub fn name(&self) -> &str {
        &self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ColorLevel;

    fn resolver(level: ColorLevel) -> StyleResolver {
        StyleResolver::new(StyleTree::defaults(), Arc::new(ColorEngine::new(level)))
    }

    #[test]
    fn test_lookup_is_memoized() {
        let styles = resolver(ColorLevel::Basic);
        let first = styles.get("warn", "prefix");
        let second = styles.get("warn", "prefix");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first("WARN"), second("WARN"));
        assert_eq!(styles.compilations(), 1);

        styles.get("warn", "default");
        assert_eq!(styles.compilations(), 2);
    }

    #[test]
    fn test_missing_slot_uses_root_default() {
        let styles = resolver(ColorLevel::Basic);
        styles.set_level("default", "green");
        let green = compile("green", styles.engine());
        assert_eq!(styles.paint("info", "nonexistent", "x"), green("x"));
        assert_eq!(styles.paint("unknown-level", "any", "x"), green("x"));
    }

    #[test]
    fn test_slot_update_invalidates_cached_entry() {
        let styles = resolver(ColorLevel::Basic);
        let before = styles.paint("info", "prefix", "x");

        styles.set_slot("info", "prefix", "red");
        let after = styles.paint("info", "prefix", "x");

        assert_ne!(before, after);
        assert_eq!(after, compile("red", styles.engine())("x"));
        assert_eq!(styles.ingress().slot_descriptor("info", "prefix"), Some("red"));
    }

    #[test]
    fn test_default_update_invalidates_fallbacks() {
        let styles = resolver(ColorLevel::Basic);
        let plain = styles.paint("log", "missing", "x");
        styles.update_ingress(|tree| tree.insert("default", "blue"));
        assert_ne!(styles.paint("log", "missing", "x"), plain);
    }

    #[test]
    fn test_concurrent_update_leaves_no_stale_entry() {
        let styles = resolver(ColorLevel::Basic);
        let green = "\x1b[32mx\x1b[0m";

        for _ in 0..50 {
            styles.set_slot("info", "prefix", "red");
            std::thread::scope(|scope| {
                scope.spawn(|| {
                    for _ in 0..200 {
                        styles.paint("info", "prefix", "x");
                    }
                });
                scope.spawn(|| {
                    for i in 0..200 {
                        styles.set_slot("info", "prefix", if i % 2 == 0 { "green" } else { "red" });
                    }
                    styles.set_slot("info", "prefix", "green");
                });
            });

            assert_eq!(styles.paint("info", "prefix", "x"), green);
        }
    }

    #[test]
    fn test_non_string_entries_pass_through() {
        let styles = resolver(ColorLevel::None);
        styles.set_level("meta", StyleNode::Data(serde_json::json!({"width": 10})));
        assert_eq!(
            styles.raw("meta"),
            Some(StyleNode::Data(serde_json::json!({"width": 10})))
        );
        // compiled view still works and falls back to the default descriptor
        assert_eq!(styles.paint("meta", "width", "x"), "x");
    }

    #[test]
    fn test_level_view() {
        let styles = resolver(ColorLevel::None);
        let info = styles.level("info");
        assert_eq!(info.name(), "info");
        assert!(info.has_slot("prefix"));
        assert_eq!(info.paint("prefix", "ready"), "ready");
    }
}
