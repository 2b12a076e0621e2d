//! Pattern storage and key resolution.
//!
//! The store keeps two namespaces: the immutable built-in table and a mutable
//! custom namespace that shadows it. Keys are either `type` or `type:group`;
//! only the first `:` separates the two, so `time:HH:MM` names group `HH:MM`.
//!
//! Default-group resolution differs between the namespaces. A builtin group
//! answers a bare `type` lookup with its declared default (or, failing that,
//! its first entry) and answers `type:default` with the declared default. A
//! custom group answers only explicit `type:group` lookups.

use tracing::trace;

use crate::patterns::{builtin_patterns, PatternEntry, PatternMap, PatternNode};

/// Group name that selects a builtin group's declared default.
pub const DEFAULT_GROUP: &str = "default";

/// Builtin and custom pattern namespaces.
#[derive(Debug, Clone)]
pub struct PatternStore {
    builtin: PatternMap,
    custom: PatternMap,
}

impl PatternStore {
    /// Create a store holding the built-in table and an empty custom namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::with_builtin(builtin_patterns())
    }

    /// Create a store over an explicit builtin table.
    #[must_use]
    pub fn with_builtin(builtin: PatternMap) -> Self {
        Self {
            builtin,
            custom: PatternMap::new(),
        }
    }

    /// Resolve `key` to an expression. Never fails; a miss is `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let resolved = match key.split_once(':') {
            Some((type_name, group)) => self.resolve_qualified(type_name, group),
            None => self.resolve_simple(key),
        };
        trace!(key, found = resolved.is_some(), "resolved pattern key");
        resolved
    }

    fn resolve_qualified(&self, type_name: &str, group: &str) -> Option<&str> {
        if let Some(PatternNode::Group(custom)) = self.custom.get(type_name) {
            if let Some(entry) = custom.get(group) {
                return Some(entry.expression.as_str());
            }
        }

        let PatternNode::Group(builtin) = self.builtin.get(type_name)? else {
            return None;
        };
        if let Some(entry) = builtin.get(group) {
            return Some(entry.expression.as_str());
        }
        if group == DEFAULT_GROUP {
            return builtin.default_entry().map(|e| e.expression.as_str());
        }
        None
    }

    fn resolve_simple(&self, type_name: &str) -> Option<&str> {
        // Custom groups do not resolve defaults; fall through to builtin.
        if let Some(PatternNode::Entry(entry)) = self.custom.get(type_name) {
            return Some(entry.expression.as_str());
        }

        match self.builtin.get(type_name)? {
            PatternNode::Entry(entry) => Some(entry.expression.as_str()),
            PatternNode::Group(group) => group
                .default_entry()
                .or_else(|| group.first())
                .map(|e| e.expression.as_str()),
        }
    }

    /// Replace the whole custom namespace.
    pub fn replace_custom(&mut self, patterns: PatternMap) {
        self.custom = normalize(patterns);
    }

    /// Deep-merge `patterns` into the custom namespace.
    pub fn merge_custom(&mut self, patterns: PatternMap) {
        for (type_name, node) in normalize(patterns) {
            match self.custom.get_mut(&type_name) {
                Some(existing) => existing.merge(node),
                None => {
                    self.custom.insert(type_name, node);
                }
            }
        }
    }

    /// Register a single simple-key custom entry, replacing whatever the key
    /// held before.
    pub fn insert_custom(&mut self, entry: PatternEntry) {
        self.custom.insert(entry.key.clone(), PatternNode::Entry(entry));
    }

    /// The built-in namespace.
    #[must_use]
    pub fn builtin(&self) -> &PatternMap {
        &self.builtin
    }

    /// The custom namespace.
    #[must_use]
    pub fn custom(&self) -> &PatternMap {
        &self.custom
    }

    /// Every explicitly stored key, builtin then custom, each in sorted type
    /// order. Groups contribute one `type:group` key per entry and entries
    /// contribute their bare `type`.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        for namespace in [&self.builtin, &self.custom] {
            for (type_name, node) in namespace {
                for (key, _) in node.expressions(type_name) {
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
            }
        }
        keys
    }
}

impl Default for PatternStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Give keyless top-level entries the type name they are registered under.
fn normalize(patterns: PatternMap) -> PatternMap {
    patterns
        .into_iter()
        .map(|(type_name, mut node)| {
            if let PatternNode::Entry(entry) = &mut node {
                if entry.key.is_empty() {
                    entry.key.clone_from(&type_name);
                }
            }
            (type_name, node)
        })
        .collect()
}
