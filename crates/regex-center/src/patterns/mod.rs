//! Named pattern definitions.
//!
//! A pattern type maps either directly to a single [`PatternEntry`] or to a
//! [`PatternGroup`] of named variants (`email:basic`, `phone:CN`, ...), with an
//! optional default variant used when a lookup names only the type.
//!
//! # Example
//!
//! ```
//! use regex_center::patterns::{PatternGroup, PatternMap, PatternNode};
//!
//! let mut custom = PatternMap::new();
//! custom.insert(
//!     "company".to_string(),
//!     PatternNode::Group(
//!         PatternGroup::new()
//!             .with("name", r"^[a-zA-Z0-9\s&.-]{2,50}$")
//!             .with("code", "^[A-Z]{2,10}$")
//!             .with_default("code"),
//!     ),
//! );
//! custom.insert("companyCode".to_string(), PatternNode::entry("^[A-Z]{2,4}$"));
//! ```

mod builtin;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use builtin::builtin_patterns;

/// Type name → pattern node.
pub type PatternMap = BTreeMap<String, PatternNode>;

/// Sample inputs documenting a pattern. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Examples {
    /// Inputs the pattern is meant to accept.
    pub valid: Vec<String>,
    /// Inputs the pattern is meant to reject.
    pub invalid: Vec<String>,
}

/// A single named regular expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    /// Identifier, unique within its owning scope.
    pub key: String,

    /// The expression, in `regex` crate syntax.
    pub expression: String,

    /// Free-text description.
    pub description: Option<String>,

    /// Sample inputs.
    pub examples: Option<Examples>,
}

impl PatternEntry {
    /// Create an entry with no description or examples.
    #[must_use]
    pub fn new(key: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            expression: expression.into(),
            description: None,
            examples: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach sample inputs.
    #[must_use]
    pub fn with_examples(mut self, examples: Examples) -> Self {
        self.examples = Some(examples);
        self
    }
}

/// Named variants of one pattern type, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternGroup {
    entries: Vec<PatternEntry>,
    default: Option<String>,
}

impl PatternGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variant, builder style.
    #[must_use]
    pub fn with(self, key: impl Into<String>, expression: impl Into<String>) -> Self {
        self.with_entry(PatternEntry::new(key, expression))
    }

    /// Add a structured variant, builder style.
    #[must_use]
    pub fn with_entry(mut self, entry: PatternEntry) -> Self {
        self.insert(entry);
        self
    }

    /// Name the default variant, builder style.
    #[must_use]
    pub fn with_default(mut self, key: impl Into<String>) -> Self {
        self.default = Some(key.into());
        self
    }

    /// Insert a variant, replacing an existing one with the same key in place.
    pub fn insert(&mut self, entry: PatternEntry) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Look up a variant by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PatternEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Name of the default variant, if one is declared.
    #[must_use]
    pub fn default_key(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The declared default variant. `None` when no default is declared or
    /// it names a key that is not in the group.
    #[must_use]
    pub fn default_entry(&self) -> Option<&PatternEntry> {
        self.default_key().and_then(|key| self.get(key))
    }

    /// The first-inserted variant.
    #[must_use]
    pub fn first(&self) -> Option<&PatternEntry> {
        self.entries.first()
    }

    /// All variants in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    /// Merge `other` into `self`: its variants win on key conflicts, ours
    /// survive otherwise, and its default wins when it declares one.
    pub fn merge(&mut self, other: PatternGroup) {
        for entry in other.entries {
            self.insert(entry);
        }
        if other.default.is_some() {
            self.default = other.default;
        }
    }
}

/// What a pattern type maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternNode {
    /// A single expression.
    Entry(PatternEntry),
    /// Named variants.
    Group(PatternGroup),
}

impl PatternNode {
    /// A bare expression with no metadata. The entry key is left empty and
    /// filled in by the type name it is registered under.
    #[must_use]
    pub fn entry(expression: impl Into<String>) -> Self {
        Self::Entry(PatternEntry::new(String::new(), expression))
    }

    /// Deep-merge `other` into `self`.
    ///
    /// Two groups merge variant-wise; any other combination is a leaf
    /// conflict and `other` replaces `self`.
    pub fn merge(&mut self, other: PatternNode) {
        match (self, other) {
            (Self::Group(ours), Self::Group(theirs)) => ours.merge(theirs),
            (this, other) => *this = other,
        }
    }

    /// Every expression in this node, paired with its `type` or `type:group`
    /// key.
    #[must_use]
    pub fn expressions(&self, type_name: &str) -> Vec<(String, &str)> {
        match self {
            Self::Entry(entry) => vec![(type_name.to_string(), entry.expression.as_str())],
            Self::Group(group) => group
                .entries()
                .iter()
                .map(|e| (format!("{type_name}:{}", e.key), e.expression.as_str()))
                .collect(),
        }
    }
}
