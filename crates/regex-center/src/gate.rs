//! The public pattern facade.
//!
//! [`PatternGate`] owns a [`PatternStore`] and the security settings, and is
//! the only place the ReDoS heuristic is enforced. With security enabled the
//! heuristic runs when a pattern is admitted into the custom namespace
//! (`add`, `use_patterns`, `inject`) and again every time a resolved pattern is
//! used (`test`, `extract_all`, `count`, `replace_all`, `highlight`). Admission
//! also compiles every expression, whatever the security setting.
//!
//! Compiled expressions are cached together with their heuristic verdict, so
//! repeated use of a key costs one map lookup. Changing `case_sensitive`
//! drops the cache.
//!
//! # Example
//!
//! ```
//! use regex_center::{PatternGate, Replacement};
//!
//! let gate = PatternGate::new();
//!
//! assert!(gate.test("email:basic", "user@example.com")?);
//! assert_eq!(
//!     gate.extract_all("email:basic", "a@b.com and c@d.org")?,
//!     vec!["a@b.com", "c@d.org"]
//! );
//! assert_eq!(
//!     gate.replace_all("phone:CN", "Phone: 13812345678", Replacement::mask(3, 4))?,
//!     "Phone: 138****5678"
//! );
//! # Ok::<(), regex_center::Error>(())
//! ```

use std::borrow::Cow;
use std::fmt;

use dashmap::DashMap;
use regex::{Captures, Regex, RegexBuilder};
use tracing::{debug, info, trace, warn};

use crate::config::{Config, SecurityConfig, SecurityOptions};
use crate::error::{Error, Result};
use crate::patterns::{PatternEntry, PatternMap};
use crate::redos::{self, RedosShape};
use crate::store::PatternStore;

/// Template used by [`PatternGate::highlight`] callers that want plain
/// `<mark>` wrapping.
pub const DEFAULT_HIGHLIGHT: &str = "<mark>$0</mark>";

/// What to substitute for each match in [`PatternGate::replace_all`].
pub enum Replacement<'a> {
    /// A template in `regex` crate syntax: `$0` is the whole match, `$1` or
    /// `${name}` a capture group, `$$` a literal `$`.
    Template(Cow<'a, str>),

    /// Called once per match, left to right; the result replaces the match.
    Callback(Box<dyn FnMut(&Captures<'_>) -> String + 'a>),
}

impl<'a> Replacement<'a> {
    /// A template replacement.
    #[must_use]
    pub fn template(template: impl Into<Cow<'a, str>>) -> Self {
        Self::Template(template.into())
    }

    /// A callback replacement.
    #[must_use]
    pub fn callback(f: impl FnMut(&Captures<'_>) -> String + 'a) -> Self {
        Self::Callback(Box::new(f))
    }

    /// Mask each match, keeping its first `keep_start` and last `keep_end`
    /// characters and replacing the rest with `*`. Matches too short to
    /// leave anything to hide are masked entirely.
    #[must_use]
    pub fn mask(keep_start: usize, keep_end: usize) -> Self {
        Self::callback(move |caps| mask_middle(&caps[0], keep_start, keep_end))
    }
}

impl fmt::Debug for Replacement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl<'a> From<&'a str> for Replacement<'a> {
    fn from(template: &'a str) -> Self {
        Self::template(template)
    }
}

impl From<String> for Replacement<'_> {
    fn from(template: String) -> Self {
        Self::template(template)
    }
}

fn mask_middle(text: &str, keep_start: usize, keep_end: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= keep_start.saturating_add(keep_end) {
        return "*".repeat(chars.len());
    }
    let hidden = chars.len() - keep_start - keep_end;
    let mut masked = String::with_capacity(text.len());
    masked.extend(&chars[..keep_start]);
    masked.extend(std::iter::repeat('*').take(hidden));
    masked.extend(&chars[chars.len() - keep_end..]);
    masked
}

/// A built expression and the heuristic's verdict on it.
#[derive(Debug, Clone)]
struct Compiled {
    regex: Regex,
    shape: Option<RedosShape>,
}

/// Named-pattern facade with ReDoS screening.
#[derive(Debug, Clone, Default)]
pub struct PatternGate {
    store: PatternStore,
    security: SecurityConfig,
    /// Expression text to its build under the current case setting.
    compiled: DashMap<String, Compiled>,
}

impl PatternGate {
    /// Create a gate over the built-in table with default security settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gate over an existing store.
    #[must_use]
    pub fn with_store(store: PatternStore) -> Self {
        Self {
            store,
            security: SecurityConfig::default(),
            compiled: DashMap::new(),
        }
    }

    /// Create a gate from loaded configuration: apply its security settings,
    /// then inject its custom patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured pattern fails admission.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut gate = Self {
            store: PatternStore::new(),
            security: config.security,
            compiled: DashMap::new(),
        };
        let patterns = config.pattern_map();
        if !patterns.is_empty() {
            gate.inject(patterns)?;
        }
        Ok(gate)
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &PatternStore {
        &self.store
    }

    /// Current security settings.
    #[must_use]
    pub fn security(&self) -> SecurityConfig {
        self.security
    }

    /// Resolve `key` to its expression without checking it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.store.get(key)
    }

    /// Every key the store holds explicitly.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.store.keys()
    }

    /// Merge `options` into the security settings.
    pub fn configure(&mut self, options: SecurityOptions) {
        let case_sensitive = self.security.case_sensitive;
        self.security.apply(options);
        if self.security.case_sensitive != case_sensitive {
            self.compiled.clear();
        }
        debug!(
            enabled = self.security.enabled,
            case_sensitive = self.security.case_sensitive,
            "security settings updated"
        );
    }

    /// Whether `value` contains a match for the pattern at `key`. A missing
    /// pattern answers `false`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PotentiallyUnsafePattern`] if security is enabled and
    /// the pattern trips the ReDoS heuristic.
    pub fn test(&self, key: &str, value: &str) -> Result<bool> {
        Ok(self
            .resolve(key)?
            .is_some_and(|regex| regex.is_match(value)))
    }

    /// Every non-overlapping match of the pattern at `key`, left to right.
    ///
    /// # Errors
    ///
    /// Same as [`PatternGate::test`].
    pub fn extract_all(&self, key: &str, text: &str) -> Result<Vec<String>> {
        Ok(self.resolve(key)?.map_or_else(Vec::new, |regex| {
            regex
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect()
        }))
    }

    /// Number of non-overlapping matches of the pattern at `key`.
    ///
    /// # Errors
    ///
    /// Same as [`PatternGate::test`].
    pub fn count(&self, key: &str, text: &str) -> Result<usize> {
        Ok(self
            .resolve(key)?
            .map_or(0, |regex| regex.find_iter(text).count()))
    }

    /// Replace every match of the pattern at `key`. A missing pattern leaves
    /// `text` unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`PatternGate::test`].
    pub fn replace_all<'r>(
        &self,
        key: &str,
        text: &str,
        replacement: impl Into<Replacement<'r>>,
    ) -> Result<String> {
        let Some(regex) = self.resolve(key)? else {
            return Ok(text.to_string());
        };
        let replaced = match replacement.into() {
            Replacement::Template(template) => regex.replace_all(text, &*template),
            Replacement::Callback(mut f) => regex.replace_all(text, |caps: &Captures<'_>| f(caps)),
        };
        Ok(replaced.into_owned())
    }

    /// Wrap every match of the pattern at `key` using `template`, e.g.
    /// `<em>$0</em>`.
    ///
    /// # Errors
    ///
    /// Same as [`PatternGate::test`].
    pub fn highlight(&self, key: &str, text: &str, template: &str) -> Result<String> {
        self.replace_all(key, text, Replacement::template(template))
    }

    /// Replace the whole custom namespace. Nothing changes if any pattern
    /// fails admission.
    ///
    /// # Errors
    ///
    /// Returns an error if any expression does not compile or, with security
    /// enabled, trips the ReDoS heuristic.
    pub fn use_patterns(&mut self, patterns: PatternMap) -> Result<()> {
        // Builds of the outgoing namespace are no longer reachable
        self.compiled.clear();
        self.admit_all(&patterns)?;
        info!(types = patterns.len(), "replacing custom patterns");
        self.store.replace_custom(patterns);
        Ok(())
    }

    /// Deep-merge `patterns` into the custom namespace. Nothing changes if
    /// any pattern fails admission.
    ///
    /// # Errors
    ///
    /// Same as [`PatternGate::use_patterns`].
    pub fn inject(&mut self, patterns: PatternMap) -> Result<()> {
        self.admit_all(&patterns)?;
        debug!(types = patterns.len(), "injecting custom patterns");
        self.store.merge_custom(patterns);
        Ok(())
    }

    /// Register a single custom pattern under a simple key.
    ///
    /// # Errors
    ///
    /// Same as [`PatternGate::add_entry`].
    pub fn add(&mut self, key: &str, expression: &str) -> Result<()> {
        self.add_entry(PatternEntry::new(key, expression))
    }

    /// Register a structured custom pattern under its simple key, shadowing
    /// any builtin of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the key contains `:`, the expression does not
    /// compile or, with security enabled, trips the ReDoS heuristic. Nothing
    /// is registered on error.
    pub fn add_entry(&mut self, entry: PatternEntry) -> Result<()> {
        check_type_name(&entry.key)?;
        self.admit(&entry.key, &entry.expression)?;
        debug!(key = %entry.key, "registered custom pattern");
        self.store.insert_custom(entry);
        Ok(())
    }

    fn admit_all(&self, patterns: &PatternMap) -> Result<()> {
        for (type_name, node) in patterns {
            check_type_name(type_name)?;
            for (key, expression) in node.expressions(type_name) {
                self.admit(&key, expression)?;
            }
        }
        Ok(())
    }

    fn admit(&self, key: &str, expression: &str) -> Result<()> {
        self.compile(key, expression).map(drop)
    }

    fn screen(&self, key: &str, expression: &str, shape: Option<RedosShape>) -> Result<()> {
        if !self.security.enabled {
            return Ok(());
        }
        if let Some(shape) = shape {
            warn!(key, expression, %shape, "rejecting potentially unsafe pattern");
            return Err(Error::unsafe_pattern(key, expression));
        }
        Ok(())
    }

    /// Screen `expression` and return its build, compiling it on first use.
    fn compile(&self, key: &str, expression: &str) -> Result<Regex> {
        if let Some(cached) = self.compiled.get(expression) {
            self.screen(key, expression, cached.shape)?;
            return Ok(cached.regex.clone());
        }

        let shape = redos::check(expression);
        self.screen(key, expression, shape)?;
        let regex = RegexBuilder::new(expression)
            .case_insensitive(!self.security.case_sensitive)
            .build()
            .map_err(|source| Error::invalid_pattern(key, source))?;
        trace!(key, "compiled pattern");
        self.compiled.insert(
            expression.to_string(),
            Compiled {
                regex: regex.clone(),
                shape,
            },
        );
        Ok(regex)
    }

    /// Resolve, screen and compile the pattern at `key`.
    fn resolve(&self, key: &str) -> Result<Option<Regex>> {
        let Some(expression) = self.store.get(key) else {
            debug!(key, "no pattern registered");
            return Ok(None);
        };
        self.compile(key, expression).map(Some)
    }
}

/// Custom type names may not contain `:`, which lookups read as the
/// `type:group` separator.
fn check_type_name(type_name: &str) -> Result<()> {
    if type_name.contains(':') {
        return Err(Error::config_validation(format!(
            "pattern name '{type_name}' contains ':', which is reserved for type:group keys"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{Examples, PatternGroup, PatternNode};

    fn map(entries: impl IntoIterator<Item = (&'static str, PatternNode)>) -> PatternMap {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_email_scenarios() {
        let gate = PatternGate::new();
        assert!(gate.test("email:basic", "user@example.com").unwrap());
        assert!(!gate.test("email:basic", "not-an-email").unwrap());
        assert!(!gate.test("email:basic", "").unwrap());
    }

    #[test]
    fn test_missing_pattern_sentinels() {
        let gate = PatternGate::new();
        assert_eq!(gate.get("doesNotExist"), None);
        assert!(!gate.test("doesNotExist", "anything").unwrap());
        assert!(gate.extract_all("doesNotExist", "anything").unwrap().is_empty());
        assert_eq!(gate.count("doesNotExist", "anything").unwrap(), 0);
        assert_eq!(
            gate.replace_all("doesNotExist", "anything", "X").unwrap(),
            "anything"
        );
        assert_eq!(
            gate.highlight("email:nonexistent", "a@b.com", "<b>$0</b>")
                .unwrap(),
            "a@b.com"
        );
    }

    #[test]
    fn test_builtin_qualified_keys_resolve_to_stored_expression() {
        let gate = PatternGate::new();
        for (type_name, node) in gate.store().builtin() {
            for (key, expression) in node.expressions(type_name) {
                assert_eq!(gate.get(&key), Some(expression), "key {key}");
            }
        }
    }

    #[test]
    fn test_builtin_simple_keys_resolve_to_default() {
        let gate = PatternGate::new();
        for (type_name, node) in gate.store().builtin() {
            if let PatternNode::Group(group) = node {
                let default = group.default_key().unwrap();
                assert_eq!(
                    gate.get(type_name),
                    gate.get(&format!("{type_name}:{default}")),
                    "type {type_name}"
                );
                assert_eq!(gate.get(type_name), gate.get(&format!("{type_name}:default")));
            }
        }
    }

    #[test]
    fn test_extract_all_in_order() {
        let gate = PatternGate::new();
        assert_eq!(
            gate.extract_all("email:basic", "a@b.com and c@d.org").unwrap(),
            vec!["a@b.com", "c@d.org"]
        );
        assert!(gate
            .extract_all("email:basic", "No emails here")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_count_matches_extract_all() {
        let gate = PatternGate::new();
        let text = "Contact us at test@example.com or support@example.org, call 13812345678";
        for key in ["email:basic", "phone:CN", "url", "ip", "doesNotExist"] {
            assert_eq!(
                gate.count(key, text).unwrap(),
                gate.extract_all(key, text).unwrap().len(),
                "key {key}"
            );
        }
        assert_eq!(gate.count("email:basic", text).unwrap(), 2);
    }

    #[test]
    fn test_replace_all_template() {
        let gate = PatternGate::new();
        assert_eq!(
            gate.replace_all("url", "Visit https://x.com now", "[LINK]")
                .unwrap(),
            "Visit [LINK] now"
        );
        assert_eq!(
            gate.replace_all(
                "url",
                "Visit https://www.example.com or http://www.test.org",
                "[LINK]"
            )
            .unwrap(),
            "Visit [LINK] or [LINK]"
        );
    }

    #[test]
    fn test_replace_all_callback() {
        let gate = PatternGate::new();
        let result = gate
            .replace_all(
                "phone:CN",
                "Phone: 13812345678",
                Replacement::callback(|caps| format!("<{}>", &caps[0])),
            )
            .unwrap();
        assert_eq!(result, "Phone: <13812345678>");
    }

    #[test]
    fn test_replace_all_callback_called_per_match() {
        let gate = PatternGate::new();
        let mut seen = Vec::new();
        let result = gate
            .replace_all(
                "phone:CN",
                "13812345678, 13987654321",
                Replacement::callback(|caps| {
                    seen.push(caps[0].to_string());
                    format!("#{}", seen.len())
                }),
            )
            .unwrap();

        assert_eq!(result, "#1, #2");
        assert_eq!(seen, vec!["13812345678", "13987654321"]);
    }

    #[test]
    fn test_replace_all_mask() {
        let gate = PatternGate::new();
        assert_eq!(
            gate.replace_all(
                "phone:CN",
                "用户手机：13812345678，备用手机：13987654321",
                Replacement::mask(3, 4)
            )
            .unwrap(),
            "用户手机：138****5678，备用手机：139****4321"
        );
    }

    #[test]
    fn test_mask_middle() {
        assert_eq!(mask_middle("13812345678", 3, 4), "138****5678");
        assert_eq!(mask_middle("abc", 2, 2), "***");
        assert_eq!(mask_middle("张三丰大侠", 1, 1), "张***侠");
        assert_eq!(mask_middle("", 1, 1), "");
    }

    #[test]
    fn test_mask_with_oversized_keep_counts() {
        assert_eq!(mask_middle("13812345678", usize::MAX, 4), "***********");
        assert_eq!(mask_middle("13812345678", 3, usize::MAX), "***********");
        assert_eq!(mask_middle("abc", usize::MAX, usize::MAX), "***");

        let gate = PatternGate::new();
        assert_eq!(
            gate.replace_all("phone:CN", "13812345678", Replacement::mask(usize::MAX, 4))
                .unwrap(),
            "***********"
        );
    }

    #[test]
    fn test_highlight() {
        let gate = PatternGate::new();
        assert_eq!(
            gate.highlight("email:basic", "Email: test@example.com", "<em>$0</em>")
                .unwrap(),
            "Email: <em>test@example.com</em>"
        );
        assert_eq!(
            gate.highlight("email:basic", "x@y.io", DEFAULT_HIGHLIGHT)
                .unwrap(),
            "<mark>x@y.io</mark>"
        );
    }

    #[test]
    fn test_add_shadows_builtin() {
        let mut gate = PatternGate::new();
        assert!(gate.test("url", "https://x.com").unwrap());

        gate.add("url", "^ftp://").unwrap();
        assert_eq!(gate.get("url"), Some("^ftp://"));
        assert!(!gate.test("url", "https://x.com").unwrap());
        assert!(gate.test("url", "ftp://x.com").unwrap());
        // Qualified builtin keys are untouched.
        assert!(gate.test("url:basic", "https://x.com").unwrap());
    }

    #[test]
    fn test_add_with_metadata() {
        let mut gate = PatternGate::new();
        gate.add_entry(
            PatternEntry::new("custom", "^custom-pattern$")
                .with_description("Custom pattern for testing")
                .with_examples(Examples {
                    valid: vec!["custom-pattern".to_string()],
                    invalid: vec!["invalid-pattern".to_string()],
                }),
        )
        .unwrap();

        assert!(gate.test("custom", "custom-pattern").unwrap());
        assert!(!gate.test("custom", "invalid-pattern").unwrap());
    }

    #[test]
    fn test_add_rejects_unsafe_pattern() {
        let mut gate = PatternGate::new();
        let err = gate.add("dangerous", "^(a+)+$").unwrap_err();

        assert!(err.is_unsafe_pattern());
        assert!(err.to_string().contains("dangerous"));
        assert!(err.to_string().contains("^(a+)+$"));
        assert_eq!(gate.get("dangerous"), None);
    }

    #[test]
    fn test_add_unsafe_pattern_with_security_disabled() {
        let mut gate = PatternGate::new();
        gate.configure(SecurityOptions::default().enabled(false));

        gate.add("dangerous", "^(a+)+$").unwrap();
        assert!(gate.test("dangerous", "aaaaaaaaaa").unwrap());
    }

    #[test]
    fn test_use_time_check_after_reenabling_security() {
        let mut gate = PatternGate::new();
        gate.configure(SecurityOptions::default().enabled(false));
        gate.add("dangerous", "^(a+)+$").unwrap();

        gate.configure(SecurityOptions::default().enabled(true));
        assert!(gate.test("dangerous", "aaaa").unwrap_err().is_unsafe_pattern());
        assert!(gate
            .extract_all("dangerous", "aaaa")
            .unwrap_err()
            .is_unsafe_pattern());
        assert!(gate.count("dangerous", "aaaa").is_err());
        assert!(gate.replace_all("dangerous", "aaaa", "b").is_err());
        assert!(gate.highlight("dangerous", "aaaa", "$0").is_err());
    }

    #[test]
    fn test_add_rejects_invalid_regex_even_when_insecure() {
        let mut gate = PatternGate::new();
        gate.configure(SecurityOptions::default().enabled(false));

        let err = gate.add("broken", "[unclosed").unwrap_err();
        assert!(err.is_invalid_pattern());
        assert_eq!(gate.get("broken"), None);
    }

    #[test]
    fn test_use_patterns_replaces_custom() {
        let mut gate = PatternGate::new();
        gate.inject(map([("y", PatternNode::entry("^y$"))])).unwrap();
        gate.use_patterns(map([("x", PatternNode::entry("^x$"))]))
            .unwrap();

        assert_eq!(gate.get("x"), Some("^x$"));
        assert_eq!(gate.get("y"), None);
        // Builtins survive.
        assert!(gate.get("email:basic").is_some());
    }

    #[test]
    fn test_use_patterns_is_atomic() {
        let mut gate = PatternGate::new();
        gate.inject(map([("keep", PatternNode::entry("^k$"))])).unwrap();

        let result = gate.use_patterns(map([
            ("fine", PatternNode::entry("^f$")),
            ("bad", PatternNode::entry("(a|b)+")),
        ]));

        assert!(result.unwrap_err().is_unsafe_pattern());
        assert_eq!(gate.get("keep"), Some("^k$"));
        assert_eq!(gate.get("fine"), None);
    }

    #[test]
    fn test_inject_disjoint_and_idempotent() {
        let mut gate = PatternGate::new();
        gate.inject(map([("a", PatternNode::entry("^1$"))])).unwrap();
        gate.inject(map([("b", PatternNode::entry("^2$"))])).unwrap();
        assert_eq!(gate.get("a"), Some("^1$"));
        assert_eq!(gate.get("b"), Some("^2$"));

        let before = gate.store().custom().clone();
        gate.inject(map([("b", PatternNode::entry("^2$"))])).unwrap();
        assert_eq!(gate.store().custom(), &before);
    }

    #[test]
    fn test_inject_group_merges_with_builtin_lookup() {
        let mut gate = PatternGate::new();
        gate.inject(map([(
            "username",
            PatternNode::Group(
                PatternGroup::new()
                    .with("strict", "^[a-zA-Z][a-zA-Z0-9_]{2,19}$")
                    .with_default("strict"),
            ),
        )]))
        .unwrap();
        gate.inject(map([(
            "company",
            PatternNode::Group(
                PatternGroup::new()
                    .with("name", r"^[a-zA-Z0-9\s&.-]{2,50}$")
                    .with("code", "^[A-Z]{2,10}$"),
            ),
        )]))
        .unwrap();

        assert!(gate.test("username:strict", "john_doe").unwrap());
        assert!(!gate.test("username:strict", "123invalid").unwrap());
        assert!(gate.test("company:code", "ACME").unwrap());
        // Custom groups never answer bare type lookups.
        assert_eq!(gate.get("company"), None);
    }

    #[test]
    fn test_inject_rejects_unsafe_group_member() {
        let mut gate = PatternGate::new();
        let err = gate
            .inject(map([(
                "company",
                PatternNode::Group(PatternGroup::new().with("ok", "^a$").with("bad", "([a-z]+)*")),
            )]))
            .unwrap_err();

        assert!(err.to_string().contains("company:bad"));
        assert_eq!(gate.get("company:ok"), None);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let mut gate = PatternGate::new();
        gate.add("companyCode", "^[A-Z]{2,4}$").unwrap();
        assert!(!gate.test("companyCode", "abc").unwrap());

        gate.configure(SecurityOptions::default().case_sensitive(false));
        assert!(gate.test("companyCode", "abc").unwrap());
        assert!(gate.security().enabled);
    }

    #[test]
    fn test_case_toggle_after_cached_use() {
        let mut gate = PatternGate::new();
        assert!(!gate.test("url:basic", "HTTPS://example.com").unwrap());

        gate.configure(SecurityOptions::default().case_sensitive(false));
        assert!(gate.test("url:basic", "HTTPS://example.com").unwrap());

        gate.configure(SecurityOptions::default().case_sensitive(true));
        assert!(!gate.test("url:basic", "HTTPS://example.com").unwrap());
    }

    #[test]
    fn test_repeated_use_compiles_once() {
        let mut gate = PatternGate::new();
        for _ in 0..3 {
            assert!(gate.test("email:basic", "a@b.com").unwrap());
            assert_eq!(gate.count("email:basic", "a@b.com c@d.org").unwrap(), 2);
        }
        assert_eq!(gate.compiled.len(), 1);

        gate.configure(SecurityOptions::default().enabled(false));
        assert_eq!(gate.compiled.len(), 1);

        gate.configure(SecurityOptions::default().case_sensitive(false));
        assert!(gate.compiled.is_empty());
    }

    #[test]
    fn test_cached_verdict_rechecked_under_security() {
        let mut gate = PatternGate::new();
        gate.configure(SecurityOptions::default().enabled(false));
        gate.add("dangerous", "^(a+)+$").unwrap();
        assert!(gate.test("dangerous", "aaa").unwrap());

        gate.configure(SecurityOptions::default().enabled(true));
        assert!(gate.test("dangerous", "aaa").unwrap_err().is_unsafe_pattern());
    }

    #[test]
    fn test_add_rejects_key_with_colon() {
        let mut gate = PatternGate::new();
        let err = gate.add("company:code", "^[A-Z]{2,10}$").unwrap_err();

        assert!(matches!(err, Error::ConfigValidation { .. }));
        assert!(err.to_string().contains("company:code"));
        assert!(gate.store().custom().is_empty());
    }

    #[test]
    fn test_inject_rejects_type_name_with_colon() {
        let mut gate = PatternGate::new();
        let result = gate.inject(map([
            ("ok", PatternNode::entry("^ok$")),
            ("bad:name", PatternNode::entry("^x$")),
        ]));

        assert!(result.is_err());
        assert_eq!(gate.get("ok"), None);
    }

    #[test]
    fn test_qualified_builtin_default_key() {
        let gate = PatternGate::new();
        assert!(gate.test("phone:default", "13812345678").unwrap());
        assert!(gate.test("phone", "13812345678").unwrap());
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.security.case_sensitive = false;
        config.patterns.insert(
            "companyCode".to_string(),
            crate::config::PatternDef::Expression("^[A-Z]{2,4}$".to_string()),
        );

        let gate = PatternGate::from_config(&config).unwrap();
        assert!(!gate.security().case_sensitive);
        assert!(gate.test("companyCode", "abc").unwrap());
    }

    #[test]
    fn test_from_config_rejects_unsafe_pattern() {
        let mut config = Config::default();
        config.patterns.insert(
            "dangerous".to_string(),
            crate::config::PatternDef::Expression("^(a+)+$".to_string()),
        );
        assert!(PatternGate::from_config(&config)
            .unwrap_err()
            .is_unsafe_pattern());

        config.security.enabled = false;
        assert!(PatternGate::from_config(&config).is_ok());
    }

    #[test]
    fn test_replacement_debug() {
        assert_eq!(
            format!("{:?}", Replacement::from("[X]")),
            r#"Template("[X]")"#
        );
        assert_eq!(
            format!("{:?}", Replacement::mask(1, 1)),
            "Callback(..)"
        );
    }

    #[test]
    fn test_gate_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PatternGate>();
    }
}
