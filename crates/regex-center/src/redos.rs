//! Heuristic ReDoS screening.
//!
//! Scans the raw text of an expression for a handful of shapes known to cause
//! catastrophic backtracking in backtracking engines. This is a best-effort
//! filter, not a proof: plenty of dangerous expressions slip through and some
//! harmless ones are rejected.
//!
//! The `regex` crate itself matches in linear time, so these shapes are not a
//! hazard for this crate's own matching. They are still screened so that
//! registered patterns stay safe to hand to backtracking engines elsewhere.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// A catastrophic-backtracking shape recognized by the heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedosShape {
    /// A group containing a character class, repeated: `([a-z]+\.)+`.
    RepeatedClassGroup,
    /// A repeated two-way alternation: `(a|ab)*`.
    RepeatedAlternation,
    /// A group ending in `*)` followed by stacked quantifiers: `((a)*)++`.
    StackedQuantifier,
    /// A nested group whose outer group has stacked quantifiers: `(x(y)z)++`.
    NestedGroupRepetition,
    /// A group whose body ends in a quantifier, repeated: `(a+)+`.
    NestedQuantifier,
}

impl RedosShape {
    /// Human-readable description of the shape.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::RepeatedClassGroup => "repeated group containing a character class",
            Self::RepeatedAlternation => "repeated alternation",
            Self::StackedQuantifier => "stacked quantifiers after a starred group",
            Self::NestedGroupRepetition => "nested group with stacked quantifiers",
            Self::NestedQuantifier => "nested quantifier",
        }
    }
}

impl fmt::Display for RedosShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[allow(clippy::expect_used)]
static RULES: LazyLock<Vec<(RedosShape, Regex)>> = LazyLock::new(|| {
    [
        (
            RedosShape::RepeatedClassGroup,
            r"\([^)]*\[[^\]]*\][^)]*\)[+*]",
        ),
        (RedosShape::RepeatedAlternation, r"\([^|)]*\|[^|)]*\)[+*]"),
        (RedosShape::StackedQuantifier, r"\([^)]*\)\*\)[+*]{2,}"),
        (
            RedosShape::NestedGroupRepetition,
            r"\([^)]*\([^)]*\)[^)]*\)[+*]{2,}",
        ),
        (RedosShape::NestedQuantifier, r"\([^()]*[+*]\)[+*]"),
    ]
    .into_iter()
    .map(|(shape, rule)| (shape, Regex::new(rule).expect("valid regex")))
    .collect()
});

/// Return the first dangerous shape found in `expression`, if any.
#[must_use]
pub fn check(expression: &str) -> Option<RedosShape> {
    RULES
        .iter()
        .find(|(_, rule)| rule.is_match(expression))
        .map(|(shape, _)| *shape)
}
