//! Built-in pattern table.
//!
//! Every group declares a default variant. Expressions avoid lookaround
//! (unsupported by the `regex` crate) and the quantified-group shapes the
//! ReDoS heuristic rejects; bounded `{m,n}` repetition is used instead.

use super::{PatternEntry, PatternGroup, PatternMap, PatternNode};

fn group(node: PatternGroup) -> PatternNode {
    PatternNode::Group(node)
}

/// Build the built-in pattern table.
#[must_use]
pub fn builtin_patterns() -> PatternMap {
    let mut table = PatternMap::new();
    let mut insert = |name: &str, node: PatternNode| {
        table.insert(name.to_string(), node);
    };

    // Contact details
    insert(
        "email",
        group(
            PatternGroup::new()
                .with(
                    "basic",
                    r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
                )
                .with(
                    "strict",
                    r"^[A-Za-z0-9._%+-]{1,64}@[A-Za-z0-9-]{1,63}(?:\.[A-Za-z0-9-]{1,63}){0,8}\.[A-Za-z]{2,24}$",
                )
                .with(
                    "enterprise",
                    r"^[A-Za-z][A-Za-z0-9._-]{0,63}@[A-Za-z0-9-]{1,63}\.(?:com|net|org|cn|io|co|biz)(?:\.[a-z]{2})?$",
                )
                .with_default("basic"),
        ),
    );
    insert(
        "phone",
        group(
            PatternGroup::new()
                .with("CN", r"(?:\+86|\b86|\b)1[3-9]\d{9}\b")
                .with(
                    "US",
                    r"(?:\+1[-. ]?|\b)\(?[2-9]\d{2}\)?[-. ]?\d{3}[-. ]?\d{4}\b",
                )
                .with("UK", r"(?:\+44 ?|\b0)\d{4} ?\d{6}\b")
                .with_default("CN"),
        ),
    );
    insert("qq", PatternNode::Entry(PatternEntry::new("qq", r"^[1-9]\d{4,10}$")));

    // Identity and finance
    insert(
        "idCard",
        group(
            PatternGroup::new()
                .with(
                    "CN",
                    r"\b[1-9]\d{5}(?:18|19|20)\d{2}(?:0[1-9]|1[0-2])(?:0[1-9]|[12]\d|3[01])\d{3}[\dXx]\b",
                )
                .with_default("CN"),
        ),
    );
    insert(
        "bankCard",
        group(
            PatternGroup::new()
                .with("CN", r"\b[1-9]\d{15,18}\b")
                .with_default("CN"),
        ),
    );
    insert(
        "creditCard",
        group(
            PatternGroup::new()
                .with("VISA", r"\b4\d{12}(?:\d{3})?\b")
                .with("MASTERCARD", r"\b5[1-5]\d{14}\b")
                .with("AMEX", r"\b3[47]\d{13}\b")
                .with("any", r"\b(?:4\d{12}(?:\d{3})?|5[1-5]\d{14}|3[47]\d{13})\b")
                .with_default("any"),
        ),
    );
    insert(
        "currency",
        group(
            PatternGroup::new()
                .with("CNY", r"^[¥￥]?\d{1,15}(?:\.\d{1,2})?$")
                .with("USD", r"^\$?\d{1,3}(?:,?\d{3}){0,4}(?:\.\d{2})?$")
                .with("EUR", r"^€?\d{1,15}(?:[.,]\d{2})?$")
                .with_default("CNY"),
        ),
    );

    // Network
    insert(
        "url",
        group(
            PatternGroup::new()
                .with(
                    "basic",
                    r"https?://[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?::\d{1,5})?(?:/\S*)?",
                )
                .with(
                    "strict",
                    r"^https?://(?:[A-Za-z0-9-]{1,63}\.){1,10}[A-Za-z]{2,24}(?::\d{1,5})?(?:/\S*)?$",
                )
                .with_default("basic"),
        ),
    );
    insert(
        "ip",
        group(
            PatternGroup::new()
                .with(
                    "v4",
                    r"\b(?:(?:25[0-5]|2[0-4]\d|1\d{2}|[1-9]?\d)\.){3}(?:25[0-5]|2[0-4]\d|1\d{2}|[1-9]?\d)\b",
                )
                .with("v6", r"\b(?:[0-9A-Fa-f]{1,4}:){7}[0-9A-Fa-f]{1,4}\b")
                .with_default("v4"),
        ),
    );
    insert(
        "macAddress",
        group(
            PatternGroup::new()
                .with("basic", r"^[0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2}){5}$")
                .with("colon", r"^[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5}$")
                .with("hyphen", r"^[0-9A-Fa-f]{2}(?:-[0-9A-Fa-f]{2}){5}$")
                .with_default("basic"),
        ),
    );

    // Accounts
    insert(
        "username",
        group(
            PatternGroup::new()
                .with("basic", r"^[A-Za-z0-9_]{3,20}$")
                .with("strict", r"^[A-Za-z][A-Za-z0-9_]{2,19}$")
                .with_default("basic"),
        ),
    );
    insert(
        "password",
        group(
            PatternGroup::new()
                .with("basic", r"^\S{6,20}$")
                .with("medium", r"^[A-Za-z\d!@#$%^&*._-]{8,32}$")
                .with_default("medium"),
        ),
    );

    // Dates and times
    insert(
        "date",
        group(
            PatternGroup::new()
                .with(
                    "YYYY-MM-DD",
                    r"^\d{4}-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12]\d|3[01])$",
                )
                .with(
                    "DD/MM/YYYY",
                    r"^(?:0[1-9]|[12]\d|3[01])/(?:0[1-9]|1[0-2])/\d{4}$",
                )
                .with(
                    "MM/DD/YYYY",
                    r"^(?:0[1-9]|1[0-2])/(?:0[1-9]|[12]\d|3[01])/\d{4}$",
                )
                .with_default("YYYY-MM-DD"),
        ),
    );
    insert(
        "time",
        group(
            PatternGroup::new()
                .with("HH:MM", r"^(?:[01]\d|2[0-3]):[0-5]\d$")
                .with("HH:MM:SS", r"^(?:[01]\d|2[0-3]):[0-5]\d:[0-5]\d$")
                .with_default("HH:MM"),
        ),
    );

    // Locale
    insert(
        "postalCode",
        group(
            PatternGroup::new()
                .with("CN", r"^[1-9]\d{5}$")
                .with("US", r"^\d{5}(?:-\d{4})?$")
                .with("UK", r"^[A-Z]{1,2}\d[A-Z\d]? ?\d[A-Z]{2}$")
                .with_default("CN"),
        ),
    );
    insert(
        "chinese",
        PatternNode::Entry(PatternEntry::new("chinese", r"^\p{Han}+$")),
    );

    // Formats
    insert(
        "color",
        group(
            PatternGroup::new()
                .with("hex", r"^#(?:[0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})$")
                .with("rgb", r"^rgb\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*\)$")
                .with_default("hex"),
        ),
    );
    insert(
        "uuid",
        group(
            PatternGroup::new()
                .with(
                    "v4",
                    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-4[0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$",
                )
                .with(
                    "any",
                    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
                )
                .with_default("v4"),
        ),
    );
    insert(
        "hash",
        group(
            PatternGroup::new()
                .with("md5", r"^[a-fA-F0-9]{32}$")
                .with("sha1", r"^[a-fA-F0-9]{40}$")
                .with("sha256", r"^[a-fA-F0-9]{64}$")
                .with_default("md5"),
        ),
    );
    insert(
        "semanticVersion",
        group(
            PatternGroup::new()
                .with("basic", r"^\d+\.\d+\.\d+$")
                .with(
                    "full",
                    r"^(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?$",
                )
                .with_default("basic"),
        ),
    );

    table
}
