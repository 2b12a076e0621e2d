//! Configuration management for regex-center.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.
//!
//! ```toml
//! [security]
//! enabled = true
//! case_sensitive = true
//!
//! [patterns]
//! companyCode = "^[A-Z]{2,4}$"
//!
//! [patterns.ticket]
//! expression = "^TCK-\\d{6}$"
//! description = "Support ticket id"
//! examples = { valid = ["TCK-000123"], invalid = ["TCK-1"] }
//!
//! [patterns.company]
//! default = "code"
//! groups = { name = "^[a-zA-Z0-9 &.-]{2,50}$", code = "^[A-Z]{2,10}$" }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::patterns::{Examples, PatternEntry, PatternGroup, PatternMap, PatternNode};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "regex-center";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "REGEX_CENTER_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `REGEX_CENTER_`, nested keys
///    separated by `__`, e.g. `REGEX_CENTER_SECURITY__ENABLED=false`)
/// 2. TOML config file at `~/.config/regex-center/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Safety and matching options.
    pub security: SecurityConfig,
    /// Custom patterns injected at startup, keyed by type name.
    pub patterns: BTreeMap<String, PatternDef>,
}

/// Safety and matching options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Run the ReDoS heuristic when patterns are registered and used.
    pub enabled: bool,
    /// Match case-sensitively. When false, every expression is compiled
    /// with the case-insensitive flag.
    pub case_sensitive: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            case_sensitive: true,
        }
    }
}

/// Partial update for [`SecurityConfig`]. `None` fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecurityOptions {
    /// New value for [`SecurityConfig::enabled`].
    pub enabled: Option<bool>,
    /// New value for [`SecurityConfig::case_sensitive`].
    pub case_sensitive: Option<bool>,
}

impl SecurityOptions {
    /// Set the security flag.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Set the case-sensitivity flag.
    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }
}

impl SecurityConfig {
    /// Merge `options` into this configuration.
    pub fn apply(&mut self, options: SecurityOptions) {
        if let Some(enabled) = options.enabled {
            self.enabled = enabled;
        }
        if let Some(case_sensitive) = options.case_sensitive {
            self.case_sensitive = case_sensitive;
        }
    }
}

/// A custom pattern as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternDef {
    /// A bare expression.
    Expression(String),

    /// An expression with metadata.
    Entry {
        /// The expression.
        expression: String,
        /// Free-text description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        /// Sample inputs.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        examples: Option<Examples>,
    },

    /// Named variants.
    Group {
        /// Variant name → expression.
        groups: BTreeMap<String, String>,
        /// Variant answered for `type:default`-style lookups.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
}

impl PatternDef {
    fn to_node(&self, type_name: &str) -> PatternNode {
        match self {
            Self::Expression(expression) => {
                PatternNode::Entry(PatternEntry::new(type_name, expression.as_str()))
            }
            Self::Entry {
                expression,
                description,
                examples,
            } => PatternNode::Entry(PatternEntry {
                key: type_name.to_string(),
                expression: expression.clone(),
                description: description.clone(),
                examples: examples.clone(),
            }),
            Self::Group { groups, default } => {
                let mut group = groups
                    .iter()
                    .fold(PatternGroup::new(), |g, (key, expr)| g.with(key.as_str(), expr.as_str()));
                if let Some(default) = default {
                    group = group.with_default(default.as_str());
                }
                PatternNode::Group(group)
            }
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let config: Config = Self::figment(&config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: &std::path::Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern name contains `:`, a configured
    /// expression does not compile or a group default names a variant that
    /// does not exist.
    pub fn validate(&self) -> Result<()> {
        for (type_name, def) in &self.patterns {
            if type_name.contains(':') {
                return Err(Error::config_validation(format!(
                    "pattern name '{type_name}' contains ':', which is reserved for type:group keys"
                )));
            }

            if let PatternDef::Group {
                groups,
                default: Some(default),
            } = def
            {
                if !groups.contains_key(default) {
                    return Err(Error::config_validation(format!(
                        "pattern group '{type_name}' has no variant '{default}' to use as default"
                    )));
                }
            }

            for (key, expression) in def.to_node(type_name).expressions(type_name) {
                if regex::Regex::new(expression).is_err() {
                    return Err(Error::config_validation(format!(
                        "invalid regex pattern for '{key}': {expression}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// The configured custom patterns, ready for injection.
    #[must_use]
    pub fn pattern_map(&self) -> PatternMap {
        self.patterns
            .iter()
            .map(|(type_name, def)| (type_name.clone(), def.to_node(type_name)))
            .collect()
    }
}
