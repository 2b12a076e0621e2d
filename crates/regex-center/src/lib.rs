//! `regex-center` - A registry of named regular expressions
//!
//! Patterns are addressed by `type` or `type:group` keys (`email`,
//! `phone:CN`, `date:YYYY-MM-DD`). A built-in table ships with the crate and
//! callers can layer their own patterns on top. Every pattern that enters the
//! custom namespace, and every pattern that is used while security is on, is
//! screened by a heuristic that flags shapes prone to catastrophic
//! backtracking.
//!
//! ```
//! use regex_center::PatternGate;
//!
//! let mut gate = PatternGate::new();
//! gate.add("ticket", r"^TCK-\d{6}$")?;
//!
//! assert!(gate.test("ticket", "TCK-000123")?);
//! assert!(gate.add("evil", "^(a+)+$").unwrap_err().is_unsafe_pattern());
//! # Ok::<(), regex_center::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod gate;
pub mod logging;
pub mod patterns;
pub mod redos;
pub mod store;

pub use config::{Config, SecurityConfig, SecurityOptions};
pub use error::{Error, Result};
pub use gate::{PatternGate, Replacement, DEFAULT_HIGHLIGHT};
pub use logging::init_logging;
pub use patterns::{Examples, PatternEntry, PatternGroup, PatternMap, PatternNode};
pub use store::PatternStore;
