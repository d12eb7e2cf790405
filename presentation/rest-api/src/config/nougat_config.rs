use std::ffi::OsString;
use std::time::Duration;

use super::env::{ConfigError, Lookup, ProcessEnv, non_blank, parse_or};

/// Nougat CLI invocation.
///
/// Environment variables:
/// - NOUGAT_BIN: Executable (default: "nougat")
/// - NOUGAT_ARGS: Whitespace-separated arguments placed before the PDF path (default: none)
/// - NOUGAT_TIMEOUT_SECS: Kill the run after this long (default: 1800)
#[derive(Debug, Clone)]
pub struct NougatConfig {
    pub program: String,
    pub args: Vec<OsString>,
    pub timeout: Duration,
}

impl NougatConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&ProcessEnv)
    }

    pub fn from_lookup(lookup: &dyn Lookup) -> Result<Self, ConfigError> {
        Ok(Self {
            program: non_blank(lookup, "NOUGAT_BIN").unwrap_or_else(|| "nougat".to_string()),
            args: non_blank(lookup, "NOUGAT_ARGS")
                .map(|args| args.split_whitespace().map(OsString::from).collect())
                .unwrap_or_default(),
            timeout: Duration::from_secs(parse_or(lookup, "NOUGAT_TIMEOUT_SECS", 1800)?),
        })
    }
}
