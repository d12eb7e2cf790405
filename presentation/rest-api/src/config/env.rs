use std::fmt::Display;
use std::str::FromStr;

/// Configuration problems detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Source of configuration values, keyed by variable name.
pub trait Lookup {
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads from the process environment.
pub struct ProcessEnv;

impl Lookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Returns the trimmed value, treating blank values as unset.
pub fn non_blank(lookup: &dyn Lookup, name: &str) -> Option<String> {
    lookup
        .get(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn required(lookup: &dyn Lookup, name: &'static str) -> Result<String, ConfigError> {
    non_blank(lookup, name).ok_or(ConfigError::Missing(name))
}

pub fn parse_or<T>(lookup: &dyn Lookup, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match non_blank(lookup, name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value,
        }),
    }
}
