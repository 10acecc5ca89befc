use anyhow::{Context, Result};
use std::str::FromStr;

/// Source of configuration values, keyed by environment variable name.
pub(crate) type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Treats empty values the same as unset ones.
pub(crate) fn optional(lookup: Lookup<'_>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}

pub(crate) fn required(lookup: Lookup<'_>, name: &str) -> Result<String> {
    optional(lookup, name).with_context(|| format!("{} must be set", name))
}

pub(crate) fn string_or(lookup: Lookup<'_>, name: &str, default: &str) -> String {
    optional(lookup, name).unwrap_or_else(|| default.to_string())
}

/// Parses a value if present; a present but malformed value is an error
/// rather than a silent fallback to the default.
pub(crate) fn parse_or<T>(lookup: Lookup<'_>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(lookup, name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", name, raw, e)),
        None => Ok(default),
    }
}
