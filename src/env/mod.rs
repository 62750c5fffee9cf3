//! Environment variable access with typed coercion.
//!
//! Every accessor falls back to a default and never fails: a missing variable is an
//! expected condition, so the empty value of the coercion (`None`, `[]`) is returned
//! instead of an error. The plain functions read the process environment; the
//! `*_from` variants accept any [`ReadEnv`].
//!
//! ```
//! use brfied::env::{env_as_bool, env_as_list};
//!
//! assert_eq!(env_as_list("BRFIED_DOC_UNSET", Some("a,b"), ","), vec!["a", "b"]);
//! assert_eq!(env_as_bool("BRFIED_DOC_UNSET", Some("TRUE".into())), Some(true));
//! ```

mod coerce;
mod read_env;

use std::collections::BTreeMap;

pub use coerce::{
    env_as_bool_from, env_as_list_from, env_as_list_of_maps_from, env_from, EnvValue,
};
pub use read_env::{MemoryEnv, ReadEnv, SystemEnv};

/// Raw value of `name` from the process environment, else `default`.
pub fn env(name: &str, default: Option<&str>) -> Option<String> {
    env_from(&SystemEnv, name, default)
}

/// Value of `name` (or `default`) split on `delimiter`.
///
/// Blank or whitespace-only input gives an empty list.
pub fn env_as_list(name: &str, default: Option<&str>, delimiter: &str) -> Vec<String> {
    env_as_list_from(&SystemEnv, name, default, delimiter)
}

/// Value of `name` (or `default`) split on `delimiter`, each part wrapped as
/// `{key: part}`.
pub fn env_as_list_of_maps(
    name: &str,
    key: &str,
    default: Option<&str>,
    delimiter: &str,
) -> Vec<BTreeMap<String, String>> {
    env_as_list_of_maps_from(&SystemEnv, name, key, default, delimiter)
}

/// Value of `name` (or `default`) as a boolean.
///
/// Returns `None` when unset, blank or not `"true"`/`"false"` (case-insensitive).
pub fn env_as_bool(name: &str, default: Option<EnvValue<'_>>) -> Option<bool> {
    env_as_bool_from(&SystemEnv, name, default)
}
