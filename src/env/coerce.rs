use super::read_env::ReadEnv;
use std::collections::BTreeMap;
use tracing::trace;

/// Default accepted by [`env_as_bool`](super::env_as_bool): a literal boolean or
/// a string to be coerced like a variable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvValue<'a> {
    Text(&'a str),
    Bool(bool),
}

impl<'a> From<&'a str> for EnvValue<'a> {
    fn from(value: &'a str) -> Self {
        EnvValue::Text(value)
    }
}

impl From<bool> for EnvValue<'_> {
    fn from(value: bool) -> Self {
        EnvValue::Bool(value)
    }
}

/// Raw value of `name`, or `default` when unset or not valid Unicode.
pub fn env_from<E: ReadEnv>(env: &E, name: &str, default: Option<&str>) -> Option<String> {
    match env.var(name) {
        Ok(value) => Some(value),
        Err(err) => {
            trace!(name, error = %err, "Environment variable unavailable, using default");
            default.map(str::to_string)
        }
    }
}

/// Splits the resolved value on `delimiter`. Blank input gives an empty list.
pub fn env_as_list_from<E: ReadEnv>(
    env: &E,
    name: &str,
    default: Option<&str>,
    delimiter: &str,
) -> Vec<String> {
    let raw = env_from(env, name, default).unwrap_or_default();
    split_list(&raw, delimiter)
}

/// Like [`env_as_list_from`], wrapping every element as `{key: element}`.
pub fn env_as_list_of_maps_from<E: ReadEnv>(
    env: &E,
    name: &str,
    key: &str,
    default: Option<&str>,
    delimiter: &str,
) -> Vec<BTreeMap<String, String>> {
    env_as_list_from(env, name, default, delimiter)
        .into_iter()
        .map(|item| BTreeMap::from([(key.to_string(), item)]))
        .collect()
}

/// Case-insensitive `"true"`/`"false"`; anything else is `None`.
pub fn env_as_bool_from<E: ReadEnv>(
    env: &E,
    name: &str,
    default: Option<EnvValue<'_>>,
) -> Option<bool> {
    if let Ok(value) = env.var(name) {
        return parse_bool(&value);
    }
    match default? {
        EnvValue::Bool(value) => Some(value),
        EnvValue::Text(value) => parse_bool(value),
    }
}

fn split_list(raw: &str, delimiter: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if delimiter.is_empty() {
        return vec![trimmed.to_string()];
    }
    trimmed.split(delimiter).map(str::to_string).collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
