//! Query-string codec for table state.
//!
//! `QueryParams` follows `URLSearchParams` semantics: keys keep their first
//! position, `set` collapses duplicates, and encoding uses
//! `application/x-www-form-urlencoded`.

use url::form_urlencoded;

pub const PAGE_INDEX_PARAM: &str = "pageIndex";
pub const PAGE_SIZE_PARAM: &str = "pageSize";
pub const SORT_COLUMN_PARAM: &str = "sortcolumn";
pub const SORT_DIR_PARAM: &str = "sortdir";
pub const SEARCH_PARAM: &str = "search";

/// 1-based page shown when the URL carries no `pageIndex`.
pub const DEFAULT_PAGE_INDEX: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Joins the selected values of a multi-select filter inside one parameter.
pub const FILTER_VALUE_SEPARATOR: char = '.';

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Replaces the first occurrence of `key` in place and drops any later
    /// duplicates; appends when the key is absent.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = index <= first || k != key;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// Applies `(key, value)` updates: `None` deletes the key, a default
/// `pageIndex`/`pageSize` is elided, anything else is set.
pub fn apply_updates(params: &mut QueryParams, updates: &[(&str, Option<String>)]) {
    for (key, value) in updates {
        match value {
            None => params.delete(key),
            Some(value) if is_default_value(key, value) => params.delete(key),
            Some(value) => params.set(key, value.as_str()),
        }
    }
}

/// Builds the query string that results from applying `updates` to `params`.
pub fn create_query_string(params: &QueryParams, updates: &[(&str, Option<String>)]) -> String {
    let mut next = params.clone();
    apply_updates(&mut next, updates);
    next.to_query_string()
}

fn is_default_value(key: &str, value: &str) -> bool {
    let default = match key {
        PAGE_INDEX_PARAM => DEFAULT_PAGE_INDEX,
        PAGE_SIZE_PARAM => DEFAULT_PAGE_SIZE,
        _ => return false,
    };
    value.parse::<u64>().ok() == Some(default)
}

pub fn join_filter_values(values: &[String]) -> String {
    let mut joined = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            joined.push(FILTER_VALUE_SEPARATOR);
        }
        joined.push_str(value);
    }
    joined
}

pub fn split_filter_values(raw: &str) -> Vec<String> {
    raw.split(FILTER_VALUE_SEPARATOR)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Splits `path?query#fragment` into path and query, discarding the fragment.
pub fn split_location(location: &str) -> (&str, &str) {
    let without_fragment = location.split('#').next().unwrap_or(location);
    match without_fragment.split_once('?') {
        Some((path, query)) => (path, query),
        None => (without_fragment, ""),
    }
}

pub fn compose_location(path: &str, params: &QueryParams) -> String {
    if params.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", params.to_query_string())
    }
}
