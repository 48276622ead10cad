use std::fmt;

use serde::Serialize;

use crate::translate::translate;

/// Outcome of one backend call: `Ok` carries the body, `Err` the translated failure.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: FailureKind,
    /// Human-readable, never empty.
    pub message: String,
}

impl ApiError {
    /// Builds an error whose message is the user-facing translation of `kind`.
    pub fn from_kind(kind: FailureKind) -> Self {
        let message = translate(&kind);
        Self { kind, message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    /// The body was not JSON or did not match the expected shape.
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "decode error"),
        }
    }
}

/// One page of records plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiListResponse<T> {
    pub data: Vec<T>,
    pub page_count: u64,
    pub total_items_count: u64,
    pub error: Option<String>,
}

impl<T> ApiListResponse<T> {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            page_count: 0,
            total_items_count: 0,
            error: None,
        }
    }

    /// The degraded list every action surfaces in place of a failure.
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::empty()
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ApiListResponse<U> {
        ApiListResponse {
            data: self.data.into_iter().map(f).collect(),
            page_count: self.page_count,
            total_items_count: self.total_items_count,
            error: self.error,
        }
    }
}

/// A single entity; `data` is `None` exactly when it could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiSingleResponse<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiSingleResponse<T> {
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Query parameters forwarded to a list endpoint, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pairs: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}
