//! # Catalog Error Types Module
//!
//! Error types raised while loading exercise and food catalogs, and while
//! decoding structured results produced outside the rule-based parser.

/// Errors raised when a catalog cannot be loaded or validated
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Catalog file could not be read
    Io(String),
    /// Catalog JSON is malformed or has the wrong shape
    Parse(String),
    /// Two entries share the same id (or food key)
    DuplicateEntry(String),
    /// An alias points at an id that is not in the catalog
    UnknownAliasTarget { alias: String, target: String },
    /// Catalog contains no entries
    Empty(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(msg) => write!(f, "Catalog read error: {msg}"),
            CatalogError::Parse(msg) => write!(f, "Catalog parse error: {msg}"),
            CatalogError::DuplicateEntry(id) => write!(f, "Duplicate catalog entry: {id}"),
            CatalogError::UnknownAliasTarget { alias, target } => {
                write!(f, "Alias '{alias}' points at unknown entry '{target}'")
            }
            CatalogError::Empty(what) => write!(f, "Catalog is empty: {what}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

/// Errors raised when decoding an externally produced analysis response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseError {
    /// Response body was empty after stripping code fences
    EmptyResponse,
    /// Response body was not valid JSON of the expected shape
    InvalidJson(String),
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseError::EmptyResponse => write!(f, "Response was empty"),
            ResponseError::InvalidJson(msg) => write!(f, "Invalid response JSON: {msg}"),
        }
    }
}

impl std::error::Error for ResponseError {}

impl From<serde_json::Error> for ResponseError {
    fn from(err: serde_json::Error) -> Self {
        ResponseError::InvalidJson(err.to_string())
    }
}
