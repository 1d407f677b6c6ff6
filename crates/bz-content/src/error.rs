//! Content errors
//!
//! Identifier allocation, rewriting and filtering never fail; errors only
//! come from configuration and from the parse/tree edges.

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("invalid page id {0:?}: must be non-empty and contain no whitespace")]
    InvalidPageId(String),

    #[error("invalid session config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Parse(#[from] bz_html::ParseError),

    #[error(transparent)]
    Dom(#[from] bz_dom::DomError),
}
