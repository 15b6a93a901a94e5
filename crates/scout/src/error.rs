// ABOUTME: Error types for the scout extractor including ErrorCode enum and ExtractError struct.
// ABOUTME: Only unexpected failures use these; stage misses are ordinary empty results.

use std::fmt;

/// Error codes representing the categories of unexpected extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    SiteTable,
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::SiteTable => "site table error",
            ErrorCode::Internal => "internal error",
        };
        write!(f, "{}", s)
    }
}

/// The error type returned by fallible engine operations.
#[derive(Debug, thiserror::Error)]
pub struct ExtractError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scout: {}", self.op)?;
        if !self.url.is_empty() {
            write!(f, " {}", self.url)?;
        }
        write!(f, ": {}", self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ExtractError {
    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidUrl,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a SiteTable error.
    pub fn site_table(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::SiteTable,
            url: String::new(),
            op: op.into(),
            source,
        }
    }

    /// Create an Internal error.
    pub fn internal(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Internal,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    /// Returns true if this is a SiteTable error.
    pub fn is_site_table(&self) -> bool {
        self.code == ErrorCode::SiteTable
    }

    /// Returns true if this is an Internal error.
    pub fn is_internal(&self) -> bool {
        self.code == ErrorCode::Internal
    }
}
