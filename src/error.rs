//! Unified error types for sbom-unify.
//!
//! Parse-time structural failures are the only fatal errors in this crate:
//! they fail an entire merge batch atomically. Data-completeness gaps
//! (missing optional fields, dangling dependency edges, zero inferred roots)
//! degrade to defaults inside the merge and are never surfaced here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sbom-unify operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UnifyError {
    /// A document could not be interpreted as a CycloneDX SBOM
    #[error("failed to parse SBOM document: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// IO errors with path context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Validation errors
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("unknown document format: {0}")]
    UnknownFormat(String),

    #[error("missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("document exceeds size limit: {0}")]
    TooLarge(String),
}

/// Convenient Result type for sbom-unify operations
pub type Result<T> = std::result::Result<T, UnifyError>;

impl UnifyError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "missing required field",
            ParseErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<std::io::Error> for UnifyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for UnifyError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context, forming
/// a chain that shows the path through the code.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    ///
    /// The closure is only called if the result is an error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<UnifyError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: UnifyError, new_ctx: &str) -> UnifyError {
    match err {
        UnifyError::Parse {
            context: existing,
            source,
        } => UnifyError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        UnifyError::Io {
            path,
            message,
            source,
        } => UnifyError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        UnifyError::Validation(msg) => UnifyError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| UnifyError::Validation(context.into()))
    }
}
