use std::borrow::Cow;
use std::fmt;

/// Type-erased failure reported by a collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A violated structural or cross-field rule.
///
/// `field` is a path relative to the entity being constructed, e.g.
/// `ontology.classes[0].color`. Nested constructors extend it on the way up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid `{field}`: {message}")]
pub struct ValidationError {
    field: String,
    message: Cow<'static, str>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<Cow<'static, str>>) -> Self {
        Self { field: field.into(), message: message.into() }
    }

    /// Path of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prefixes the field path with `parent`.
    #[must_use]
    pub fn nested(mut self, parent: impl fmt::Display) -> Self {
        self.field = if self.field.is_empty() {
            parent.to_string()
        } else if self.field.starts_with('[') {
            format!("{parent}{}", self.field)
        } else {
            format!("{parent}.{}", self.field)
        };
        self
    }

    /// Prefixes the field path with `parent[index]`.
    #[must_use]
    pub fn at_index(self, parent: &str, index: usize) -> Self {
        self.nested(format_args!("{parent}[{index}]"))
    }
}

/// Errors surfaced by the SDK entry points.
#[dataverse_derive::dataverse_error]
pub enum DataverseError {
    /// A rule was violated while building or checking a request. Never retried.
    #[error("Validation error{}: {source}", format_context(.context))]
    Validation { source: ValidationError, context: Option<Cow<'static, str>> },

    /// The collaborator was unreachable, misconfigured, or failed.
    #[error("Client connection error{}: {source}", format_context(.context))]
    ClientConnection { source: BoxError, context: Option<Cow<'static, str>> },

    #[error("Serialization error{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal SDK error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl DataverseError {
    /// Wraps a collaborator failure, keeping it as the source.
    pub fn connection(source: impl Into<BoxError>, context: impl Into<Cow<'static, str>>) -> Self {
        Self::ClientConnection { source: source.into(), context: Some(context.into()) }
    }

    /// The validation failure behind this error, if that is what it is.
    #[must_use]
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}
