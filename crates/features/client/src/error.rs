use dataverse_schema::BoxError;
use std::borrow::Cow;

/// Failures of the local file upload that follows an `sdk` dataset creation.
#[dataverse_derive::dataverse_error]
pub enum UploadError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Directory walk error{}: {source}", format_context(.context))]
    Walk { source: walkdir::Error, context: Option<Cow<'static, str>> },

    /// A local path does not point at what the request says it does.
    #[error("Invalid upload source{}: {message}", format_context(.context))]
    InvalidSource { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The platform rejected a lookup or a batch.
    #[error("Platform error{}: {source}", format_context(.context))]
    Backend { source: BoxError, context: Option<Cow<'static, str>> },

    #[error("Internal upload error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl UploadError {
    pub(crate) fn invalid_source(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidSource { message: message.into(), context: None }
    }
}
