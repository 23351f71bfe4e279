#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by the SDK crates.
//!
//! ## Usage
//! Every crate that declares its own error enum depends on this crate and on `thiserror`:
//! ```toml
//! [dependencies]
//! dataverse-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring SDK error enums.
///
/// Turns a plain enum with named-field variants into a `thiserror` error type with
/// context support, so every crate reports failures the same way.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and for
///   `Result<T, Source>` of every variant that wraps a `source`.
/// * `From<Source>` for every variant with a `source` field (except `Internal`).
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * `ErrorName::kind()` returning the variant name, meant for structured log fields.
/// * A module-private `format_context` helper used inside `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Variants must use named fields.
/// 3. A variant with a `source` must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use dataverse_derive::dataverse_error;
/// use std::borrow::Cow;
///
/// #[dataverse_error]
/// pub enum UploadError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal upload error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read_manifest(path: &str) -> Result<String, UploadError> {
///     std::fs::read_to_string(path).context("Reading upload manifest")
/// }
/// ```
#[proc_macro_attribute]
pub fn dataverse_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
