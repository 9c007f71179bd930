#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every crate of the workspace: error enums,
//! feature slice handles, API DTOs, handler documentation and the runtime
//! entry point.
//!
//! Examples below are `ignore`d because a proc-macro crate cannot use its own
//! macros; the consuming crates' tests exercise them.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap the Tokio runtime from `vows-runtime`.
///
/// Turns an `async fn main` returning a `Result` into a synchronous `main`
/// that builds a runtime from one of the [`RuntimeConfig`] presets.
///
/// # Arguments
///
/// * `high_performance` - Preset for the serving process.
/// * `default` - Worker threads auto-detected from available parallelism.
///
/// # Examples
///
/// ```rust,ignore
/// #[vows_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
///
/// [`RuntimeConfig`]: https://docs.rs/vows-runtime
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro for request/response DTOs.
///
/// * Adds `Debug`, `Serialize` and `Deserialize` when they are not derived already.
/// * Adds `utoipa::ToSchema` when the consuming crate's `server` feature is on.
/// * Applies `rename_all = "camelCase"` and `deny_unknown_fields` unless overridden.
///
/// ```rust,ignore
/// #[api_model(deny_unknown_fields = false)]
/// pub struct ClaimRequest {
///     pub claimer_name: Option<String>,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro bridging axum handlers with `utoipa::path`.
///
/// Arguments are forwarded verbatim (`get`, `path = "..."`, `responses(...)`,
/// `tag = ...`) when the consuming crate's `server` feature is on.
///
/// ```rust,ignore
/// #[api_handler(get, path = "/health", responses((status = OK, body = HealthResponse)))]
/// pub async fn health_handler() -> impl IntoResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Declares a crate error enum.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * `<Name>Ext` with `.context(...)` for `Result<T, Name>` and for
///   `Result<T, Source>` of every variant holding a `source` field.
/// * `From<Source>` for those variants.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper used in `#[error(...)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. A variant with a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// ```rust,ignore
/// #[vows_error]
/// pub enum DatabaseError {
///     #[error("SurrealDB error{}: {source}", format_context(.context))]
///     Surreal { source: surrealdb::Error, context: Option<Cow<'static, str>> },
///     #[error("Internal database error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn vows_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Declares a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`,
/// derefs to it and implements `FeatureSlice` so the kernel can register it.
///
/// ```rust,ignore
/// #[vows_derive::vows_slice]
/// pub struct Registry {
///     pub service: RegistryService,
/// }
///
/// let slice = Registry::new(RegistryInner { service });
/// ```
#[proc_macro_attribute]
pub fn vows_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
