//! # curlgen
//!
//! Translates a **curl invocation** into equivalent source code for a range
//! of languages and HTTP clients.
//!
//! The pipeline is a small retargetable compiler:
//!
//! ```text
//! "curl -X POST …" ─ tokenize ─▶ tokens ─ Parser ─▶ RequestDescriptor ─ emit ─▶ source
//! ```
//!
//! Parsing and emission are pure and synchronous. The [`Executor`] is a
//! separate, async side channel for previewing the live response.
//!
//! ## Quick start
//!
//! ```rust
//! use curlgen::convert;
//!
//! let result = convert(
//!     r#"curl -X POST -H "Content-Type: application/json" -d '{"a":1}' https://api.test/items"#,
//!     "python",
//! )
//! .expect("valid invocation");
//! assert!(result.code.contains("requests.post("));
//! assert_eq!(result.extension, Some("py"));
//! ```
//!
//! ## Inspecting what was ignored
//!
//! ```rust
//! use curlgen::Parser;
//!
//! let parsed = Parser::new()
//!     .parse("curl -L --cookie 'a=b' https://x.test")
//!     .unwrap();
//! assert_eq!(parsed.descriptor.url(), "https://x.test");
//! assert_eq!(parsed.ignored, vec!["-L", "--cookie", "a=b"]);
//! ```

mod emit;
mod error;
mod execute;
mod output;
mod parser;
mod tokenizer;
mod types;

// Re-export public API.
pub use emit::{BUILTIN_TARGETS, EmitFn, EmitterTarget, Registry, emit, targets};
pub use error::{Error, ExecutionError, InvalidInvocation, JsonReformatFailure};
pub use execute::{ExecuteConfig, ExecutionResponse, Executor, ResponseBody};
pub use output::{format_debug, format_json, format_response, format_targets};
pub use parser::{Parser, ParserConfig};
pub use tokenizer::tokenize;
pub use types::{
    BodyFormat, EmissionResult, Facets, Headers, ParsedInvocation, RequestDescriptor,
};

/// Parse a curl invocation into a [`RequestDescriptor`] with default limits.
///
/// Ignored tokens are dropped; use [`Parser::parse`] to inspect them.
///
/// # Errors
///
/// Returns [`Error::InvalidInvocation`] if the input does not start with
/// `curl` or names no URL.
pub fn parse_invocation(input: &str) -> Result<RequestDescriptor, Error> {
    Parser::new().parse(input).map(|parsed| parsed.descriptor)
}

/// Parse a curl invocation using custom [`ParserConfig`] limits.
///
/// # Errors
///
/// Returns [`Error::InvalidInvocation`] if the input is malformed or
/// exceeds the configured limits.
pub fn parse_invocation_with_config(
    input: &str,
    config: ParserConfig,
) -> Result<RequestDescriptor, Error> {
    Parser::with_config(config)
        .parse(input)
        .map(|parsed| parsed.descriptor)
}

/// Parse `input` and emit source for `target_id` in one call.
///
/// # Errors
///
/// Returns [`Error::InvalidInvocation`] for unparsable input and
/// [`Error::UnsupportedTarget`] for an unknown target id.
pub fn convert(input: &str, target_id: &str) -> Result<EmissionResult, Error> {
    let descriptor = parse_invocation(input)?;
    emit(&descriptor, target_id)
}
