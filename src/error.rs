use std::time::Duration;

use thiserror::Error;

/// Errors returned by parsing and emission.
///
/// Both variants are fatal to the single call that produced them; nothing
/// partial is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input is not a usable curl invocation.
    #[error("invalid invocation: {0}")]
    InvalidInvocation(#[from] InvalidInvocation),
    /// No emitter is registered under the requested target id.
    #[error("unsupported target '{0}'")]
    UnsupportedTarget(String),
}

/// Why an invocation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInvocation {
    /// The input contained no tokens at all.
    #[error("empty input")]
    Empty,
    /// The first token is not the `curl` command.
    #[error("expected the command to start with 'curl', found '{0}'")]
    NotCurl(String),
    /// No URL was given, neither bare nor via `--url`.
    #[error("no URL found")]
    MissingUrl,
    /// The raw input exceeds `ParserConfig::max_input_len`.
    #[error("input exceeds maximum length of {0} bytes")]
    TooLong(usize),
    /// More headers than `ParserConfig::max_headers`.
    #[error("number of headers exceeds maximum of {0}")]
    TooManyHeaders(usize),
}

/// A JSON-typed body that does not parse as JSON.
///
/// Never surfaced to callers: emitters log it and fall back to a raw
/// string literal.
#[derive(Debug, Error)]
#[error("body is not valid JSON: {0}")]
pub struct JsonReformatFailure(#[from] pub serde_json::Error);

/// Failures of the live-preview execution side channel.
///
/// Kept apart from [`Error`] so a failed probe never invalidates code that
/// was already generated from the same descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The method is not a valid HTTP token.
    #[error("invalid HTTP method: '{0}'")]
    InvalidMethod(String),
    /// A header name or value cannot be sent on the wire.
    #[error("invalid header '{0}'")]
    InvalidHeader(String),
    /// The URL cannot be parsed.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,
    /// Any other network or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),
}
