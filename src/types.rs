use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::error::InvalidInvocation;

/// Ordered header map. Re-inserting an existing name overwrites the value
/// in place and keeps the original position.
pub type Headers = IndexMap<String, String>;

// ---------------------------------------------------------------------------
// Facets
// ---------------------------------------------------------------------------

/// Boolean classification of a request body, derived from `Content-Type`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Facets {
    pub is_json: bool,
    pub is_form: bool,
    pub is_multipart: bool,
}

impl Facets {
    /// Classify a header map by its `Content-Type` value.
    ///
    /// The header name is matched case-insensitively (first match in
    /// insertion order wins) and the value by case-insensitive substring.
    pub fn classify(headers: &Headers) -> Self {
        let Some(content_type) = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.to_ascii_lowercase())
        else {
            return Self::default();
        };

        Self {
            is_json: content_type.contains("application/json"),
            is_form: content_type.contains("application/x-www-form-urlencoded"),
            is_multipart: content_type.contains("multipart/form-data"),
        }
    }

    /// The single facet that governs body rendering.
    pub fn body_format(&self) -> BodyFormat {
        if self.is_json {
            BodyFormat::Json
        } else if self.is_form {
            BodyFormat::Form
        } else if self.is_multipart {
            BodyFormat::Multipart
        } else {
            BodyFormat::Raw
        }
    }
}

/// How emitters should treat a body, in facet priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyFormat {
    Json,
    Form,
    Multipart,
    Raw,
}

// ---------------------------------------------------------------------------
// RequestDescriptor
// ---------------------------------------------------------------------------

/// Language-agnostic description of the HTTP request an invocation makes.
///
/// Immutable once built: fields are only reachable through accessors and
/// the facets are always derived from the headers they describe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestDescriptor {
    method: String,
    url: String,
    headers: Headers,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    facets: Facets,
}

impl RequestDescriptor {
    /// Build a descriptor, deriving its facets from `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInvocation::MissingUrl`] when `url` is empty.
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        headers: Headers,
        body: Option<String>,
    ) -> Result<Self, InvalidInvocation> {
        let url = url.into();
        if url.is_empty() {
            return Err(InvalidInvocation::MissingUrl);
        }
        let facets = Facets::classify(&headers);
        Ok(Self {
            method: method.into(),
            url,
            headers,
            body,
            facets,
        })
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn facets(&self) -> Facets {
        self.facets
    }

    /// Look up a header value by name (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Return `true` if a header with `name` exists (case-insensitive).
    pub fn has_header(&self, name: &str) -> bool {
        self.header_value(name).is_some()
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

// ---------------------------------------------------------------------------
// ParsedInvocation
// ---------------------------------------------------------------------------

/// Result of a successful parse: the descriptor plus every token the
/// parser accepted but did not act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedInvocation {
    pub descriptor: RequestDescriptor,
    /// Unsupported flags, their arguments, and stray bare tokens, in input
    /// order.
    pub ignored: Vec<String>,
}

// ---------------------------------------------------------------------------
// EmissionResult
// ---------------------------------------------------------------------------

/// Source text generated for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmissionResult {
    /// Id of the target that produced the code.
    pub target: &'static str,
    pub code: String,
    /// Suggested file extension (without the dot) for saving the code.
    pub extension: Option<&'static str>,
}

impl EmissionResult {
    /// Suggested file name for the code, e.g. `request.py`.
    pub fn file_name(&self, stem: &str) -> String {
        match self.extension {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem.to_string(),
        }
    }
}
