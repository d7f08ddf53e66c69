//! Emitter registry and the built-in code generators.
//!
//! Every target is a plain function `fn(&RequestDescriptor) -> String`
//! registered under a string id. Emitters share nothing but the literal
//! helpers in this module, so adding a target means writing one function
//! and one [`EmitterTarget`] entry.

mod axios;
mod csharp;
mod go;
mod java;
mod javascript;
pub(crate) mod json;
pub(crate) mod literal;
mod php;
mod python;
mod ruby;
mod rust;
mod swift;

use std::borrow::Cow;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, JsonReformatFailure};
use crate::types::{BodyFormat, EmissionResult, RequestDescriptor};

/// Signature every emitter implements.
pub type EmitFn = fn(&RequestDescriptor) -> String;

/// A code generator registered under an id.
#[derive(Debug, Clone, Copy)]
pub struct EmitterTarget {
    /// Lookup key, e.g. `"python"`.
    pub id: &'static str,
    /// Human-readable description of the idiom.
    pub label: &'static str,
    /// Suggested file extension without the dot.
    pub extension: Option<&'static str>,
    pub emit: EmitFn,
}

impl EmitterTarget {
    /// Run this target's emitter.
    pub fn run(&self, descriptor: &RequestDescriptor) -> EmissionResult {
        EmissionResult {
            target: self.id,
            code: (self.emit)(descriptor),
            extension: self.extension,
        }
    }
}

/// The targets that ship with the crate, in display order.
pub const BUILTIN_TARGETS: &[EmitterTarget] = &[
    EmitterTarget {
        id: "python",
        label: "Python (requests)",
        extension: Some("py"),
        emit: python::emit,
    },
    EmitterTarget {
        id: "javascript",
        label: "JavaScript (fetch)",
        extension: Some("js"),
        emit: javascript::emit,
    },
    EmitterTarget {
        id: "axios",
        label: "Node.js (axios)",
        extension: Some("js"),
        emit: axios::emit,
    },
    EmitterTarget {
        id: "go",
        label: "Go (net/http)",
        extension: Some("go"),
        emit: go::emit,
    },
    EmitterTarget {
        id: "rust",
        label: "Rust (reqwest)",
        extension: Some("rs"),
        emit: rust::emit,
    },
    EmitterTarget {
        id: "php",
        label: "PHP (ext-curl)",
        extension: Some("php"),
        emit: php::emit,
    },
    EmitterTarget {
        id: "ruby",
        label: "Ruby (Net::HTTP)",
        extension: Some("rb"),
        emit: ruby::emit,
    },
    EmitterTarget {
        id: "java",
        label: "Java (java.net.http)",
        extension: Some("java"),
        emit: java::emit,
    },
    EmitterTarget {
        id: "csharp",
        label: "C# (HttpClient)",
        extension: Some("cs"),
        emit: csharp::emit,
    },
    EmitterTarget {
        id: "swift",
        label: "Swift (URLSession)",
        extension: Some("swift"),
        emit: swift::emit,
    },
];

/// All built-in targets.
pub fn targets() -> &'static [EmitterTarget] {
    BUILTIN_TARGETS
}

/// Emit source for `target_id` using the built-in targets.
///
/// # Errors
///
/// Returns [`Error::UnsupportedTarget`] if no built-in target has that id.
pub fn emit(descriptor: &RequestDescriptor, target_id: &str) -> Result<EmissionResult, Error> {
    BUILTIN_TARGETS
        .iter()
        .find(|t| t.id == target_id)
        .map(|t| t.run(descriptor))
        .ok_or_else(|| Error::UnsupportedTarget(target_id.to_string()))
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Caller-owned set of targets, for embedding custom emitters next to the
/// built-in ones.
///
/// ```rust
/// use curlgen::{EmitterTarget, Registry, parse_invocation};
///
/// fn httpie(d: &curlgen::RequestDescriptor) -> String {
///     format!("http {} {}", d.method(), d.url())
/// }
///
/// let mut registry = Registry::builtin();
/// registry.register(EmitterTarget {
///     id: "httpie",
///     label: "HTTPie",
///     extension: None,
///     emit: httpie,
/// });
///
/// let descriptor = parse_invocation("curl https://x.test").unwrap();
/// let result = registry.emit(&descriptor, "httpie").unwrap();
/// assert_eq!(result.code, "http GET https://x.test");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    targets: IndexMap<&'static str, EmitterTarget>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in target.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for target in BUILTIN_TARGETS {
            registry.register(*target);
        }
        registry
    }

    /// Add a target, returning the one it replaced, if any.
    pub fn register(&mut self, target: EmitterTarget) -> Option<EmitterTarget> {
        self.targets.insert(target.id, target)
    }

    /// Remove a target by id.
    pub fn unregister(&mut self, id: &str) -> Option<EmitterTarget> {
        self.targets.shift_remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&EmitterTarget> {
        self.targets.get(id)
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.targets.keys().copied()
    }

    pub fn targets(&self) -> impl Iterator<Item = &EmitterTarget> {
        self.targets.values()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Emit source for one target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedTarget`] if `target_id` is not registered.
    pub fn emit(
        &self,
        descriptor: &RequestDescriptor,
        target_id: &str,
    ) -> Result<EmissionResult, Error> {
        self.get(target_id)
            .map(|t| t.run(descriptor))
            .ok_or_else(|| Error::UnsupportedTarget(target_id.to_string()))
    }

    /// Emit source for every registered target.
    pub fn emit_all(&self, descriptor: &RequestDescriptor) -> Vec<EmissionResult> {
        self.targets().map(|t| t.run(descriptor)).collect()
    }
}

// ---------------------------------------------------------------------------
// Body classification shared by emitters
// ---------------------------------------------------------------------------

/// A request body as an emitter should render it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Body<'a> {
    /// JSON-typed body that parsed successfully.
    Json(Value),
    /// Form-typed body decoded into ordered pairs.
    Form(Vec<(String, String)>),
    /// Anything else, or a JSON-typed body that failed to parse.
    Raw(&'a str),
}

/// Pick the body rendering for `descriptor`; `None` when there is no body.
pub(crate) fn body(descriptor: &RequestDescriptor) -> Option<Body<'_>> {
    let raw = descriptor.body()?;
    let body = match descriptor.facets().body_format() {
        BodyFormat::Json => match parse_json(raw) {
            Ok(value) => Body::Json(value),
            Err(err) => {
                debug!(error = %err, "falling back to a raw string literal");
                Body::Raw(raw)
            }
        },
        BodyFormat::Form => match decode_form(raw) {
            Some(pairs) => Body::Form(pairs),
            None => {
                debug!("form body is not valid UTF-8 once decoded, keeping it raw");
                Body::Raw(raw)
            }
        },
        BodyFormat::Multipart | BodyFormat::Raw => Body::Raw(raw),
    };
    Some(body)
}

/// Decode `a=1&b=x%20y` into ordered pairs. `None` when any escape decodes
/// to invalid UTF-8, since re-encoding the replacement characters would
/// change the bytes sent.
fn decode_form(raw: &str) -> Option<Vec<(String, String)>> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            Some((decode_component(name)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(component: &str) -> Option<String> {
    let spaced = component.replace('+', " ");
    percent_encoding::percent_decode_str(&spaced)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}

fn parse_json(raw: &str) -> Result<Value, JsonReformatFailure> {
    Ok(serde_json::from_str(raw)?)
}

/// Content-Type value for targets that attach it to the body object.
pub(crate) fn content_type(descriptor: &RequestDescriptor) -> Option<&str> {
    descriptor.header_value("content-type")
}

/// Upper-cased method for targets whose canonical spelling is a constant
/// or a dedicated call. Returns `None` for methods outside the common set.
pub(crate) fn standard_method(method: &str) -> Option<&'static str> {
    const STANDARD: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];
    STANDARD
        .iter()
        .copied()
        .find(|m| m.eq_ignore_ascii_case(method))
}

/// Standard methods in upper case; anything else exactly as given, since
/// extension methods are case-sensitive.
pub(crate) fn canonical_method(method: &str) -> &str {
    standard_method(method).unwrap_or(method)
}
