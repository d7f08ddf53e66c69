use super::json::{self, JsonSyntax};
use super::literal::double_quoted as quote;
use super::{Body, body, canonical_method};
use crate::types::RequestDescriptor;

pub(super) const SYNTAX: JsonSyntax = JsonSyntax {
    object_open: "{",
    object_close: "}",
    empty_object: "{}",
    array_open: "[",
    array_close: "]",
    empty_array: "[]",
    key_separator: ": ",
    null: "null",
    true_literal: "true",
    false_literal: "false",
    trailing_comma: false,
    indent: "  ",
    string: quote,
};

/// Browser / Node 18+ `fetch` with top-level await.
pub(super) fn emit(d: &RequestDescriptor) -> String {
    let mut out = format!("const response = await fetch({}, {{\n", quote(d.url()));
    out.push_str(&format!("  method: {},\n", quote(canonical_method(d.method()))));

    if !d.headers().is_empty() {
        out.push_str("  headers: {\n");
        for (name, value) in d.headers() {
            out.push_str(&format!("    {}: {},\n", quote(name), quote(value)));
        }
        out.push_str("  },\n");
    }

    match body(d) {
        Some(Body::Json(value)) => {
            out.push_str(&format!(
                "  body: JSON.stringify({}),\n",
                json::render(&value, &SYNTAX, 1)
            ));
        }
        Some(Body::Form(pairs)) => {
            out.push_str("  body: new URLSearchParams([\n");
            for (k, v) in &pairs {
                out.push_str(&format!("    [{}, {}],\n", quote(k), quote(v)));
            }
            out.push_str("  ]),\n");
        }
        Some(Body::Raw(raw)) => out.push_str(&format!("  body: {},\n", quote(raw))),
        None => {}
    }

    out.push_str("});\n\n");
    out.push_str("console.log(response.status);\n");
    out.push_str("console.log(await response.text());\n");
    out
}
