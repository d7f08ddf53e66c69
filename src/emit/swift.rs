use super::json::{self, JsonSyntax};
use super::literal::braced_double_quoted as quote;
use super::{Body, body, canonical_method};
use crate::types::RequestDescriptor;

const SYNTAX: JsonSyntax = JsonSyntax {
    object_open: "[",
    object_close: "]",
    // Bare `[:]` and `[]` have no inferable type inside `Any`.
    empty_object: "[String: Any]()",
    array_open: "[",
    array_close: "]",
    empty_array: "[Any]()",
    key_separator: ": ",
    null: "NSNull()",
    true_literal: "true",
    false_literal: "false",
    trailing_comma: false,
    indent: "    ",
    string: quote,
};

/// `URLSession` script using async/await.
pub(super) fn emit(d: &RequestDescriptor) -> String {
    let mut out = String::from("import Foundation\n\n");
    out.push_str(&format!(
        "var request = URLRequest(url: URL(string: {})!)\n",
        quote(d.url())
    ));
    out.push_str(&format!(
        "request.httpMethod = {}\n",
        quote(canonical_method(d.method()))
    ));

    for (name, value) in d.headers() {
        out.push_str(&format!(
            "request.setValue({}, forHTTPHeaderField: {})\n",
            quote(value),
            quote(name)
        ));
    }

    match body(d) {
        // JSONSerialization only accepts a top-level array or dictionary.
        Some(Body::Json(value)) if value.is_object() || value.is_array() => {
            let annotation = if value.is_array() { "[Any]" } else { "[String: Any]" };
            out.push_str(&format!(
                "\nlet payload: {annotation} = {}\n",
                json::render(&value, &SYNTAX, 0)
            ));
            out.push_str("request.httpBody = try JSONSerialization.data(withJSONObject: payload)\n");
        }
        Some(_) => {
            out.push_str(&format!(
                "request.httpBody = Data({}.utf8)\n",
                quote(d.body().unwrap_or_default())
            ));
        }
        None => {}
    }

    out.push_str("\nlet (data, response) = try await URLSession.shared.data(for: request)\n");
    out.push_str("if let httpResponse = response as? HTTPURLResponse {\n");
    out.push_str("    print(httpResponse.statusCode)\n");
    out.push_str("}\n");
    out.push_str("print(String(decoding: data, as: UTF8.self))\n");
    out
}
