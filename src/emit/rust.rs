use super::json::{self, JsonSyntax};
use super::literal::braced_double_quoted as quote;
use super::{Body, body, standard_method};
use crate::types::RequestDescriptor;

// Inside `serde_json::json!` the literal grammar is JSON itself.
const SYNTAX: JsonSyntax = JsonSyntax {
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
    indent: "    ",
    string: quote,
};

/// Async `reqwest` program on tokio.
pub(super) fn emit(d: &RequestDescriptor) -> String {
    let mut out = String::from("#[tokio::main]\n");
    out.push_str("async fn main() -> Result<(), Box<dyn std::error::Error>> {\n");
    out.push_str("    let client = reqwest::Client::new();\n\n");

    let method = match standard_method(d.method()) {
        Some(m) => format!("reqwest::Method::{m}"),
        None => format!(
            "reqwest::Method::from_bytes({}.as_bytes())?",
            quote(d.method())
        ),
    };
    out.push_str("    let response = client\n");
    out.push_str(&format!("        .request({method}, {})\n", quote(d.url())));

    for (name, value) in d.headers() {
        out.push_str(&format!("        .header({}, {})\n", quote(name), quote(value)));
    }

    match body(d) {
        Some(Body::Json(value)) => {
            out.push_str(&format!(
                "        .body(serde_json::json!({}).to_string())\n",
                json::render(&value, &SYNTAX, 2)
            ));
        }
        Some(Body::Form(_) | Body::Raw(_)) => {
            out.push_str(&format!(
                "        .body({})\n",
                quote(d.body().unwrap_or_default())
            ));
        }
        None => {}
    }

    out.push_str("        .send()\n");
    out.push_str("        .await?;\n\n");
    out.push_str("    println!(\"{}\", response.status());\n");
    out.push_str("    println!(\"{}\", response.text().await?);\n");
    out.push_str("    Ok(())\n");
    out.push_str("}\n");
    out
}
