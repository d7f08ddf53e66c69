use super::json::{self, JsonSyntax};
use super::literal::single_quoted as quote;
use super::{Body, body, canonical_method};
use crate::types::RequestDescriptor;

const SYNTAX: JsonSyntax = JsonSyntax {
    object_open: "[",
    object_close: "]",
    // `[]` would encode as a JSON array.
    empty_object: "new \\stdClass()",
    array_open: "[",
    array_close: "]",
    empty_array: "[]",
    key_separator: " => ",
    null: "null",
    true_literal: "true",
    false_literal: "false",
    trailing_comma: false,
    indent: "    ",
    string: quote,
};

/// Script using the curl extension.
pub(super) fn emit(d: &RequestDescriptor) -> String {
    let mut out = String::from("<?php\n\n$ch = curl_init();\n\n");
    out.push_str(&format!("curl_setopt($ch, CURLOPT_URL, {});\n", quote(d.url())));
    out.push_str("curl_setopt($ch, CURLOPT_RETURNTRANSFER, true);\n");
    out.push_str(&format!(
        "curl_setopt($ch, CURLOPT_CUSTOMREQUEST, {});\n",
        quote(canonical_method(d.method()))
    ));

    if !d.headers().is_empty() {
        out.push_str("curl_setopt($ch, CURLOPT_HTTPHEADER, [\n");
        for (name, value) in d.headers() {
            out.push_str(&format!("    {},\n", quote(&format!("{name}: {value}"))));
        }
        out.push_str("]);\n");
    }

    match body(d) {
        Some(Body::Json(value)) => {
            out.push_str(&format!(
                "curl_setopt($ch, CURLOPT_POSTFIELDS, json_encode({}));\n",
                json::render(&value, &SYNTAX, 0)
            ));
        }
        Some(Body::Form(_) | Body::Raw(_)) => {
            out.push_str(&format!(
                "curl_setopt($ch, CURLOPT_POSTFIELDS, {});\n",
                quote(d.body().unwrap_or_default())
            ));
        }
        None => {}
    }

    out.push_str("\n$response = curl_exec($ch);\n");
    out.push_str("$status = curl_getinfo($ch, CURLINFO_HTTP_CODE);\n");
    out.push_str("curl_close($ch);\n\n");
    out.push_str("echo $status . PHP_EOL;\n");
    out.push_str("echo $response . PHP_EOL;\n");
    out
}
