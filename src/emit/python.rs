use std::collections::HashSet;

use super::json::{self, JsonSyntax};
use super::literal::double_quoted as quote;
use super::{Body, body, standard_method};
use crate::types::RequestDescriptor;

const SYNTAX: JsonSyntax = JsonSyntax {
    object_open: "{",
    object_close: "}",
    empty_object: "{}",
    array_open: "[",
    array_close: "]",
    empty_array: "[]",
    key_separator: ": ",
    null: "None",
    true_literal: "True",
    false_literal: "False",
    trailing_comma: false,
    indent: "    ",
    string: quote,
};

/// `requests` script.
pub(super) fn emit(d: &RequestDescriptor) -> String {
    let mut out = String::from("import requests\n\n");
    let mut args = vec!["url".to_string()];

    out.push_str(&format!("url = {}\n", quote(d.url())));

    if !d.headers().is_empty() {
        out.push_str("\nheaders = {\n");
        for (name, value) in d.headers() {
            out.push_str(&format!("    {}: {},\n", quote(name), quote(value)));
        }
        out.push_str("}\n");
        args.push("headers=headers".to_string());
    }

    match body(d) {
        Some(Body::Json(value)) => {
            out.push_str(&format!("\npayload = {}\n", json::render(&value, &SYNTAX, 0)));
            args.push("json=payload".to_string());
        }
        Some(Body::Form(pairs)) => {
            out.push_str(&format!("\ndata = {}\n", form_literal(&pairs)));
            args.push("data=data".to_string());
        }
        Some(Body::Raw(raw)) => {
            out.push_str(&format!("\ndata = {}\n", quote(raw)));
            args.push("data=data".to_string());
        }
        None => {}
    }

    let call = match standard_method(d.method()) {
        Some(m) => format!("requests.{}({})", m.to_ascii_lowercase(), args.join(", ")),
        None => format!("requests.request({}, {})", quote(d.method()), args.join(", ")),
    };
    out.push_str(&format!("\nresponse = {call}\n\n"));
    out.push_str("print(response.status_code)\nprint(response.text)\n");
    out
}

/// A dict, or a list of tuples when a field name repeats.
fn form_literal(pairs: &[(String, String)]) -> String {
    let mut seen = HashSet::new();
    let unique = pairs.iter().all(|(k, _)| seen.insert(k.as_str()));

    let mut out = String::from(if unique { "{\n" } else { "[\n" });
    for (k, v) in pairs {
        if unique {
            out.push_str(&format!("    {}: {},\n", quote(k), quote(v)));
        } else {
            out.push_str(&format!("    ({}, {}),\n", quote(k), quote(v)));
        }
    }
    out.push_str(if unique { "}" } else { "]" });
    out
}
