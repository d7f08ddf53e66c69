use super::json::{self, JsonSyntax};
use super::literal::single_quoted as quote;
use super::{Body, body, standard_method};
use crate::types::RequestDescriptor;

const SYNTAX: JsonSyntax = JsonSyntax {
    object_open: "{",
    object_close: "}",
    empty_object: "{}",
    array_open: "[",
    array_close: "]",
    empty_array: "[]",
    key_separator: " => ",
    null: "nil",
    true_literal: "true",
    false_literal: "false",
    trailing_comma: false,
    indent: "  ",
    string: quote,
};

/// `Net::HTTP` script.
pub(super) fn emit(d: &RequestDescriptor) -> String {
    let body = body(d);

    let mut out = String::from("require 'net/http'\n");
    if matches!(body, Some(Body::Json(_))) {
        out.push_str("require 'json'\n");
    }
    out.push_str("require 'uri'\n\n");
    out.push_str(&format!("uri = URI({})\n\n", quote(d.url())));

    let has_body = body.is_some();
    match standard_method(d.method()) {
        // Net::HTTP::Get etc. are the capitalised method names.
        Some(m) => out.push_str(&format!(
            "request = Net::HTTP::{}{}.new(uri)\n",
            &m[..1],
            m[1..].to_ascii_lowercase()
        )),
        None => out.push_str(&format!(
            "request = Net::HTTPGenericRequest.new({}, {has_body}, true, uri)\n",
            quote(d.method())
        )),
    }

    for (name, value) in d.headers() {
        out.push_str(&format!("request[{}] = {}\n", quote(name), quote(value)));
    }

    match body {
        Some(Body::Json(value)) => {
            out.push_str(&format!(
                "request.body = JSON.generate({})\n",
                json::render(&value, &SYNTAX, 0)
            ));
        }
        Some(Body::Form(pairs)) => {
            out.push_str("request.set_form_data(\n  [\n");
            for (k, v) in &pairs {
                out.push_str(&format!("    [{}, {}],\n", quote(k), quote(v)));
            }
            out.push_str("  ]\n)\n");
        }
        Some(Body::Raw(raw)) => out.push_str(&format!("request.body = {}\n", quote(raw))),
        None => {}
    }

    out.push_str("\nresponse = Net::HTTP.start(uri.hostname, uri.port, use_ssl: uri.scheme == 'https') do |http|\n");
    out.push_str("  http.request(request)\n");
    out.push_str("end\n\n");
    out.push_str("puts response.code\n");
    out.push_str("puts response.body\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_invocation;

    #[test]
    fn standard_method_class() {
        let d = parse_invocation("curl -X patch https://x.test").unwrap();
        assert!(emit(&d).contains("request = Net::HTTP::Patch.new(uri)\n"));
    }

    #[test]
    fn generic_request_for_extension_method() {
        let d = parse_invocation("curl -X PURGE https://x.test").unwrap();
        assert!(emit(&d).contains("Net::HTTPGenericRequest.new('PURGE', false, true, uri)"));
    }

    #[test]
    fn json_body_is_hash() {
        let d = parse_invocation(
            r#"curl -H 'Content-Type: application/json' -d '{"a":null}' https://x.test"#,
        )
        .unwrap();
        let code = emit(&d);
        assert!(code.contains("require 'json'\n"));
        assert!(code.contains("request.body = JSON.generate({\n  'a' => nil\n})\n"));
        assert!(code.contains("request['Content-Type'] = 'application/json'\n"));
    }

    #[test]
    fn form_body_uses_set_form_data() {
        let d = parse_invocation(
            "curl -H 'Content-Type: application/x-www-form-urlencoded' -d 'a=1' https://x.test",
        )
        .unwrap();
        assert!(emit(&d).contains("    ['a', '1'],\n"));
    }
}
