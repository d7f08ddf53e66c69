use super::json::{self, JsonSyntax};
use super::literal::double_quoted as quote;
use super::{Body, body, canonical_method};
use crate::types::RequestDescriptor;

const SYNTAX: JsonSyntax = JsonSyntax {
    object_open: "map[string]any{",
    object_close: "}",
    empty_object: "map[string]any{}",
    array_open: "[]any{",
    array_close: "}",
    empty_array: "[]any{}",
    key_separator: ": ",
    null: "nil",
    true_literal: "true",
    false_literal: "false",
    trailing_comma: true,
    indent: "\t",
    string: quote,
};

/// `net/http` program.
pub(super) fn emit(d: &RequestDescriptor) -> String {
    let body = body(d);

    let (imports, setup, reader): (&[&str], String, &str) = match &body {
        Some(Body::Json(value)) => (
            &["bytes", "encoding/json", "fmt", "io", "net/http"][..],
            format!(
                "\tpayload, err := json.Marshal({})\n{CHECK_ERR}\n",
                json::render(value, &SYNTAX, 1)
            ),
            "bytes.NewReader(payload)",
        ),
        Some(Body::Form(_) | Body::Raw(_)) => (
            &["fmt", "io", "net/http", "strings"][..],
            format!(
                "\tbody := strings.NewReader({})\n\n",
                quote(d.body().unwrap_or_default())
            ),
            "body",
        ),
        None => (&["fmt", "io", "net/http"][..], String::new(), "nil"),
    };

    let mut out = String::from("package main\n\nimport (\n");
    for import in imports {
        out.push_str(&format!("\t{}\n", quote(import)));
    }
    out.push_str(")\n\nfunc main() {\n");
    out.push_str(&setup);

    out.push_str(&format!(
        "\treq, err := http.NewRequest({}, {}, {reader})\n",
        quote(canonical_method(d.method())),
        quote(d.url())
    ));
    out.push_str(CHECK_ERR);
    for (name, value) in d.headers() {
        out.push_str(&format!("\treq.Header.Set({}, {})\n", quote(name), quote(value)));
    }

    out.push_str("\n\tresp, err := http.DefaultClient.Do(req)\n");
    out.push_str(CHECK_ERR);
    out.push_str("\tdefer resp.Body.Close()\n\n");
    out.push_str("\trespBody, err := io.ReadAll(resp.Body)\n");
    out.push_str(CHECK_ERR);
    out.push_str("\tfmt.Println(resp.Status)\n");
    out.push_str("\tfmt.Println(string(respBody))\n");
    out.push_str("}\n");
    out
}

const CHECK_ERR: &str = "\tif err != nil {\n\t\tpanic(err)\n\t}\n";
