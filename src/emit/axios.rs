use super::javascript::SYNTAX;
use super::json;
use super::literal::double_quoted as quote;
use super::{Body, body, standard_method};
use crate::types::RequestDescriptor;

/// CommonJS script using `axios.request`.
pub(super) fn emit(d: &RequestDescriptor) -> String {
    let mut out = String::from("const axios = require(\"axios\");\n\n");
    out.push_str("axios\n  .request({\n");

    // axios documents its method names in lower case.
    let method = match standard_method(d.method()) {
        Some(m) => m.to_ascii_lowercase(),
        None => d.method().to_string(),
    };
    out.push_str(&format!("    method: {},\n", quote(&method)));
    out.push_str(&format!("    url: {},\n", quote(d.url())));

    if !d.headers().is_empty() {
        out.push_str("    headers: {\n");
        for (name, value) in d.headers() {
            out.push_str(&format!("      {}: {},\n", quote(name), quote(value)));
        }
        out.push_str("    },\n");
    }

    match body(d) {
        Some(Body::Json(value)) => {
            out.push_str(&format!("    data: {},\n", json::render(&value, &SYNTAX, 2)));
        }
        Some(Body::Form(pairs)) => {
            out.push_str("    data: new URLSearchParams([\n");
            for (k, v) in &pairs {
                out.push_str(&format!("      [{}, {}],\n", quote(k), quote(v)));
            }
            out.push_str("    ]),\n");
        }
        Some(Body::Raw(raw)) => out.push_str(&format!("    data: {},\n", quote(raw))),
        None => {}
    }

    out.push_str("  })\n");
    out.push_str("  .then((response) => {\n");
    out.push_str("    console.log(response.status);\n");
    out.push_str("    console.log(response.data);\n");
    out.push_str("  })\n");
    out.push_str("  .catch((error) => console.error(error));\n");
    out
}
