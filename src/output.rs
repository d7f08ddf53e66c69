use crate::emit::EmitterTarget;
use crate::execute::ExecutionResponse;
use crate::types::ParsedInvocation;

/// Serialize a [`ParsedInvocation`] to a JSON string.
///
/// When `pretty` is `true` the output is indented for readability.
pub fn format_json(parsed: &ParsedInvocation, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(parsed).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    } else {
        serde_json::to_string(parsed).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

/// Render a [`ParsedInvocation`] in a human-readable debug format.
pub fn format_debug(parsed: &ParsedInvocation) -> String {
    let request = &parsed.descriptor;
    let facets = request.facets();
    let mut out = String::with_capacity(256);

    out.push_str("=== curl Request ===\n");
    out.push_str(&format!("Method:  {}\n", request.method()));
    out.push_str(&format!("URL:     {}\n", request.url()));
    out.push_str(&format!(
        "Facets:  json={} form={} multipart={}\n",
        facets.is_json, facets.is_form, facets.is_multipart
    ));

    out.push_str(&format!("\n--- Headers ({}) ---\n", request.headers().len()));
    for (name, value) in request.headers() {
        out.push_str(&format!("  {name}: {value}\n"));
    }

    match request.body() {
        Some(body) => {
            out.push_str(&format!("\n--- Body ({} bytes) ---\n", body.len()));
            out.push_str(body);
            out.push('\n');
        }
        None => out.push_str("\n--- No Body ---\n"),
    }

    if !parsed.ignored.is_empty() {
        out.push_str(&format!("\n--- Ignored ({}) ---\n", parsed.ignored.len()));
        for token in &parsed.ignored {
            out.push_str(&format!("  {token}\n"));
        }
    }

    out.push_str("====================\n");
    out
}

/// One line per target: id, extension and label.
pub fn format_targets<'a>(targets: impl IntoIterator<Item = &'a EmitterTarget>) -> String {
    let mut out = String::new();
    for target in targets {
        out.push_str(&format!(
            "{:<12} {:<7} {}\n",
            target.id,
            target.extension.unwrap_or("-"),
            target.label
        ));
    }
    out
}

/// Render a live response as status line, headers and body.
pub fn format_response(response: &ExecutionResponse) -> String {
    let mut out = String::with_capacity(64 + response.body.as_str().len());

    out.push_str(&format!("Status: {}\n", response.status));
    for (name, value) in &response.headers {
        out.push_str(&format!("{name}: {value}\n"));
    }
    out.push('\n');
    out.push_str(response.body.as_str());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::targets;
    use crate::execute::ResponseBody;
    use crate::Parser;

    #[test]
    fn debug_lists_ignored_tokens() {
        let parsed = Parser::new()
            .parse("curl -s -u me:pw https://x.test -H 'A: b'")
            .unwrap();
        let out = format_debug(&parsed);
        assert!(out.contains("Method:  GET\n"));
        assert!(out.contains("  A: b\n"));
        assert!(out.contains("--- Ignored (3) ---\n  -s\n  -u\n  me:pw\n"));
    }

    #[test]
    fn json_output_has_descriptor_fields() {
        let parsed = Parser::new().parse("curl -d x https://x.test").unwrap();
        let value: serde_json::Value = serde_json::from_str(&format_json(&parsed, false)).unwrap();
        assert_eq!(value["descriptor"]["method"], "POST");
        assert_eq!(value["descriptor"]["body"], "x");
        assert_eq!(value["descriptor"]["facets"]["is_json"], false);
    }

    #[test]
    fn targets_table_has_one_line_per_target() {
        let out = format_targets(targets());
        assert_eq!(out.lines().count(), targets().len());
        assert!(out.starts_with("python       py      Python (requests)\n"));
    }

    #[test]
    fn response_rendering() {
        let response = ExecutionResponse {
            status: 201,
            headers: vec![("content-type".to_string(), "text/plain".to_string())],
            body: ResponseBody::Text("made".to_string()),
        };
        assert_eq!(
            format_response(&response),
            "Status: 201\ncontent-type: text/plain\n\nmade\n"
        );
    }
}
