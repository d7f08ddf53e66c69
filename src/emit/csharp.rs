use super::literal::double_quoted as quote;
use super::{content_type, standard_method};
use crate::types::RequestDescriptor;

/// Top-level-statements program using `HttpClient`.
///
/// The body is attached first so that content headers, which `HttpClient`
/// refuses on the request itself, can be set on `request.Content` while
/// still being emitted in their original position.
pub(super) fn emit(d: &RequestDescriptor) -> String {
    let mut out = String::from("using System;\nusing System.Net.Http;\n");
    if d.body().is_some() {
        out.push_str("using System.Text;\n");
    }
    out.push_str("\nusing var client = new HttpClient();\n\n");

    let method = match standard_method(d.method()) {
        Some(m) => format!("HttpMethod.{}{}", &m[..1], m[1..].to_ascii_lowercase()),
        None => format!("new HttpMethod({})", quote(d.method())),
    };
    out.push_str(&format!(
        "using var request = new HttpRequestMessage({method}, {});\n",
        quote(d.url())
    ));

    if let Some(body) = d.body() {
        let media_type = content_type(d)
            .and_then(|ct| ct.split(';').next())
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or("application/x-www-form-urlencoded");
        out.push_str(&format!(
            "request.Content = new StringContent({}, Encoding.UTF8, {});\n",
            quote(body),
            quote(media_type)
        ));
    }

    for (name, value) in d.headers() {
        if d.body().is_some() && is_content_header(name) {
            out.push_str(&format!("request.Content.Headers.Remove({});\n", quote(name)));
            out.push_str(&format!(
                "request.Content.Headers.TryAddWithoutValidation({}, {});\n",
                quote(name),
                quote(value)
            ));
        } else {
            out.push_str(&format!(
                "request.Headers.TryAddWithoutValidation({}, {});\n",
                quote(name),
                quote(value)
            ));
        }
    }

    out.push_str("\nusing var response = await client.SendAsync(request);\n");
    out.push_str("Console.WriteLine((int)response.StatusCode);\n");
    out.push_str("Console.WriteLine(await response.Content.ReadAsStringAsync());\n");
    out
}

fn is_content_header(name: &str) -> bool {
    let content_prefixed = name.len() > 8
        && name
            .get(..8)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("content-"));
    content_prefixed || name.eq_ignore_ascii_case("expires")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_invocation;

    #[test]
    fn content_type_goes_on_content_headers() {
        let d = parse_invocation(
            r#"curl -H 'Accept: */*' -H 'Content-Type: application/json; charset=utf-8' -d '{"a":1}' https://x.test"#,
        )
        .unwrap();
        let code = emit(&d);
        assert!(code.contains(
            r#"request.Content = new StringContent("{\"a\":1}", Encoding.UTF8, "application/json");"#
        ));
        assert!(code.contains(
            r#"request.Content.Headers.TryAddWithoutValidation("Content-Type", "application/json; charset=utf-8");"#
        ));
        assert!(code.contains(r#"request.Headers.TryAddWithoutValidation("Accept", "*/*");"#));
        assert!(code.contains("HttpMethod.Post"));
    }

    #[test]
    fn body_without_content_type_uses_curl_default() {
        let d = parse_invocation("curl -d 'a=1' https://x.test").unwrap();
        assert!(emit(&d).contains(
            r#"new StringContent("a=1", Encoding.UTF8, "application/x-www-form-urlencoded");"#
        ));
    }

    #[test]
    fn no_body_no_content() {
        let d = parse_invocation("curl -X OPTIONS https://x.test").unwrap();
        let code = emit(&d);
        assert!(code.contains("new HttpRequestMessage(HttpMethod.Options, \"https://x.test\")"));
        assert!(!code.contains("StringContent"));
        assert!(!code.contains("using System.Text;"));
    }

    #[test]
    fn content_header_detection() {
        assert!(is_content_header("content-type"));
        assert!(is_content_header("Content-Encoding"));
        assert!(!is_content_header("Accept"));
        assert!(!is_content_header("Content-"));
        assert!(!is_content_header("Cöntent-Type"));
    }
}
