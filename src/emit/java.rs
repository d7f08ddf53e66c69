use super::literal::double_quoted as quote;
use super::{canonical_method, standard_method};
use crate::types::RequestDescriptor;

/// `java.net.http.HttpClient` program. Java has no map literal that
/// round-trips to JSON, so bodies are always sent as a string.
pub(super) fn emit(d: &RequestDescriptor) -> String {
    let mut out = String::new();
    for import in [
        "java.net.URI",
        "java.net.http.HttpClient",
        "java.net.http.HttpRequest",
        "java.net.http.HttpResponse",
    ] {
        out.push_str(&format!("import {import};\n"));
    }
    out.push_str("\npublic class Main {\n");
    out.push_str("    public static void main(String[] args) throws Exception {\n");
    out.push_str("        HttpClient client = HttpClient.newHttpClient();\n\n");
    out.push_str("        HttpRequest request = HttpRequest.newBuilder()\n");
    out.push_str(&format!("            .uri(URI.create({}))\n", quote(d.url())));

    let method = canonical_method(d.method());
    match (d.body(), standard_method(method)) {
        (Some(body), _) => out.push_str(&format!(
            "            .method({}, HttpRequest.BodyPublishers.ofString({}))\n",
            quote(method),
            quote(body)
        )),
        (None, Some("GET")) => out.push_str("            .GET()\n"),
        (None, Some("DELETE")) => out.push_str("            .DELETE()\n"),
        (None, _) => out.push_str(&format!(
            "            .method({}, HttpRequest.BodyPublishers.noBody())\n",
            quote(method)
        )),
    }

    for (name, value) in d.headers() {
        out.push_str(&format!("            .header({}, {})\n", quote(name), quote(value)));
    }
    out.push_str("            .build();\n\n");

    out.push_str("        HttpResponse<String> response = client.send(request, HttpResponse.BodyHandlers.ofString());\n\n");
    out.push_str("        System.out.println(response.statusCode());\n");
    out.push_str("        System.out.println(response.body());\n");
    out.push_str("    }\n}\n");
    out
}
