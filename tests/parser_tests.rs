use curlgen::{
    Error, Facets, InvalidInvocation, Parser, ParserConfig, parse_invocation,
    parse_invocation_with_config, tokenize,
};

// =========================================================================
// Command and URL
// =========================================================================

#[test]
fn simple_get_request() {
    let req = parse_invocation("curl https://x.test").expect("should parse");
    assert_eq!(req.method(), "GET");
    assert_eq!(req.url(), "https://x.test");
    assert!(req.headers().is_empty());
    assert!(req.body().is_none());
    assert_eq!(req.facets(), Facets::default());
}

#[test]
fn command_is_case_insensitive() {
    let req = parse_invocation("CURL https://x.test").expect("should parse");
    assert_eq!(req.url(), "https://x.test");
}

#[test]
fn non_curl_command_is_rejected() {
    let err = parse_invocation("wget https://x.test").unwrap_err();
    assert_eq!(
        err,
        Error::InvalidInvocation(InvalidInvocation::NotCurl("wget".to_string()))
    );
}

#[test]
fn empty_input_is_rejected() {
    assert_eq!(
        parse_invocation("   ").unwrap_err(),
        Error::InvalidInvocation(InvalidInvocation::Empty)
    );
}

#[test]
fn missing_url_is_rejected() {
    let err = parse_invocation(r#"curl -H "Accept: */*""#).unwrap_err();
    assert_eq!(err, Error::InvalidInvocation(InvalidInvocation::MissingUrl));
}

#[test]
fn url_flag_sets_url() {
    let req = parse_invocation("curl --url https://x.test/a -X DELETE").unwrap();
    assert_eq!(req.url(), "https://x.test/a");
    assert_eq!(req.method(), "DELETE");
}

#[test]
fn url_flag_overrides_bare_url() {
    let req = parse_invocation("curl https://first.test --url https://second.test").unwrap();
    assert_eq!(req.url(), "https://second.test");
}

#[test]
fn empty_url_flag_leaves_url_unset() {
    let parsed = Parser::new().parse("curl --url '' https://x.test").unwrap();
    assert_eq!(parsed.descriptor.url(), "https://x.test");
    assert!(parsed.ignored.is_empty());
}

#[test]
fn second_bare_token_is_ignored() {
    let parsed = Parser::new()
        .parse("curl https://first.test https://second.test")
        .unwrap();
    assert_eq!(parsed.descriptor.url(), "https://first.test");
    assert_eq!(parsed.ignored, vec!["https://second.test"]);
}

// =========================================================================
// Method inference
// =========================================================================

#[test]
fn data_defaults_method_to_post_without_json_facet() {
    let req = parse_invocation(r#"curl -d '{"a":1}' https://x.test"#).unwrap();
    assert_eq!(req.method(), "POST");
    assert_eq!(req.body(), Some(r#"{"a":1}"#));
    assert!(!req.facets().is_json);
}

#[test]
fn explicit_method_wins_regardless_of_order() {
    let before = parse_invocation("curl -X PUT -d x https://x.test").unwrap();
    assert_eq!(before.method(), "PUT");

    let after = parse_invocation("curl -d x -X GET https://x.test").unwrap();
    assert_eq!(after.method(), "GET");
    assert_eq!(after.body(), Some("x"));
}

#[test]
fn all_data_flag_spellings() {
    for flag in ["-d", "--data", "--data-raw", "--data-binary", "--data-ascii"] {
        let req = parse_invocation(&format!("curl {flag} 'k=v' https://x.test"))
            .unwrap_or_else(|e| panic!("flag {flag}: {e}"));
        assert_eq!(req.body(), Some("k=v"), "body for {flag}");
        assert_eq!(req.method(), "POST", "method for {flag}");
    }
}

#[test]
fn last_data_flag_wins() {
    let req = parse_invocation("curl -d a=1 --data b=2 https://x.test").unwrap();
    assert_eq!(req.body(), Some("b=2"));
}

#[test]
fn head_flag_sets_method() {
    let req = parse_invocation("curl -I https://x.test").unwrap();
    assert_eq!(req.method(), "HEAD");
}

#[test]
fn get_flag_moves_data_into_query() {
    let req = parse_invocation("curl -G -d q=rust https://x.test/search?page=2").unwrap();
    assert_eq!(req.method(), "GET");
    assert_eq!(req.url(), "https://x.test/search?page=2&q=rust");
    assert!(req.body().is_none());

    let req = parse_invocation("curl --get https://x.test/search --data q=1").unwrap();
    assert_eq!(req.url(), "https://x.test/search?q=1");
}

#[test]
fn attached_short_flag_values() {
    let req = parse_invocation("curl -XPATCH -H'X-A: 1' -d'v' https://x.test").unwrap();
    assert_eq!(req.method(), "PATCH");
    assert_eq!(req.header_value("X-A"), Some("1"));
    assert_eq!(req.body(), Some("v"));
}

// =========================================================================
// Header parsing
// =========================================================================

#[test]
fn headers_keep_insertion_order() {
    let req = parse_invocation(
        "curl -H 'X-Third: 3' -H 'X-First: 1' --header 'X-Second: 2' https://x.test",
    )
    .unwrap();
    let names: Vec<&str> = req.headers().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["X-Third", "X-First", "X-Second"]);
}

#[test]
fn duplicate_header_overwrites_in_place() {
    let req = parse_invocation("curl -H 'A: 1' -H 'B: 2' -H 'A: 3' https://x.test").unwrap();
    let pairs: Vec<(&str, &str)> = req
        .headers()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(pairs, vec![("A", "3"), ("B", "2")]);
}

#[test]
fn header_split_on_first_colon_and_trimmed() {
    let req = parse_invocation("curl -H '  Referer :  https://a.test:8080/x  ' https://x.test").unwrap();
    assert_eq!(req.header_value("Referer"), Some("https://a.test:8080/x"));
}

#[test]
fn header_without_colon_is_ignored() {
    let parsed = Parser::new().parse("curl -H 'NoColon' https://x.test").unwrap();
    assert!(parsed.descriptor.headers().is_empty());
    assert_eq!(parsed.ignored, vec!["-H", "NoColon"]);
}

#[test]
fn user_agent_and_referer_flags() {
    let req = parse_invocation("curl -A 'bot/1.0' --referer https://ref.test https://x.test").unwrap();
    assert_eq!(req.header_value("User-Agent"), Some("bot/1.0"));
    assert_eq!(req.header_value("Referer"), Some("https://ref.test"));
}

#[test]
fn json_flag_adds_headers_unless_present() {
    let req = parse_invocation(r#"curl --json '{"a":1}' https://x.test"#).unwrap();
    assert_eq!(req.method(), "POST");
    assert_eq!(req.header_value("Content-Type"), Some("application/json"));
    assert_eq!(req.header_value("Accept"), Some("application/json"));
    assert!(req.facets().is_json);

    let req = parse_invocation(r#"curl -H 'accept: text/plain' --json '{}' https://x.test"#).unwrap();
    assert_eq!(req.header_value("Accept"), Some("text/plain"));
    assert_eq!(req.headers().len(), 2);
}

#[test]
fn data_urlencode_encodes_content() {
    let req = parse_invocation("curl --data-urlencode 'msg=hello world&more' https://x.test").unwrap();
    assert_eq!(req.body(), Some("msg=hello%20world%26more"));
    assert_eq!(req.method(), "POST");
}

// =========================================================================
// Facets
// =========================================================================

#[test]
fn json_facet_from_content_type() {
    let req = parse_invocation(
        r#"curl -X POST -H "Content-Type: application/json" -d '{"a":1}' https://api.test/items"#,
    )
    .unwrap();
    assert_eq!(req.method(), "POST");
    assert_eq!(req.url(), "https://api.test/items");
    assert_eq!(req.headers().len(), 1);
    assert_eq!(req.header_value("Content-Type"), Some("application/json"));
    assert_eq!(req.body(), Some(r#"{"a":1}"#));
    assert!(req.facets().is_json);
    assert!(!req.facets().is_form);
    assert!(!req.facets().is_multipart);
}

#[test]
fn form_and_multipart_facets() {
    let form = parse_invocation(
        "curl -H 'content-type: application/x-www-form-urlencoded' -d a=1 https://x.test",
    )
    .unwrap();
    assert!(form.facets().is_form);

    let multipart = parse_invocation(
        "curl -H 'Content-Type: multipart/form-data; boundary=X' -d x https://x.test",
    )
    .unwrap();
    assert!(multipart.facets().is_multipart);
}

// =========================================================================
// Ignored flags
// =========================================================================

#[test]
fn unknown_switches_are_ignored_and_reported() {
    let parsed = Parser::new()
        .parse("curl -sSL --compressed -k https://x.test")
        .unwrap();
    assert_eq!(parsed.descriptor.url(), "https://x.test");
    assert_eq!(parsed.ignored, vec!["-sSL", "--compressed", "-k"]);
}

#[test]
fn unsupported_value_flags_skip_their_argument() {
    let parsed = Parser::new()
        .parse("curl -u user:pass -b 'sid=1' --proxy http://p:8080 -F file=@a.txt https://x.test")
        .unwrap();
    assert_eq!(parsed.descriptor.url(), "https://x.test");
    assert_eq!(
        parsed.ignored,
        vec!["-u", "user:pass", "-b", "sid=1", "--proxy", "http://p:8080", "-F", "file=@a.txt"]
    );
}

#[test]
fn trailing_flag_without_value_is_ignored() {
    let parsed = Parser::new().parse("curl https://x.test -X").unwrap();
    assert_eq!(parsed.descriptor.method(), "GET");
    assert_eq!(parsed.ignored, vec!["-X"]);
}

// =========================================================================
// Limits
// =========================================================================

#[test]
fn input_too_long() {
    let config = ParserConfig {
        max_input_len: 16,
        ..ParserConfig::default()
    };
    let err = parse_invocation_with_config("curl https://a-long-host.test", config).unwrap_err();
    assert_eq!(err, Error::InvalidInvocation(InvalidInvocation::TooLong(16)));
}

#[test]
fn too_many_headers() {
    let config = ParserConfig {
        max_headers: 2,
        ..ParserConfig::default()
    };
    let err = parse_invocation_with_config(
        "curl -H 'A: 1' -H 'B: 2' -H 'C: 3' https://x.test",
        config.clone(),
    )
    .unwrap_err();
    assert_eq!(err, Error::InvalidInvocation(InvalidInvocation::TooManyHeaders(2)));

    // Overwriting an existing header does not count against the limit.
    let req = parse_invocation_with_config(
        "curl -H 'A: 1' -H 'B: 2' -H 'A: 3' https://x.test",
        config,
    )
    .unwrap();
    assert_eq!(req.headers().len(), 2);
}

// =========================================================================
// Tokenizer integration and determinism
// =========================================================================

#[test]
fn multiline_command() {
    let input = "curl 'https://x.test/api' \\\n  -H 'Accept: application/json' \\\n  --data-raw '{\"q\": \"a b\"}'";
    let req = parse_invocation(input).unwrap();
    assert_eq!(req.url(), "https://x.test/api");
    assert_eq!(req.body(), Some(r#"{"q": "a b"}"#));
}

#[test]
fn unterminated_quote_does_not_fail() {
    let req = parse_invocation("curl https://x.test -d 'unterminated body").unwrap();
    assert_eq!(req.body(), Some("unterminated body"));
}

#[test]
fn parse_tokens_matches_parse() {
    let input = r#"curl -X POST -H "A: b" -d 'x y' https://x.test"#;
    let parser = Parser::new();
    assert_eq!(
        parser.parse_tokens(tokenize(input)).unwrap(),
        parser.parse(input).unwrap()
    );
}

#[test]
fn parsing_is_deterministic() {
    let inputs = [
        "curl https://x.test",
        r#"curl -d '{"a":1}' https://x.test"#,
        "curl -H 'B: 2' -H 'A: 1' -XPUT --url https://x.test -sS",
        r#"curl --json '[1,2]' -A ua https://x.test -G"#,
    ];
    for input in inputs {
        let first = Parser::new().parse(input).unwrap();
        for _ in 0..3 {
            assert_eq!(Parser::new().parse(input).unwrap(), first, "input: {input}");
        }
    }
}
