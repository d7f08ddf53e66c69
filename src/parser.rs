use tracing::debug;

use crate::error::{Error, InvalidInvocation};
use crate::tokenizer::tokenize;
use crate::types::{Headers, ParsedInvocation, RequestDescriptor};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configurable limits for the invocation parser.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum length of the raw invocation in bytes (default: 64 KiB).
    pub max_input_len: usize,
    /// Maximum number of distinct headers (default: 128).
    pub max_headers: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_len: 64 * 1024,
            max_headers: 128,
        }
    }
}

// ---------------------------------------------------------------------------
// Flag table
// ---------------------------------------------------------------------------

/// What a recognised flag does with its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Method,
    Header,
    Data,
    DataUrlencode,
    Json,
    Url,
    UserAgent,
    Referer,
    Head,
    Get,
    /// Unsupported flag whose argument must be skipped along with it.
    IgnoredWithValue,
}

impl Flag {
    fn takes_value(self) -> bool {
        !matches!(self, Self::Head | Self::Get)
    }
}

fn lookup_flag(flag: &str) -> Option<Flag> {
    let kind = match flag {
        "-X" | "--request" => Flag::Method,
        "-H" | "--header" => Flag::Header,
        "-d" | "--data" | "--data-raw" | "--data-binary" | "--data-ascii" => Flag::Data,
        "--data-urlencode" => Flag::DataUrlencode,
        "--json" => Flag::Json,
        "--url" => Flag::Url,
        "-A" | "--user-agent" => Flag::UserAgent,
        "-e" | "--referer" => Flag::Referer,
        "-I" | "--head" => Flag::Head,
        "-G" | "--get" => Flag::Get,
        "-u" | "--user" | "-b" | "--cookie" | "-c" | "--cookie-jar" | "-x" | "--proxy"
        | "-U" | "--proxy-user" | "--proxy-header" | "--noproxy" | "--preproxy"
        | "--socks5" | "--socks5-hostname" | "-F" | "--form" | "--form-string" | "-o"
        | "--output" | "-T" | "--upload-file" | "-m" | "--max-time" | "--connect-timeout"
        | "-w" | "--write-out" | "-D" | "--dump-header" | "-E" | "--cert" | "--cert-type"
        | "--key" | "--key-type" | "--pass" | "--cacert" | "--capath" | "--ciphers"
        | "-r" | "--range" | "-C" | "--continue-at" | "-z" | "--time-cond" | "-K"
        | "--config" | "--retry" | "--retry-delay" | "--retry-max-time" | "--limit-rate"
        | "-Y" | "--speed-limit" | "-y" | "--speed-time" | "--max-redirs"
        | "--max-filesize" | "--resolve" | "--connect-to" | "--interface" | "--local-port"
        | "--dns-servers" | "--unix-socket" | "--abstract-unix-socket" | "--oauth2-bearer"
        | "--aws-sigv4" | "--request-target" | "--trace" | "--trace-ascii" | "--stderr" => {
            Flag::IgnoredWithValue
        }
        _ => return None,
    };
    Some(kind)
}

/// Split a short flag with an attached value (`-XPOST`) into its parts.
///
/// Only applies when the first letter names a value-taking short flag;
/// bundled switches such as `-sSL` are left alone.
fn split_attached(token: &str) -> Option<(&str, &str)> {
    if token.starts_with("--") || token.len() <= 2 || !token.is_char_boundary(2) {
        return None;
    }
    let (flag, value) = token.split_at(2);
    lookup_flag(flag)
        .filter(|kind| kind.takes_value())
        .map(|_| (flag, value))
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Turns a curl invocation into a [`RequestDescriptor`].
///
/// The parser holds only its configuration, so one instance can be shared
/// freely across threads.
///
/// ```rust
/// use curlgen::Parser;
///
/// let parsed = Parser::new()
///     .parse("curl -d 'a=1' https://x.test --compressed")
///     .unwrap();
/// assert_eq!(parsed.descriptor.method(), "POST");
/// assert_eq!(parsed.ignored, vec!["--compressed"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a parser with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom limits.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Tokenize and parse a raw invocation string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInvocation`] if the input is too long, does
    /// not start with `curl`, or names no URL.
    pub fn parse(&self, input: &str) -> Result<ParsedInvocation, Error> {
        if input.len() > self.config.max_input_len {
            return Err(InvalidInvocation::TooLong(self.config.max_input_len).into());
        }
        self.parse_tokens(tokenize(input))
    }

    /// Parse an already tokenized invocation.
    ///
    /// # Errors
    ///
    /// Same as [`Parser::parse`], minus the input length check.
    pub fn parse_tokens<I>(&self, tokens: I) -> Result<ParsedInvocation, Error>
    where
        I: IntoIterator<Item = String>,
    {
        let mut tokens = tokens.into_iter();

        let command = tokens.next().ok_or(InvalidInvocation::Empty)?;
        if !command.eq_ignore_ascii_case("curl") {
            return Err(InvalidInvocation::NotCurl(command).into());
        }

        let mut walk = Walk::new(&self.config);

        while let Some(token) = tokens.next() {
            if !token.starts_with('-') {
                walk.bare(token);
                continue;
            }

            let (flag, attached) = match split_attached(&token) {
                Some((flag, value)) => (flag, Some(value.to_string())),
                None => (token.as_str(), None),
            };

            let Some(kind) = lookup_flag(flag) else {
                walk.ignore(token);
                continue;
            };

            if !kind.takes_value() {
                walk.switch(kind);
                continue;
            }

            let Some(value) = attached.or_else(|| tokens.next()) else {
                debug!(flag = %token, "flag is missing its value");
                walk.ignore(token);
                continue;
            };

            if kind == Flag::IgnoredWithValue {
                walk.ignore(token);
                walk.ignore(value);
                continue;
            }

            walk.apply(kind, &token, value)?;
        }

        walk.finish()
    }
}

/// Mutable state of one left-to-right pass over the tokens.
struct Walk<'a> {
    config: &'a ParserConfig,
    explicit_method: Option<String>,
    url: Option<String>,
    headers: Headers,
    body: Option<String>,
    get: bool,
    ignored: Vec<String>,
}

impl<'a> Walk<'a> {
    fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            explicit_method: None,
            url: None,
            headers: Headers::new(),
            body: None,
            get: false,
            ignored: Vec::new(),
        }
    }

    fn bare(&mut self, token: String) {
        if self.url.as_deref().is_none_or(str::is_empty) && !token.is_empty() {
            self.url = Some(token);
        } else {
            self.ignore(token);
        }
    }

    fn ignore(&mut self, token: String) {
        debug!(%token, "ignoring unsupported curl argument");
        self.ignored.push(token);
    }

    fn switch(&mut self, kind: Flag) {
        match kind {
            Flag::Head => self.explicit_method = Some("HEAD".to_string()),
            Flag::Get => self.get = true,
            _ => {}
        }
    }

    fn apply(&mut self, kind: Flag, token: &str, value: String) -> Result<(), Error> {
        match kind {
            Flag::Method => self.explicit_method = Some(value),
            Flag::Header => match value.split_once(':') {
                Some((name, header_value)) => {
                    self.insert_header(name.trim(), header_value.trim())?;
                }
                None => {
                    self.ignore(token.to_string());
                    self.ignore(value);
                }
            },
            Flag::Data => self.body = Some(value),
            Flag::DataUrlencode => self.body = Some(urlencode_data(&value)),
            Flag::Json => {
                self.body = Some(value);
                for name in ["Content-Type", "Accept"] {
                    if !self.has_header(name) {
                        self.insert_header(name, "application/json")?;
                    }
                }
            }
            Flag::Url => self.url = Some(value),
            Flag::UserAgent => self.insert_header("User-Agent", &value)?,
            Flag::Referer => self.insert_header("Referer", &value)?,
            Flag::Head | Flag::Get | Flag::IgnoredWithValue => {}
        }
        Ok(())
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers.keys().any(|k| k.eq_ignore_ascii_case(name))
    }

    fn insert_header(&mut self, name: &str, value: &str) -> Result<(), Error> {
        if !self.headers.contains_key(name) && self.headers.len() >= self.config.max_headers {
            return Err(InvalidInvocation::TooManyHeaders(self.config.max_headers).into());
        }
        self.headers.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn finish(self) -> Result<ParsedInvocation, Error> {
        let mut url = self
            .url
            .filter(|u| !u.is_empty())
            .ok_or(InvalidInvocation::MissingUrl)?;
        let mut body = self.body;

        if self.get {
            if let Some(query) = body.take() {
                let separator = if url.contains('?') { '&' } else { '?' };
                url.push(separator);
                url.push_str(&query);
            }
        }

        let method = self.explicit_method.unwrap_or_else(|| {
            if body.is_some() {
                "POST".to_string()
            } else {
                "GET".to_string()
            }
        });

        let descriptor = RequestDescriptor::new(method, url, self.headers, body)?;
        debug!(
            method = descriptor.method(),
            url = descriptor.url(),
            headers = descriptor.headers().len(),
            ignored = self.ignored.len(),
            "parsed curl invocation"
        );

        Ok(ParsedInvocation {
            descriptor,
            ignored: self.ignored,
        })
    }
}

/// Encode a `--data-urlencode` argument the way curl does.
///
/// `name=content` encodes only `content`; `=content` and plain `content`
/// encode everything after the optional leading `=`.
fn urlencode_data(arg: &str) -> String {
    match arg.split_once('=') {
        Some((name, content)) if !name.is_empty() => format!("{name}={}", percent_encode(content)),
        Some((_, content)) => percent_encode(content),
        None => percent_encode(arg),
    }
}

/// Percent-encode with `%20` for spaces. The form serializer escapes a
/// literal `+` as `%2B`, so any `+` left in its output stands for a space.
fn percent_encode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
