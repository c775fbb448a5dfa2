/// A parsed HTTP request, kept as close to the wire bytes as possible.
///
/// Tokens are decoded byte-for-byte (Latin-1), never as UTF-8: header and
/// request-line bytes are not guaranteed to be valid UTF-8 and must
/// round-trip unchanged. Headers are carried as raw lines and never
/// interpreted; the server ignores them.
#[derive(Debug, Clone)]
pub struct Request {
    /// Raw method token from the request line, case preserved.
    pub method: String,
    /// Raw request target: path plus optional query string, still
    /// percent-encoded.
    pub target: String,
    /// Protocol version token (typically "HTTP/1.1"), unvalidated.
    pub version: String,
    /// Raw header lines, read but not parsed.
    pub headers: Vec<String>,
}

impl Request {
    /// Whether the request method is GET, matched case-insensitively
    /// (`get` and `Get` are accepted).
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }
}
