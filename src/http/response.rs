use std::path::PathBuf;

/// HTTP status codes the server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use atrium::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

/// Where the response body comes from.
///
/// Error and status responses carry a short generated text buffered up
/// front; file responses are streamed from disk chunk by chunk, never held
/// in memory whole.
#[derive(Debug)]
pub enum Body {
    /// A generated UTF-8 body, fully buffered before headers are written.
    Text(String),
    /// A file streamed from disk. `len` is the file size at the time the
    /// response was built and is what `Content-Length` promises.
    File { path: PathBuf, len: u64 },
}

/// A complete HTTP response: status, content type, and a body source with
/// a length known before any body byte is written.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Body,
}

impl Response {
    /// Creates a 200 response streaming the given file.
    pub fn file(path: PathBuf, len: u64, content_type: &'static str) -> Self {
        Self {
            status: StatusCode::Ok,
            content_type,
            body: Body::File { path, len },
        }
    }

    /// Creates a 400 Bad Request response for a malformed request line.
    pub fn bad_request() -> Self {
        Self {
            status: StatusCode::BadRequest,
            content_type: "text/plain; charset=utf-8",
            body: Body::Text("400 Bad Request\n".to_string()),
        }
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NotFound,
            content_type: "text/html; charset=utf-8",
            body: Body::Text(
                "<html><body><h1>404 Not Found</h1></body></html>\n".to_string(),
            ),
        }
    }

    /// Creates a 501 Not Implemented response for non-GET methods.
    pub fn not_implemented() -> Self {
        Self {
            status: StatusCode::NotImplemented,
            content_type: "text/plain; charset=utf-8",
            body: Body::Text("501 Not Implemented\n".to_string()),
        }
    }

    /// Byte count the `Content-Length` header will declare.
    pub fn content_length(&self) -> u64 {
        match &self.body {
            Body::Text(text) => text.len() as u64,
            Body::File { len, .. } => *len,
        }
    }
}
