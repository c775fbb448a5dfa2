use crate::http::request::Request;
use std::io;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::timeout;

/// Result of reading one request off a connection.
#[derive(Debug)]
pub enum RequestOutcome {
    /// The peer closed the stream before sending a request line. No
    /// response is owed.
    Empty,
    /// A request line arrived but had fewer than 3 whitespace-separated
    /// tokens. The handler answers 400.
    Malformed,
    /// A well-formed request line (method, target, version) followed by
    /// zero or more header lines.
    Request(Request),
}

/// Reads a single request: the request line, then header lines until a
/// blank line or end of stream (both end the headers; a truncated header
/// block is not an error).
///
/// `idle` applies per line read: a read fails with
/// [`io::ErrorKind::TimedOut`] only when no complete line arrives within
/// the window, so a slow but active client is never cut off. I/O errors
/// propagate; the caller abandons the connection on them.
pub async fn read_request<R>(reader: &mut R, idle: Duration) -> io::Result<RequestOutcome>
where
    R: AsyncBufRead + Unpin,
{
    let Some(line) = read_line(reader, idle).await? else {
        return Ok(RequestOutcome::Empty);
    };

    let mut tokens = line
        .split(|b: &u8| b.is_ascii_whitespace())
        .filter(|t| !t.is_empty());

    let (Some(method), Some(target), Some(version)) =
        (tokens.next(), tokens.next(), tokens.next())
    else {
        // A 400 is owed. Drain the header block first (best-effort) so
        // closing the socket does not discard the response while unread
        // bytes sit in the receive queue.
        let _ = read_headers(reader, idle).await;
        return Ok(RequestOutcome::Malformed);
    };

    let request = Request {
        method: latin1(method),
        target: latin1(target),
        version: latin1(version),
        headers: read_headers(reader, idle).await?,
    };

    Ok(RequestOutcome::Request(request))
}

async fn read_headers<R>(reader: &mut R, idle: Duration) -> io::Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut headers = Vec::new();

    while let Some(line) = read_line(reader, idle).await? {
        if line.is_empty() {
            break;
        }
        headers.push(latin1(&line));
    }

    Ok(headers)
}

/// Reads one line, stripping the trailing newline (CRLF or bare LF).
/// Returns `None` at end of stream. Blocks until a line is available or
/// `idle` elapses.
async fn read_line<R>(reader: &mut R, idle: Duration) -> io::Result<Option<Vec<u8>>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = timeout(idle, reader.read_until(b'\n', &mut buf))
        .await
        .map_err(|_| {
            io::Error::new(io::ErrorKind::TimedOut, "idle timeout while reading request")
        })??;

    if n == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    Ok(Some(buf))
}

/// One char per byte. HTTP bytes are not guaranteed to be UTF-8, so tokens
/// are mapped 1:1 and round-trip unchanged.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
