use std::time::{Duration, SystemTime};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::http::response::{Body, Response};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Chunk size for streaming file bodies.
const BUFFER_SIZE: usize = 8192;

/// Serializes a response onto a connection's write side.
///
/// The header block is fixed: `Date` (RFC 1123, GMT, regenerated per
/// response), `Server`, `Content-Type`, `Content-Length`, and
/// `Connection: close`, in that order, each line CRLF-terminated, with a
/// blank line before the body.
pub struct ResponseWriter<'a> {
    response: &'a Response,
    server_name: &'a str,
}

impl<'a> ResponseWriter<'a> {
    pub fn new(response: &'a Response, server_name: &'a str) -> Self {
        Self {
            response,
            server_name,
        }
    }

    /// Serializes the status line and header block.
    ///
    /// Note: This method is made public for integration testing purposes
    pub fn serialize_head(&self) -> Vec<u8> {
        let head = format!(
            "{} {} {}\r\n\
             Date: {}\r\n\
             Server: {}\r\n\
             Content-Type: {}\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n",
            HTTP_VERSION,
            self.response.status.as_u16(),
            self.response.status.reason_phrase(),
            httpdate::fmt_http_date(SystemTime::now()),
            self.server_name,
            self.response.content_type,
            self.response.content_length(),
        );

        head.into_bytes()
    }

    /// Writes headers and body. Once the head is on the wire the declared
    /// length cannot be un-sent, so any failure after that point is
    /// unrecoverable for this response and surfaces as an error; the caller
    /// closes the connection either way.
    ///
    /// `idle` bounds each individual write, not the transfer as a whole: a
    /// peer that keeps draining the socket can take arbitrarily long on a
    /// large body, while one that stops reading is abandoned once a single
    /// chunk fails to go out within the window.
    pub async fn write_to_stream<W>(&self, stream: &mut W, idle: Duration) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        write_all_idle(stream, &self.serialize_head(), idle).await?;

        match &self.response.body {
            Body::Text(text) => write_all_idle(stream, text.as_bytes(), idle).await?,
            Body::File { path, len } => stream_file(stream, path, *len, idle).await?,
        }

        timeout(idle, stream.flush())
            .await
            .map_err(|_| anyhow::anyhow!("idle timeout while flushing response"))??;
        Ok(())
    }
}

/// Copies a file to the stream in fixed-size chunks, writing at most `len`
/// bytes so the body never exceeds the promised `Content-Length`. Each
/// chunk write runs under the idle timeout.
async fn stream_file<W>(
    stream: &mut W,
    path: &std::path::Path,
    len: u64,
    idle: Duration,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut file = File::open(path).await?;
    let mut buf = [0u8; BUFFER_SIZE];
    let mut remaining = len;

    while remaining > 0 {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            // File shrank under us; the headers already promised more.
            anyhow::bail!("file truncated while streaming: {}", path.display());
        }

        let take = (n as u64).min(remaining) as usize;
        write_all_idle(stream, &buf[..take], idle).await?;
        remaining -= take as u64;
    }

    Ok(())
}

/// One write under the idle timeout: the peer must accept these bytes
/// within `idle` or the transfer is abandoned.
async fn write_all_idle<W>(stream: &mut W, bytes: &[u8], idle: Duration) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    timeout(idle, stream.write_all(bytes))
        .await
        .map_err(|_| anyhow::anyhow!("idle timeout while writing response"))??;
    Ok(())
}
