use std::sync::Arc;
use std::time::Duration;

use tokio::io::BufReader;
use tokio::net::TcpStream;
use tracing::info;

use crate::config::Config;
use crate::files::resolver::{PathResolver, ResolvedTarget};
use crate::http::mime;
use crate::http::parser::{RequestOutcome, read_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Maximum time a single blocking socket operation (one line read, one
/// chunk write) may wait before the connection is forcibly closed. The
/// bound is per operation, so a slow client that keeps making progress is
/// never cut off mid-transfer.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Connection {
    stream: TcpStream,
    config: Arc<Config>,
    resolver: Arc<PathResolver>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(Response),
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, config: Arc<Config>, resolver: Arc<PathResolver>) -> Self {
        Self {
            stream,
            config,
            resolver,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection through parse, resolve, and respond, then
    /// closes it. Errors abandon whatever remained of the response; the
    /// socket is dropped (closed) on every path, success or failure.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let (rd, mut wr) = self.stream.split();
        let mut reader = BufReader::new(rd);

        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let outcome = read_request(&mut reader, IDLE_TIMEOUT).await?;

                    self.state = match outcome {
                        RequestOutcome::Empty => ConnectionState::Closed,
                        RequestOutcome::Malformed => {
                            ConnectionState::Writing(Response::bad_request())
                        }
                        RequestOutcome::Request(req) => ConnectionState::Processing(req),
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = if req.is_get() {
                        respond_to_get(&self.resolver, &req.target).await
                    } else {
                        Response::not_implemented()
                    };

                    info!(
                        method = %req.method,
                        target = %req.target,
                        status = response.status.as_u16(),
                        "Request handled"
                    );

                    self.state = ConnectionState::Writing(response);
                }

                ConnectionState::Writing(response) => {
                    let writer = ResponseWriter::new(&response, &self.config.server_name);
                    writer.write_to_stream(&mut wr, IDLE_TIMEOUT).await?;

                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }
}

/// Resolves a GET target to a response: a streamed file on success, 404 for
/// anything rejected, missing, or a directory without `index.html`.
async fn respond_to_get(resolver: &PathResolver, target: &str) -> Response {
    let path = match resolver.resolve(target).await {
        ResolvedTarget::Path(path) => path,
        ResolvedTarget::Rejected => return Response::not_found(),
    };

    let Ok(meta) = tokio::fs::metadata(&path).await else {
        return Response::not_found();
    };

    // Directory requests are served by their index.html, if present.
    let (path, meta) = if meta.is_dir() {
        let index = path.join("index.html");
        match tokio::fs::metadata(&index).await {
            Ok(index_meta) if index_meta.is_file() => (index, index_meta),
            _ => return Response::not_found(),
        }
    } else {
        (path, meta)
    };

    if !meta.is_file() {
        return Response::not_found();
    }

    let content_type = mime::content_type_for(&path);
    Response::file(path, meta.len(), content_type)
}
