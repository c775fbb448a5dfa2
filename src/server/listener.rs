use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::files::resolver::PathResolver;
use crate::http::connection::Connection;

/// Binds the configured port and serves until cancelled. Binding failure
/// (port already in use, insufficient privileges) is fatal and surfaces to
/// the operator; it is not retried.
pub async fn run(cfg: Config) -> anyhow::Result<()> {
    let addr = cfg.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Listening on {}", addr);
    info!("Document root: {}", cfg.doc_root.display());

    serve(listener, cfg).await
}

/// Accept loop over an already-bound listener.
///
/// Concurrency is bounded by a semaphore sized to the configured worker
/// count: a permit is acquired before each accept and held by the handler
/// task for the connection's whole lifetime, so at most `workers`
/// connections are in flight and a full pool backpressures the accept loop
/// instead of growing without limit.
///
/// Handlers live in a [`JoinSet`]; when this future is dropped (the
/// shutdown branch of main's `select!`) the set aborts every in-flight
/// handler. Stop is fast and best-effort, not a graceful drain.
pub async fn serve(listener: TcpListener, cfg: Config) -> anyhow::Result<()> {
    let resolver = Arc::new(PathResolver::new(&cfg.doc_root)?);
    let cfg = Arc::new(cfg);
    let permits = Arc::new(Semaphore::new(cfg.workers));
    let mut handlers: JoinSet<()> = JoinSet::new();

    loop {
        // Reap finished handlers so the set does not accumulate results.
        while let Some(finished) = handlers.try_join_next() {
            if let Err(e) = finished {
                if e.is_panic() {
                    warn!("Connection handler panicked: {}", e);
                }
            }
        }

        let permit = permits.clone().acquire_owned().await?;
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let cfg = Arc::clone(&cfg);
        let resolver = Arc::clone(&resolver);
        handlers.spawn(async move {
            let conn = Connection::new(socket, cfg, resolver);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {}", peer, e);
            }
            drop(permit);
        });
    }
}
