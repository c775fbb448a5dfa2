use anyhow::bail;
use std::path::PathBuf;

/// Worker count used when the argument is absent or unusable.
pub const DEFAULT_WORKERS: usize = 50;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub doc_root: PathBuf,
    pub workers: usize,
    pub server_name: String,
}

impl Config {
    /// Builds a config from positional CLI arguments:
    /// `<port> <document_root> [workers]`.
    ///
    /// The port must lie in [1, 65535] and the document root must be an
    /// existing directory. A missing or non-positive worker count falls back
    /// to [`DEFAULT_WORKERS`].
    pub fn from_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let Some(port_arg) = args.next() else {
            bail!("missing <port> argument");
        };
        let Some(root_arg) = args.next() else {
            bail!("missing <document_root> argument");
        };

        let port = match port_arg.parse::<u16>() {
            Ok(p) if p >= 1 => p,
            _ => bail!("invalid port: {port_arg}"),
        };

        let doc_root = PathBuf::from(&root_arg);
        if !doc_root.is_dir() {
            bail!("document root must be an existing directory: {root_arg}");
        }

        let workers = args
            .next()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_WORKERS);

        Ok(Self {
            port,
            doc_root,
            workers,
            server_name: format!("atrium/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn usage() -> &'static str {
        "Usage: atrium <port> <document_root> [workers]\n\
         Example: atrium 8080 ./www 50"
    }
}
