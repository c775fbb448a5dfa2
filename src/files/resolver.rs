use anyhow::Context;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

/// Outcome of resolving a request target against the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// An absolute, canonicalized path guaranteed to be the document root
    /// itself or a descendant of it.
    Path(PathBuf),
    /// No such path exists, or the computed path escapes the root.
    Rejected,
}

/// Maps URL-encoded request paths to filesystem locations strictly
/// confined to the document root.
///
/// This is the confinement boundary of the server: nothing outside the
/// canonicalized root is ever handed back, and nothing past this boundary
/// throws. Traversal attempts, dangling paths, and canonicalization
/// failures all come back as [`ResolvedTarget::Rejected`].
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Canonicalizes the document root once up front so every containment
    /// comparison runs against a symlink-free absolute path.
    pub fn new(doc_root: &Path) -> anyhow::Result<Self> {
        let root = doc_root
            .canonicalize()
            .with_context(|| format!("cannot canonicalize document root {}", doc_root.display()))?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a raw request target (path plus optional query string).
    ///
    /// The query string is stripped, the path percent-decoded (best-effort:
    /// invalid UTF-8 falls back to the undecoded string rather than failing
    /// the request), a single leading `/` removed, and the remainder joined
    /// onto the root and canonicalized. The result is kept only if it still
    /// lies under the root.
    pub async fn resolve(&self, target: &str) -> ResolvedTarget {
        let path = target.split('?').next().unwrap_or("");

        let decoded = match percent_decode_str(path).decode_utf8() {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => path.to_string(),
        };

        let relative = decoded.strip_prefix('/').unwrap_or(&decoded);
        let candidate = self.root.join(relative);

        let Ok(canonical) = tokio::fs::canonicalize(&candidate).await else {
            return ResolvedTarget::Rejected;
        };

        // Component-wise containment: a sibling like /srv/wwwevil never
        // passes for root /srv/www.
        if canonical.starts_with(&self.root) {
            ResolvedTarget::Path(canonical)
        } else {
            ResolvedTarget::Rejected
        }
    }
}
