use atrium::files::resolver::{PathResolver, ResolvedTarget};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_ROOT: AtomicU32 = AtomicU32::new(0);

/// Creates a unique scratch directory to act as a document root.
fn temp_root(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "atrium-resolver-{}-{}-{}",
        name,
        std::process::id(),
        NEXT_ROOT.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn test_resolver_rejects_nonexistent_root() {
    assert!(PathResolver::new(std::path::Path::new("/definitely/not/here")).is_err());
}

#[tokio::test]
async fn test_resolve_existing_file() {
    let root = temp_root("file");
    std::fs::write(root.join("hello.txt"), b"hi").unwrap();

    let resolver = PathResolver::new(&root).unwrap();
    let resolved = resolver.resolve("/hello.txt").await;

    assert_eq!(
        resolved,
        ResolvedTarget::Path(resolver.root().join("hello.txt"))
    );
}

#[tokio::test]
async fn test_resolve_root_itself() {
    let root = temp_root("rootdir");

    let resolver = PathResolver::new(&root).unwrap();
    let resolved = resolver.resolve("/").await;

    assert_eq!(resolved, ResolvedTarget::Path(resolver.root().to_path_buf()));
}

#[tokio::test]
async fn test_resolve_strips_query_string() {
    let root = temp_root("query");
    std::fs::write(root.join("style.css"), b"body{}").unwrap();

    let resolver = PathResolver::new(&root).unwrap();
    let resolved = resolver.resolve("/style.css?v=2&theme=dark").await;

    assert_eq!(
        resolved,
        ResolvedTarget::Path(resolver.root().join("style.css"))
    );
}

#[tokio::test]
async fn test_resolve_percent_decodes_path() {
    let root = temp_root("decode");
    std::fs::write(root.join("hello world.txt"), b"hi").unwrap();

    let resolver = PathResolver::new(&root).unwrap();
    let resolved = resolver.resolve("/hello%20world.txt").await;

    assert_eq!(
        resolved,
        ResolvedTarget::Path(resolver.root().join("hello world.txt"))
    );
}

#[tokio::test]
async fn test_resolve_rejects_missing_path() {
    let root = temp_root("missing");

    let resolver = PathResolver::new(&root).unwrap();
    assert_eq!(resolver.resolve("/missing.txt").await, ResolvedTarget::Rejected);
}

#[tokio::test]
async fn test_resolve_rejects_dotdot_escape() {
    let root = temp_root("dotdot");

    let resolver = PathResolver::new(&root).unwrap();
    // /etc/passwd exists on the host, so only the containment check stands
    // between the request and it.
    assert_eq!(
        resolver.resolve("/../../../../etc/passwd").await,
        ResolvedTarget::Rejected
    );
}

#[tokio::test]
async fn test_resolve_rejects_percent_encoded_escape() {
    let root = temp_root("encdot");

    let resolver = PathResolver::new(&root).unwrap();
    assert_eq!(
        resolver.resolve("/%2e%2e/%2e%2e/%2e%2e/%2e%2e/etc/passwd").await,
        ResolvedTarget::Rejected
    );
}

#[tokio::test]
async fn test_resolve_rejects_sibling_with_shared_prefix() {
    // root `<base>/www` must not admit `<base>/wwwevil`, which a raw
    // string-prefix comparison would accept.
    let base = temp_root("sibling");
    let root = base.join("www");
    let evil = base.join("wwwevil");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::create_dir_all(&evil).unwrap();
    std::fs::write(evil.join("secret.txt"), b"secret").unwrap();

    let resolver = PathResolver::new(&root).unwrap();
    assert_eq!(
        resolver.resolve("/../wwwevil/secret.txt").await,
        ResolvedTarget::Rejected
    );
}

#[tokio::test]
async fn test_resolve_rejects_symlink_escaping_root() {
    let base = temp_root("symlink");
    let root = base.join("www");
    let outside = base.join("outside");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::create_dir_all(&outside).unwrap();
    std::fs::write(outside.join("secret.txt"), b"secret").unwrap();
    std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

    let resolver = PathResolver::new(&root).unwrap();
    assert_eq!(
        resolver.resolve("/link/secret.txt").await,
        ResolvedTarget::Rejected
    );
}

#[tokio::test]
async fn test_resolve_nested_path_within_root() {
    let root = temp_root("nested");
    std::fs::create_dir_all(root.join("a/b")).unwrap();
    std::fs::write(root.join("a/b/c.txt"), b"deep").unwrap();

    let resolver = PathResolver::new(&root).unwrap();
    let resolved = resolver.resolve("/a/b/c.txt").await;

    assert_eq!(
        resolved,
        ResolvedTarget::Path(resolver.root().join("a/b/c.txt"))
    );
}

#[tokio::test]
async fn test_resolve_dotdot_that_stays_inside_root() {
    let root = temp_root("inside");
    std::fs::create_dir_all(root.join("sub")).unwrap();
    std::fs::write(root.join("top.txt"), b"top").unwrap();

    let resolver = PathResolver::new(&root).unwrap();
    let resolved = resolver.resolve("/sub/../top.txt").await;

    assert_eq!(resolved, ResolvedTarget::Path(resolver.root().join("top.txt")));
}

#[tokio::test]
async fn test_resolve_invalid_utf8_decoding_falls_back_to_raw() {
    // %FF decodes to a lone 0xFF byte, which is not valid UTF-8; the
    // resolver falls back to the undecoded string, which names no file.
    let root = temp_root("badutf8");

    let resolver = PathResolver::new(&root).unwrap();
    assert_eq!(resolver.resolve("/%FF").await, ResolvedTarget::Rejected);
}
