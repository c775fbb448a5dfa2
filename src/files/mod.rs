//! Filesystem side of the server: mapping request targets onto files
//! confined to the document root.

pub mod resolver;

pub use resolver::{PathResolver, ResolvedTarget};
