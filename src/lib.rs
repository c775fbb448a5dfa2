//! Atrium - Minimal Static File Server
//!
//! Core library for serving files out of a restricted document root over
//! HTTP/1.1, one GET request per connection.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
