//! HTTP protocol implementation.
//!
//! This module implements the single-request HTTP/1.1 cycle used by the
//! server: every connection carries exactly one GET request and is closed
//! after the response (`Connection: close` on every reply).
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection handler implementing the
//!   request-response state machine
//! - **`parser`**: Reads the request line and headers off the socket
//! - **`request`**: Raw parsed request representation
//! - **`response`**: HTTP response representation with buffered or
//!   file-streamed bodies
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request line and headers
//!        └──────┬──────┘
//!               │ Request received (empty stream → Closed, nothing written)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve the target under the document root
//!        └──────┬───────────┘
//!               │ Response ready (200 / 400 / 404 / 501)
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send headers, then the body
//!        └──────┬───────────┘
//!               │ Always
//!               ▼
//!            Closed
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
