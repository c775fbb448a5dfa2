//! Connection dispatch: the listening socket, the accept loop, and the
//! bounded pool of connection handlers.

pub mod listener;
