//! MCP stdio server for the Portal da Transparência
//!
//! Manual implementation of the Model Context Protocol over stdin/stdout.
//! No async runtime; the server blocks on one request at a time.

pub mod framing;
pub mod server;
pub mod tools;
pub mod types;
