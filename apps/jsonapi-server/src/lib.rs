//! HTTP host for the JSON:API example: router assembly, request ids and
//! graceful shutdown. The binary in `main.rs` only wires configuration.

pub mod request_id;
pub mod server;
pub mod shutdown;
