pub mod handshake;
pub mod operations;
