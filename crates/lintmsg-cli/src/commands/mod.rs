//! Subcommand implementations.

pub mod classifications;
pub mod detect;
pub mod extract;
pub mod init;
pub mod render;
