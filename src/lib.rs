pub mod cli;
pub mod error;
pub mod handler;
pub mod macros;
pub mod media_service;
pub mod server;
pub mod tools;
