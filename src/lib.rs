//! Counter Backend - Local HTTP service for a desktop shell
//!
//! A Rust application providing:
//! - Loopback HTTP server exposing a shared integer counter
//! - Increment / reset mutations over plain JSON routes
//! - Permissive CORS so a desktop-shell process on another origin can call it
//! - A shutdown route that exits the process after the response flushes

pub mod api;
pub mod config;
pub mod server;
pub mod shutdown;
pub mod state;

pub use config::AppConfig;
pub use shutdown::{shutdown_channel, ShutdownHandle, ShutdownListener};
pub use state::{create_shared_counter, Counter, SharedCounter};

/// Application result type
pub type Result<T> = anyhow::Result<T>;
