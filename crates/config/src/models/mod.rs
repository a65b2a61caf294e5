pub mod app_config;
pub mod client;
pub mod logging;
pub mod server;

pub use app_config::*;
pub use client::*;
pub use logging::*;
pub use server::*;
