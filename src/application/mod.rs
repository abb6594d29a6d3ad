pub mod app;
pub mod cli;
pub mod config;
pub mod server;

pub use app::*;
pub use cli::*;
pub use config::*;
