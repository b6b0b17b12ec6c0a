pub mod cache;
pub mod config;
pub mod core;
pub mod error;
pub mod providers;

pub use config::StratusConfig;
pub use error::{Result, StratusError};
