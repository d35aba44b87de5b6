pub mod aggregator;
pub mod discord;
pub mod http;

mod config;
pub use config::Config;

mod error;
pub use error::{Error, Result};
