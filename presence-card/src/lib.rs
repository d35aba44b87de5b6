pub mod card;
pub mod controller;
pub mod fetcher;
pub mod preferences;

mod command;
pub use command::Command;

mod config;
pub use config::Config;

mod error;
pub use error::{Error, Result};
