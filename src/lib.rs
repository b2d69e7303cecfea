pub mod cli;
pub mod config;
pub mod degraded;
pub mod domain;
pub mod env;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod store;
pub mod ui;

pub use error::{Result, StampError};
