//! Common utilities shared by all subcommands

pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};
