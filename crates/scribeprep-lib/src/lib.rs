pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod provision;
pub mod verification;

pub use config::Config;
pub use error::ScribePrepError;
