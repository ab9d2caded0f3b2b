mod env;
mod factory;
mod runner;
mod status;

pub use env::RuntimeEnv;
pub use factory::{AppFactory, Application, FnAppFactory};
pub use runner::{ServeOptions, run_app};
pub use status::{StatusApp, StatusAppFactory};
