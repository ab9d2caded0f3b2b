mod args;
mod params;
mod provision;
mod resolved_command;
mod serve;

pub use args::{Args, Command, parse_args};
pub use params::{ProvisionParams, ServeParams};
pub use provision::run_provision;
pub use resolved_command::{ResolvedCommand, resolve_command};
pub use serve::{run_serve, run_serve_with};
