mod artifacts;
mod packages;

pub use artifacts::{Fetcher, HttpFetcher, fetch_artifacts};
pub use packages::{Installer, SystemInstaller, install_package_groups};
