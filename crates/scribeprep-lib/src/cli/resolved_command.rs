use crate::bootstrap::{RuntimeEnv, ServeOptions};
use crate::cli::args::Command;
use crate::cli::params::{ProvisionParams, ServeParams};
use crate::config::load_config;
use crate::error::ScribePrepError;
use crate::verification::ArtifactDigest;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Provision(ProvisionParams),
    Serve(ServeParams),
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, ScribePrepError> {
    match command {
        Command::Provision {
            config_path,
            bin_dir,
            skip_packages,
            skip_artifacts,
        } => {
            let app_config = load_config(&config_path)?;
            let mut provision = app_config.provision;

            if let Some(bin_dir) = bin_dir {
                provision.artifacts.target_dir = PathBuf::from(bin_dir);
            }

            let no_packages = skip_packages || provision.package_groups.is_empty();
            let no_artifacts = skip_artifacts || provision.artifacts.files.is_empty();
            if no_packages && no_artifacts {
                return Err(ScribePrepError::ConfigValidation {
                    details: "Nothing to provision: no package groups and no artifacts to fetch."
                        .to_string(),
                });
            }

            if provision.package_manager.trim().is_empty() {
                return Err(ScribePrepError::ConfigValidation {
                    details: "provision.package_manager must not be empty.".to_string(),
                });
            }

            // Surface malformed digest strings at resolution time rather than
            // mid-download.
            for artifact in &provision.artifacts.files {
                if let Some(digest) = &artifact.digest {
                    ArtifactDigest::parse(digest)?;
                }
            }

            Ok(ResolvedCommand::Provision(ProvisionParams {
                provision,
                skip_packages,
                skip_artifacts,
            }))
        }
        Command::Serve {
            config_path,
            host,
            port,
        } => {
            let app_config = load_config(&config_path)?;
            let server = app_config.server;

            if server.reload {
                return Err(ScribePrepError::ConfigValidation {
                    details: "server.reload is not supported; hot reload is always disabled."
                        .to_string(),
                });
            }

            let options = ServeOptions {
                host: host.unwrap_or(server.host),
                port: port.unwrap_or(server.port),
                reload: false,
            };

            if options.host.trim().is_empty() {
                return Err(ScribePrepError::CliArgumentValidation {
                    details: "Bind address must not be empty. Configure server.host or pass --host."
                        .to_string(),
                });
            }

            Ok(ResolvedCommand::Serve(ServeParams {
                runtime_env: RuntimeEnv::from_overrides(&app_config.runtime_env),
                options,
            }))
        }
    }
}
