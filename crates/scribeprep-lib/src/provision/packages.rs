use crate::config::ProvisionConfig;
use crate::error::ScribePrepError;
use std::future::Future;
use std::process::ExitStatus;
use tracing::info;

/// Seam over the host package manager so the install sequence can be
/// exercised without mutating the ambient package environment.
pub trait Installer {
    fn install(
        &self,
        program: &str,
        args: &[String],
    ) -> impl Future<Output = Result<ExitStatus, ScribePrepError>> + Send;
}

/// Production installer: spawns the configured package manager with
/// inherited stdio and waits for it to exit.
pub struct SystemInstaller;

impl Installer for SystemInstaller {
    async fn install(&self, program: &str, args: &[String]) -> Result<ExitStatus, ScribePrepError> {
        tokio::process::Command::new(program)
            .args(args)
            .status()
            .await
            .map_err(|e| ScribePrepError::InstallerSpawn {
                command: program.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Invoke the package manager once per configured group, in declared order.
/// The first non-zero exit aborts the sequence; no rollback is attempted and
/// idempotence is delegated to the package manager itself.
pub async fn install_package_groups<I: Installer>(
    installer: &I,
    provision: &ProvisionConfig,
) -> Result<(), ScribePrepError> {
    for group in &provision.package_groups {
        info!(group = %group.name, "Installing package group");

        let mut args = provision.install_subcommand.clone();
        args.extend(group.args.iter().cloned());

        let status = installer.install(&provision.package_manager, &args).await?;
        if !status.success() {
            return Err(ScribePrepError::PackageInstall {
                group: group.name.clone(),
                status: status.code().unwrap_or(-1),
            });
        }
    }

    info!(
        groups = provision.package_groups.len(),
        "All package groups installed"
    );
    Ok(())
}
