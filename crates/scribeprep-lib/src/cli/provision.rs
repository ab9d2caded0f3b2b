use crate::cli::ProvisionParams;
use crate::error::ScribePrepError;
use crate::provision::{HttpFetcher, SystemInstaller, fetch_artifacts, install_package_groups};
use tracing::info;

pub async fn run_provision(params: ProvisionParams) -> Result<(), ScribePrepError> {
    let ProvisionParams {
        provision,
        skip_packages,
        skip_artifacts,
    } = params;

    if skip_packages {
        info!("Skipping package installation");
    } else {
        info!(
            manager = %provision.package_manager,
            groups = provision.package_groups.len(),
            "Installing package groups"
        );
        install_package_groups(&SystemInstaller, &provision).await?;
    }

    if skip_artifacts {
        info!("Skipping artifact downloads");
    } else {
        info!(
            target_dir = %provision.artifacts.target_dir.display(),
            files = provision.artifacts.files.len(),
            "Fetching prebuilt artifacts"
        );
        fetch_artifacts(&HttpFetcher::default(), &provision.artifacts).await?;
    }

    info!("Provisioning completed successfully");
    Ok(())
}
