use crate::bootstrap::{RuntimeEnv, ServeOptions};
use crate::config::ProvisionConfig;

#[derive(Debug, Clone)]
pub struct ProvisionParams {
    pub provision: ProvisionConfig,
    pub skip_packages: bool,
    pub skip_artifacts: bool,
}

#[derive(Debug, Clone)]
pub struct ServeParams {
    pub runtime_env: RuntimeEnv,
    pub options: ServeOptions,
}
