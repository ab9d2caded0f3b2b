mod loader;
mod model;

pub use loader::load_config;
pub use model::{
    ArtifactDef, ArtifactsConfig, Config, PackageGroup, ProvisionConfig, RuntimeEnvOverrides,
    ServerConfig,
};
