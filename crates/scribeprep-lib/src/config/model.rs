use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One package-manager invocation. `args` is passed verbatim after the
/// install subcommand, so version pins and flags like `--upgrade` live here.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PackageGroup {
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArtifactDef {
    pub filename: String,
    pub remote_id: String,
    /// Optional `"<algorithm>:<hex>"` content digest. When absent, presence
    /// of the file on disk is the only skip check.
    #[serde(default)]
    pub digest: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArtifactsConfig {
    /// Prefix the remote id is appended to, forming the full download URL.
    pub base_url: String,
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,
    pub files: Vec<ArtifactDef>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProvisionConfig {
    pub package_manager: String,
    #[serde(default = "default_install_subcommand")]
    pub install_subcommand: Vec<String>,
    pub package_groups: Vec<PackageGroup>,
    pub artifacts: ArtifactsConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub reload: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            reload: false,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RuntimeEnvOverrides {
    #[serde(default)]
    pub ffmpeg_binary: Option<String>,
    #[serde(default)]
    pub ffprobe_binary: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub provision: ProvisionConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub runtime_env: RuntimeEnvOverrides,
}

fn default_target_dir() -> PathBuf {
    PathBuf::from("app/bin")
}

fn default_install_subcommand() -> Vec<String> {
    vec!["install".to_string()]
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    7860
}
