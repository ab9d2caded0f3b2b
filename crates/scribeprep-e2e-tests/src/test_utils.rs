use eyre::Result;
use scribeprep_lib::config::{
    ArtifactDef, ArtifactsConfig, Config, PackageGroup, ProvisionConfig, RuntimeEnvOverrides,
    ServerConfig,
};
use scribeprep_lib::error::ScribePrepError;
use scribeprep_lib::provision::Fetcher;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn create_test_config(target_dir: &Path) -> Config {
    Config {
        provision: ProvisionConfig {
            package_manager: "pip".to_string(),
            install_subcommand: vec!["install".to_string()],
            package_groups: vec![
                PackageGroup {
                    name: "numpy".to_string(),
                    args: vec!["numpy==1.26.4".to_string()],
                },
                PackageGroup {
                    name: "torch".to_string(),
                    args: vec![
                        "--upgrade".to_string(),
                        "torch".to_string(),
                        "torchaudio".to_string(),
                        "faster-whisper".to_string(),
                    ],
                },
            ],
            artifacts: ArtifactsConfig {
                base_url: "https://drive.google.com/uc?id=".to_string(),
                target_dir: target_dir.to_path_buf(),
                files: vec![
                    ArtifactDef {
                        filename: "ffmpeg.exe".to_string(),
                        remote_id: "ffmpeg-remote-id".to_string(),
                        digest: None,
                    },
                    ArtifactDef {
                        filename: "ffplay.exe".to_string(),
                        remote_id: "ffplay-remote-id".to_string(),
                        digest: None,
                    },
                    ArtifactDef {
                        filename: "ffprobe.exe".to_string(),
                        remote_id: "ffprobe-remote-id".to_string(),
                        digest: None,
                    },
                ],
            },
        },
        server: ServerConfig::default(),
        runtime_env: RuntimeEnvOverrides::default(),
    }
}

/// Write a config file into a fresh temp dir, with the artifact target
/// directory pointing inside it.
pub fn setup_test_environment() -> Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;

    let config = create_test_config(&temp_dir.path().join("app").join("bin"));
    let config_path = temp_dir.path().join("scribeprep.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    Ok(temp_dir)
}

/// Fetcher stub that records requested URLs and writes a fixed payload in
/// place of the real download.
pub struct RecordingFetcher {
    pub fetched: Mutex<Vec<String>>,
    pub payload: Vec<u8>,
}

impl RecordingFetcher {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            fetched: Mutex::new(Vec::new()),
            payload: payload.into(),
        }
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl Fetcher for RecordingFetcher {
    async fn fetch(&self, url: &str, output_path: &Path) -> Result<(), ScribePrepError> {
        self.fetched.lock().unwrap().push(url.to_string());
        std::fs::write(output_path, &self.payload)?;
        Ok(())
    }
}

/// Fetcher stub that records the attempt, then fails it.
pub struct FailingFetcher {
    pub fetched: Mutex<Vec<String>>,
}

impl FailingFetcher {
    pub fn new() -> Self {
        Self {
            fetched: Mutex::new(Vec::new()),
        }
    }
}

impl Default for FailingFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for FailingFetcher {
    async fn fetch(&self, url: &str, output_path: &Path) -> Result<(), ScribePrepError> {
        self.fetched.lock().unwrap().push(url.to_string());
        Err(ScribePrepError::ArtifactDownload {
            filename: output_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            url: url.to_string(),
            reason: "simulated download failure".to_string(),
        })
    }
}
