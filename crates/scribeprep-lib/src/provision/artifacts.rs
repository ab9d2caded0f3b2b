use crate::config::ArtifactsConfig;
use crate::error::ScribePrepError;
use crate::verification::{ArtifactDigest, hash_file_matches};
use eyre::{Result, WrapErr};
use futures::StreamExt;
use opendal::Operator;
use opendal::services::Http;
use std::future::Future;
use std::path::Path;
use tracing::{debug, info};

/// Seam over the download transport so the fetch sequence can be exercised
/// without network access.
pub trait Fetcher {
    fn fetch(
        &self,
        url: &str,
        output_path: &Path,
    ) -> impl Future<Output = Result<(), ScribePrepError>> + Send;
}

fn build_http_operator(base_url: &str) -> Result<Operator> {
    // Endpoint is the scheme://host part; relative paths are fetched below it.
    let builder = Http::default().endpoint(base_url);
    let op = Operator::new(builder)?.finish();
    Ok(op)
}

/// Production fetcher: streams the remote file to disk over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl HttpFetcher {
    async fn fetch_inner(&self, url: &str, output_path: &Path) -> Result<()> {
        let parsed = reqwest::Url::parse(url).wrap_err_with(|| format!("Invalid URL: {url}"))?;

        let file = tokio::fs::File::create(output_path).await.wrap_err_with(|| {
            format!("Failed to create output file: {}", output_path.display())
        })?;
        let mut writer = tokio::io::BufWriter::new(file);

        if parsed.query().is_some() {
            // Query-carrying URLs (the Drive-style `uc?id=<remote_id>` form)
            // go through reqwest directly: opendal folds the query into the
            // path and percent-encodes the '?', mangling the request target.
            let mut response = self
                .client
                .get(parsed)
                .send()
                .await
                .wrap_err_with(|| format!("Failed to request {url}"))?
                .error_for_status()
                .wrap_err_with(|| format!("Server rejected request for {url}"))?;

            while let Some(buffer) = response
                .chunk()
                .await
                .wrap_err_with(|| format!("Failed to read from {url}"))?
            {
                tokio::io::AsyncWriteExt::write_all(&mut writer, &buffer)
                    .await
                    .wrap_err_with(|| format!("Failed to write to {}", output_path.display()))?;
            }
        } else {
            let base_url = match parsed.port() {
                Some(port) => format!(
                    "{}://{}:{}",
                    parsed.scheme(),
                    parsed.host_str().unwrap_or(""),
                    port
                ),
                None => format!("{}://{}", parsed.scheme(), parsed.host_str().unwrap_or("")),
            };
            let op = build_http_operator(&base_url)?;

            let mut reader = op
                .reader(parsed.path())
                .await
                .wrap_err_with(|| format!("Failed to create reader for {url}"))?
                .into_stream(..)
                .await
                .wrap_err_with(|| format!("Failed to create reader for {url}"))?;

            while let Some(chunk) = reader.next().await {
                let buffer = chunk
                    .wrap_err_with(|| format!("Failed to read from {url}"))?
                    .to_bytes();
                tokio::io::AsyncWriteExt::write_all(&mut writer, &buffer)
                    .await
                    .wrap_err_with(|| format!("Failed to write to {}", output_path.display()))?;
            }
        }

        tokio::io::AsyncWriteExt::flush(&mut writer)
            .await
            .wrap_err_with(|| format!("Failed to flush {}", output_path.display()))?;

        Ok(())
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, output_path: &Path) -> Result<(), ScribePrepError> {
        self.fetch_inner(url, output_path)
            .await
            .map_err(|e| ScribePrepError::ArtifactDownload {
                filename: output_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                url: url.to_string(),
                reason: format!("{e:#}"),
            })
    }
}

/// Fetch the configured prebuilt artifacts into the target directory, one at
/// a time and in declared order. Files already on disk are skipped; when a
/// digest is configured, an existing file is stream-hashed first and
/// re-downloaded if the content does not match. The first failure aborts the
/// remaining files.
pub async fn fetch_artifacts<F: Fetcher>(
    fetcher: &F,
    artifacts: &ArtifactsConfig,
) -> Result<(), ScribePrepError> {
    std::fs::create_dir_all(&artifacts.target_dir).map_err(|e| {
        ScribePrepError::DirectoryCreation {
            path: artifacts.target_dir.clone(),
            reason: e.to_string(),
        }
    })?;

    for artifact in &artifacts.files {
        let output_path = artifacts.target_dir.join(&artifact.filename);
        let expected_digest = artifact
            .digest
            .as_deref()
            .map(ArtifactDigest::parse)
            .transpose()?;

        if output_path.exists() {
            match &expected_digest {
                None => {
                    info!(filename = %artifact.filename, "Artifact already exists, skipping");
                    continue;
                }
                Some(expected) => {
                    if hash_file_matches(&output_path, expected).await? {
                        debug!(
                            filename = %artifact.filename,
                            "Artifact exists with matching digest, skipping"
                        );
                        continue;
                    }
                    info!(
                        filename = %artifact.filename,
                        "Artifact exists with incorrect digest, deleting"
                    );
                    tokio::fs::remove_file(&output_path).await?;
                }
            }
        }

        let url = format!("{}{}", artifacts.base_url, artifact.remote_id);
        info!(filename = %artifact.filename, %url, "Downloading artifact");
        fetcher.fetch(&url, &output_path).await?;

        if let Some(expected) = &expected_digest {
            crate::verification::verify_file(&output_path, expected).await?;
            debug!(
                filename = %artifact.filename,
                digest = expected.digest_hex(),
                "Artifact digest verified"
            );
        }

        info!(
            filename = %artifact.filename,
            output = %output_path.display(),
            "Artifact downloaded"
        );
    }

    Ok(())
}
