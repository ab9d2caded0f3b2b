use crate::error::ScribePrepError;
use digest::Digest;
use md5::Md5;
use sha1::Sha1;
use sha2::Sha256;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Verification failed: expected {}, got {}",
        hex::encode(.expected),
        hex::encode(.actual)
    )]
    VerificationFailed { expected: Vec<u8>, actual: Vec<u8> },
}

/// Expected content digest for a prebuilt artifact, parsed from the
/// `"<algorithm>:<hex>"` form used in the configuration file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArtifactDigest {
    Md5(Vec<u8>),
    Sha1(Vec<u8>),
    Sha256(Vec<u8>),
}

impl ArtifactDigest {
    pub fn parse(spec: &str) -> Result<Self, ScribePrepError> {
        let (algorithm, value) =
            spec.split_once(':')
                .ok_or_else(|| ScribePrepError::InvalidDigest {
                    digest: spec.to_string(),
                    reason: "expected '<algorithm>:<hex>'".to_string(),
                })?;

        let bytes = hex::decode(value).map_err(|e| ScribePrepError::InvalidDigest {
            digest: spec.to_string(),
            reason: e.to_string(),
        })?;

        let expected_len = match algorithm {
            "md5" => 16,
            "sha1" => 20,
            "sha256" => 32,
            _ => {
                return Err(ScribePrepError::InvalidDigest {
                    digest: spec.to_string(),
                    reason: format!("unsupported algorithm '{algorithm}'"),
                });
            }
        };
        if bytes.len() != expected_len {
            return Err(ScribePrepError::InvalidDigest {
                digest: spec.to_string(),
                reason: format!(
                    "expected {} hex bytes for {}, got {}",
                    expected_len,
                    algorithm,
                    bytes.len()
                ),
            });
        }

        Ok(match algorithm {
            "md5" => Self::Md5(bytes),
            "sha1" => Self::Sha1(bytes),
            _ => Self::Sha256(bytes),
        })
    }

    pub fn digest_hex(&self) -> String {
        match self {
            Self::Md5(bytes) | Self::Sha1(bytes) | Self::Sha256(bytes) => hex::encode(bytes),
        }
    }
}

enum DigestHasher {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
}

/// Streaming hasher that checks accumulated content against an expected
/// digest once the stream is complete.
pub struct DigestVerifier {
    hasher: DigestHasher,
    expected_digest: Vec<u8>,
}

impl DigestVerifier {
    #[inline]
    pub fn new(artifact_digest: ArtifactDigest) -> Self {
        match artifact_digest {
            ArtifactDigest::Md5(expected_digest) => Self {
                hasher: DigestHasher::Md5(Md5::new()),
                expected_digest,
            },
            ArtifactDigest::Sha1(expected_digest) => Self {
                hasher: DigestHasher::Sha1(Sha1::new()),
                expected_digest,
            },
            ArtifactDigest::Sha256(expected_digest) => Self {
                hasher: DigestHasher::Sha256(Sha256::new()),
                expected_digest,
            },
        }
    }

    #[inline]
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        match &mut self.hasher {
            DigestHasher::Md5(digest) => Digest::update(digest, data.as_ref()),
            DigestHasher::Sha1(digest) => Digest::update(digest, data.as_ref()),
            DigestHasher::Sha256(digest) => Digest::update(digest, data.as_ref()),
        };
    }

    pub fn verify(self) -> Result<(), VerificationError> {
        let actual_digest = match self.hasher {
            DigestHasher::Md5(digest) => digest.finalize().to_vec(),
            DigestHasher::Sha1(digest) => digest.finalize().to_vec(),
            DigestHasher::Sha256(digest) => digest.finalize().to_vec(),
        };

        if actual_digest == self.expected_digest {
            Ok(())
        } else {
            Err(VerificationError::VerificationFailed {
                expected: self.expected_digest,
                actual: actual_digest,
            })
        }
    }
}

/// Stream-hash a file on disk and fail with the expected/actual digests if
/// the content does not match.
pub async fn verify_file(path: &Path, expected: &ArtifactDigest) -> Result<(), ScribePrepError> {
    let mut verifier = DigestVerifier::new(expected.clone());

    let file = tokio::fs::File::open(path).await?;
    let mut reader = tokio::io::BufReader::new(file);
    let mut buffer = vec![0u8; 65536];

    loop {
        let bytes_read = tokio::io::AsyncReadExt::read(&mut reader, &mut buffer).await?;
        if bytes_read == 0 {
            break;
        }
        verifier.update(&buffer[..bytes_read]);
    }

    verifier
        .verify()
        .map_err(|source| ScribePrepError::ArtifactVerification {
            path: path.to_path_buf(),
            source,
        })
}

/// Pre-download check variant of [`verify_file`]: a digest mismatch is an
/// answer, not an error, so a truncated earlier download is simply reported
/// as not matching.
pub async fn hash_file_matches(
    path: &Path,
    expected: &ArtifactDigest,
) -> Result<bool, ScribePrepError> {
    match verify_file(path, expected).await {
        Ok(()) => Ok(true),
        Err(ScribePrepError::ArtifactVerification { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}
