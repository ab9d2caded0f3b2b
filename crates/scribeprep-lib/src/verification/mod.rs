mod digest;

pub use digest::{ArtifactDigest, DigestVerifier, VerificationError, hash_file_matches, verify_file};
