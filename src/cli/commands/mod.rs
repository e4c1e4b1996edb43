//! CLI command implementations

pub mod extract;
pub mod import;
pub mod init;
pub mod validate;

use crate::adapters::delimited::fingerprint;
use anyhow::Context;
use std::path::Path;

/// Reads a text input file, returning its contents and SHA-256 fingerprint
pub(crate) async fn read_input(path: &Path) -> anyhow::Result<(String, String)> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let digest = fingerprint(&bytes);
    let text = String::from_utf8_lossy(&bytes).into_owned();
    Ok((text, digest))
}
