use crate::services::{lookup_digest, OutputKind, OutputTarget};
use anyhow::Result;
use std::path::PathBuf;

/// Execute lookup command. Returns whether the digest was found
pub async fn execute_lookup(digest: &str, output: PathBuf, use_database: bool) -> Result<bool> {
    let target = OutputTarget::new(output, OutputKind::from_use_database(use_database));

    match lookup_digest(&target, digest).await? {
        Some(word) => {
            println!("🔓 {digest} -> {word}");
            Ok(true)
        }
        None => {
            println!("🔒 {digest} was not found in {}", target.path().display());
            Ok(false)
        }
    }
}
