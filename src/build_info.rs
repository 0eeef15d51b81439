//! Version information shown in the dashboard footer.
//!
//! Resolved once at startup by the caller and passed along as a plain value.

use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

const UNKNOWN: &str = "unknown";
const SHORT_HASH_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    /// Crate version.
    pub version: String,
    /// Abbreviated commit of the checkout, or `"unknown"`.
    pub git_hash: String,
}

impl BuildInfo {
    /// Reads the current commit from the git checkout at `repo_dir`.
    ///
    /// Handles detached heads, loose refs and `packed-refs`. Any failure gives a
    /// hash of `"unknown"` rather than an error.
    pub fn detect(repo_dir: &Path) -> Self {
        let git_hash = head_commit(&repo_dir.join(".git"))
            .map(|hash| hash.chars().take(SHORT_HASH_LEN).collect())
            .unwrap_or_else(|| UNKNOWN.to_string());
        debug!("Build {} at commit {}", env!("CARGO_PKG_VERSION"), git_hash);
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            git_hash,
        }
    }
}

fn head_commit(git_dir: &Path) -> Option<String> {
    let head = fs::read_to_string(git_dir.join("HEAD")).ok()?;
    let head = head.trim();
    match head.strip_prefix("ref:") {
        Some(reference) => resolve_ref(git_dir, reference.trim()),
        None => valid_hash(head),
    }
}

fn resolve_ref(git_dir: &Path, reference: &str) -> Option<String> {
    if let Ok(loose) = fs::read_to_string(git_dir.join(reference)) {
        return valid_hash(loose.trim());
    }
    let packed = fs::read_to_string(git_dir.join("packed-refs")).ok()?;
    packed
        .lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
        .find_map(|line| {
            let (hash, name) = line.split_once(' ')?;
            (name.trim() == reference).then(|| valid_hash(hash)).flatten()
        })
}

fn valid_hash(candidate: &str) -> Option<String> {
    let is_hash = candidate.len() >= SHORT_HASH_LEN
        && candidate.chars().all(|c| c.is_ascii_hexdigit());
    is_hash.then(|| candidate.to_string())
}
