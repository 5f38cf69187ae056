//! Content-hash manifest for incremental builds.
//!
//! Rendering is cheap; rewriting files is what disturbs deploy tools that
//! sync by mtime. The generator hashes each rendered page and leaves the
//! file alone when the hash matches the previous build.
//!
//! ## Storage
//!
//! The manifest is a JSON file at `<output_dir>/.pages-manifest.json`,
//! mapping output file name to the SHA-256 of its content.
//!
//! A hit requires:
//! 1. An entry for the file with a matching hash
//! 2. The file still exists on disk
//!
//! `--no-cache` loads an empty manifest, so every page is written.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// Name of the manifest file within the output directory.
pub const MANIFEST_FILENAME: &str = ".pages-manifest.json";

/// Bump to invalidate existing manifests when the format changes.
const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageManifest {
    pub version: u32,
    pub entries: BTreeMap<String, String>,
}

impl PageManifest {
    /// Create an empty manifest (used for `--no-cache` or first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: BTreeMap::new(),
        }
    }

    /// Load from the output directory. Returns an empty manifest if the
    /// file doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(output_dir: &Path) -> Self {
        let path = output_dir.join(MANIFEST_FILENAME);
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::empty();
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(manifest) if manifest.version == MANIFEST_VERSION => manifest,
            _ => {
                tracing::debug!(path = %path.display(), "discarding unreadable page manifest");
                Self::empty()
            }
        }
    }

    /// Save to the output directory.
    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let path = output_dir.join(MANIFEST_FILENAME);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Whether `file` was written with `hash` last time and is still on disk.
    pub fn is_fresh(&self, file: &str, hash: &str, output_dir: &Path) -> bool {
        self.entries.get(file).is_some_and(|h| h == hash) && output_dir.join(file).exists()
    }

    pub fn insert(&mut self, file: String, hash: String) {
        self.entries.insert(file, hash);
    }
}

/// SHA-256 of rendered page content, as a hex string.
pub fn hash_content(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    format!("{:x}", digest)
}
