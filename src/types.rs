//! Shared types used by the shell, the generator and CLI output.
//!
//! `NavEntry` and `PageReport` are serialized into the `--json` build report.

use serde::{Deserialize, Serialize};

/// Output file name for a page slug (`download` → `download.html`).
pub fn page_file(slug: &str) -> String {
    format!("{slug}.html")
}

/// One entry in the shell's navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub slug: String,
    pub title: String,
}

impl NavEntry {
    pub fn file(&self) -> String {
        page_file(&self.slug)
    }
}

/// What the generator did with a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    /// Content changed (or no previous build); file written.
    Written,
    /// Content hash matched the previous build; file left alone.
    Unchanged,
    /// Rendered only, nothing touched on disk.
    Checked,
}

/// Per-page line of a build report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReport {
    pub slug: String,
    pub title: String,
    pub file: String,
    pub sections: Vec<String>,
    pub bytes: usize,
    pub status: PageStatus,
}
