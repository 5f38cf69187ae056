//! HTML site generation.
//!
//! Renders every page through the shell and writes `<slug>.html` files.
//!
//! ## Steps
//!
//! 1. Build the [`Site`]: the config state is initialized once and the
//!    table of contents is assembled from page sections plus config entries.
//! 2. Render all pages in parallel. Workers share the site by reference; any
//!    failure fails the whole build before a single file is written.
//! 3. Write pages whose content hash changed since the last build
//!    (see [`crate::cache`]) and save the manifest.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── download.html
//! ├── faq.html
//! └── .pages-manifest.json
//! ```

use crate::cache::{self, PageManifest};
use crate::config::{ConfigError, ConfigState, LinkPolicy, ProjectConfig, SiteConfig, SiteMeta};
use crate::pages::{self, Page};
use crate::shell::{self, RenderContext, RenderError};
use crate::toc::{Toc, TocError};
use crate::types::{NavEntry, PageReport, PageStatus, page_file};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Table of contents error: {0}")]
    Toc(#[from] TocError),
    #[error("failed to render page {page:?}: {source}")]
    Render {
        page: String,
        #[source]
        source: RenderError,
    },
    #[error("no page named {0:?}")]
    UnknownPage(String),
}

/// Everything renders share, built once per run.
#[derive(Debug)]
pub struct Site {
    state: ConfigState,
    meta: SiteMeta,
    policy: LinkPolicy,
    toc: Toc,
    nav: Vec<NavEntry>,
}

impl Site {
    /// Initialize the config state and assemble the table of contents.
    pub fn new(config: SiteConfig, pages: &[Page]) -> Result<Self, GenerateError> {
        let SiteConfig {
            project,
            site,
            links,
            sections,
        } = config;
        let toc = Toc::build(pages.iter().map(|p| (p.slug, p.sections)), &sections)?;
        let state = ConfigState::new();
        state.init(project)?;
        Ok(Self {
            state,
            meta: site,
            policy: links,
            toc,
            nav: pages.iter().map(Page::nav_entry).collect(),
        })
    }

    pub fn context(&self) -> RenderContext<'_> {
        RenderContext {
            state: &self.state,
            meta: &self.meta,
            policy: &self.policy,
            toc: &self.toc,
            nav: &self.nav,
        }
    }

    pub fn project(&self) -> Result<&ProjectConfig, ConfigError> {
        self.state.get()
    }

    pub fn toc(&self) -> &Toc {
        &self.toc
    }

    pub fn nav(&self) -> &[NavEntry] {
        &self.nav
    }
}

/// Result of a `build` or `check` run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub project: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub pages: Vec<PageReport>,
}

impl BuildReport {
    pub fn count(&self, status: PageStatus) -> usize {
        self.pages.iter().filter(|p| p.status == status).count()
    }
}

/// A page rendered in memory, not yet written.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page: Page,
    pub html: String,
}

/// Render a single page through the shell.
pub fn render_page(site: &Site, page: &Page) -> Result<String, GenerateError> {
    shell::render(&site.context(), &page.nav_entry(), page.body).map_err(|source| {
        GenerateError::Render {
            page: page.slug.to_string(),
            source,
        }
    })
}

/// Render every page in parallel, preserving page order.
pub fn render_all(site: &Site, pages: &[Page]) -> Result<Vec<RenderedPage>, GenerateError> {
    pages
        .par_iter()
        .map(|page| {
            let html = render_page(site, page)?;
            Ok(RenderedPage { page: *page, html })
        })
        .collect()
}

/// Render one page by slug.
pub fn render_one(config: SiteConfig, pages: &[Page], slug: &str) -> Result<String, GenerateError> {
    let page = pages::find(pages, slug).ok_or_else(|| GenerateError::UnknownPage(slug.to_string()))?;
    let site = Site::new(config, pages)?;
    render_page(&site, page)
}

/// Render every page without touching the filesystem.
///
/// Sections registered on pages outside `pages` are logged as warnings:
/// links into them point at files this build does not write.
pub fn check(site: &Site, pages: &[Page]) -> Result<BuildReport, GenerateError> {
    let rendered = render_all(site, pages)?;
    let built: Vec<&str> = pages.iter().map(|p| p.slug).collect();
    for (id, page) in site.toc().outside(&built) {
        tracing::warn!(section = id, page, "section lives on a page this build does not write");
    }
    let reports = rendered
        .iter()
        .map(|r| page_report(site, r, PageStatus::Checked))
        .collect();
    report(site, None, reports)
}

/// Render every page and write the changed ones into `output_dir`.
pub fn generate(
    config: SiteConfig,
    pages: &[Page],
    output_dir: &Path,
    use_cache: bool,
) -> Result<BuildReport, GenerateError> {
    let site = Site::new(config, pages)?;
    let rendered = render_all(&site, pages)?;

    fs::create_dir_all(output_dir)?;
    let mut manifest = if use_cache {
        PageManifest::load(output_dir)
    } else {
        PageManifest::empty()
    };

    let mut reports = Vec::with_capacity(rendered.len());
    for r in &rendered {
        let file = page_file(r.page.slug);
        let hash = cache::hash_content(&r.html);
        let status = if manifest.is_fresh(&file, &hash, output_dir) {
            tracing::debug!(page = r.page.slug, "unchanged, skipping write");
            PageStatus::Unchanged
        } else {
            fs::write(output_dir.join(&file), &r.html)?;
            tracing::info!(page = r.page.slug, file = %file, bytes = r.html.len(), "wrote page");
            PageStatus::Written
        };
        manifest.insert(file, hash);
        reports.push(page_report(&site, r, status));
    }
    manifest.save(output_dir)?;

    report(&site, Some(output_dir.to_path_buf()), reports)
}

fn page_report(site: &Site, rendered: &RenderedPage, status: PageStatus) -> PageReport {
    PageReport {
        slug: rendered.page.slug.to_string(),
        title: rendered.page.title.to_string(),
        file: page_file(rendered.page.slug),
        sections: site
            .toc()
            .sections_on(rendered.page.slug)
            .map(str::to_string)
            .collect(),
        bytes: rendered.html.len(),
        status,
    }
}

fn report(
    site: &Site,
    output_dir: Option<PathBuf>,
    pages: Vec<PageReport>,
) -> Result<BuildReport, GenerateError> {
    let project = site.project()?;
    Ok(BuildReport {
        project: project.name.clone(),
        version: project.version.clone(),
        output_dir,
        pages,
    })
}

// ============================================================================
// Tests
// ============================================================================
