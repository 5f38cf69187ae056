//! Link helpers.
//!
//! Three pure functions compose every link a page emits:
//!
//! | Helper | Result |
//! |--------|--------|
//! | [`Links::external_project_link`] | `<host>/<path>`, opening tag only |
//! | [`Links::internal_anchor_link`] | `#id` or `page.html#id`, opening tag only |
//! | [`Links::versioned_archive_link`] | `<archive>/<name>-<version><suffix>.<ext>`, complete element |
//!
//! The first two leave the visible text to the page: the result is an
//! [`Anchor`] without text, which the page completes with [`Anchor::wrap`].
//! Archive links own their text because it mirrors the file name.
//!
//! Output depends only on the [`ProjectConfig`], the table of contents, the
//! anchor policy and the argument. Nothing is cached or fetched.

use crate::config::{AnchorStyle, LinkPolicy, ProjectConfig, UnknownSections};
use crate::toc::Toc;
use crate::types::page_file;
use maud::{Markup, PreEscaped, Render, html};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("invalid project path {0:?}: must be non-empty")]
    InvalidPath(String),
    #[error("invalid archive suffix {0:?}: must not contain path separators")]
    InvalidSuffix(String),
    #[error("unknown section {0:?}")]
    UnknownSection(String),
}

/// A hyperlink: target plus optional owned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: Option<String>,
}

impl Anchor {
    /// Anchor whose visible text the caller supplies.
    pub fn open(href: String) -> Self {
        Self { href, text: None }
    }

    /// Anchor that carries its own visible text.
    pub fn complete(href: String, text: String) -> Self {
        Self {
            href,
            text: Some(text),
        }
    }

    /// The `<a href="...">` opening tag alone.
    pub fn open_tag(&self) -> Markup {
        html! {
            (PreEscaped("<a href=\""))
            (self.href)
            (PreEscaped("\">"))
        }
    }

    /// A complete `<a>` element around `content`.
    pub fn wrap(&self, content: impl Render) -> Markup {
        html! {
            a href=(self.href) { (content) }
        }
    }
}

/// Renders the complete element when the anchor owns its text, and only the
/// opening tag otherwise. The caller then emits the text and `</a>`.
impl Render for Anchor {
    fn render(&self) -> Markup {
        match &self.text {
            Some(text) => self.wrap(text),
            None => self.open_tag(),
        }
    }
}

/// Join `base` and `path` with exactly one slash.
///
/// Returns `None` when `path` is empty after trimming its leading slashes.
pub fn join_url(base: &str, path: &str) -> Option<String> {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    Some(format!("{}/{}", base.trim_end_matches('/'), path))
}

/// Link helpers bound to one render of one page.
#[derive(Debug, Clone, Copy)]
pub struct Links<'a> {
    project: &'a ProjectConfig,
    policy: &'a LinkPolicy,
    toc: &'a Toc,
    current_page: &'a str,
}

impl<'a> Links<'a> {
    pub fn new(
        project: &'a ProjectConfig,
        policy: &'a LinkPolicy,
        toc: &'a Toc,
        current_page: &'a str,
    ) -> Self {
        Self {
            project,
            policy,
            toc,
            current_page,
        }
    }

    pub fn project(&self) -> &'a ProjectConfig {
        self.project
    }

    /// Slug of the page being rendered.
    pub fn current_page(&self) -> &'a str {
        self.current_page
    }

    /// `<host_base_url>/<relative_path>` as an open anchor.
    pub fn external_project_link(&self, relative_path: &str) -> Result<Anchor, LinkError> {
        join_url(&self.project.host_base(), relative_path)
            .map(Anchor::open)
            .ok_or_else(|| LinkError::InvalidPath(relative_path.to_string()))
    }

    /// Reference to a section from the table of contents, as an open anchor.
    pub fn internal_anchor_link(&self, section_id: &str) -> Result<Anchor, LinkError> {
        let Some(page) = self.toc.page_of(section_id) else {
            return match self.policy.unknown_sections {
                UnknownSections::Error => Err(LinkError::UnknownSection(section_id.to_string())),
                UnknownSections::Warn => {
                    tracing::warn!(
                        section = section_id,
                        page = self.current_page,
                        "unknown section, emitting bare fragment"
                    );
                    Ok(Anchor::open(format!("#{section_id}")))
                }
            };
        };

        let qualified = match self.policy.anchor_style {
            AnchorStyle::Fragment => false,
            AnchorStyle::Qualified => true,
            AnchorStyle::Auto => page != self.current_page,
        };
        let href = if qualified {
            format!("{}#{}", page_file(page), section_id)
        } else {
            format!("#{section_id}")
        };
        Ok(Anchor::open(href))
    }

    /// Download link for the release archive with the given qualifier.
    ///
    /// Href and text carry the same file name.
    pub fn versioned_archive_link(&self, suffix: &str) -> Result<Anchor, LinkError> {
        if suffix.contains(['/', '\\']) {
            return Err(LinkError::InvalidSuffix(suffix.to_string()));
        }
        let file_name = self.project.archive_file_name(suffix);
        let href = format!("{}/{}", self.project.archive_base(), file_name);
        Ok(Anchor::complete(href, file_name))
    }
}
