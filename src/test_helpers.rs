//! Shared test fixtures.
//!
//! `jode_project()` mirrors the release example: one FTP base serves both
//! project links and archives. `jode_toc()` is a small hand-built table of
//! contents covering one section per built-in page plus the external
//! `links` page.

use crate::config::ProjectConfig;
use crate::toc::Toc;
use crate::types::NavEntry;

/// projectName="jode", version="1.1", hostBaseUrl="ftp://jode.sourceforge.net/pub/jode".
pub fn jode_project() -> ProjectConfig {
    ProjectConfig {
        name: "jode".to_string(),
        version: "1.1".to_string(),
        host_base_url: "ftp://jode.sourceforge.net/pub/jode".to_string(),
        archive_base_url: None,
        archive_extension: "jar".to_string(),
    }
}

pub fn jode_toc() -> Toc {
    let mut toc = Toc::new();
    for (id, page) in [
        ("news", "index"),
        ("cvs", "download"),
        ("decompiler", "faq"),
        ("obfuscator", "faq"),
        ("links", "links"),
    ] {
        toc.register(id, page).unwrap();
    }
    toc
}

pub fn nav_entry(slug: &str, title: &str) -> NavEntry {
    NavEntry {
        slug: slug.to_string(),
        title: title.to_string(),
    }
}

/// Assert `html` is exactly `header`, then `body`, then `footer`.
pub fn assert_shell_wrapped(html: &str, header: &str, body: &str, footer: &str) {
    assert!(
        html.starts_with(header),
        "output does not start with the header"
    );
    assert!(html.ends_with(footer), "output does not end with the footer");
    assert_eq!(
        &html[header.len()..html.len() - footer.len()],
        body,
        "body is not contiguous between header and footer"
    );
}
