//! Page shell: the header and footer wrapped around every page.
//!
//! [`render`] emits the header fragment, runs the page body, then emits the
//! footer fragment. The header opens `<html>`, `<body>` and `<main>`; the
//! footer closes them. Whatever markup the body returns sits between the two
//! untouched.
//!
//! ```text
//! <!DOCTYPE html><html lang=..><head>..</head><body>
//! <header class="site-header">..nav..</header><main ..>   ← header()
//! ...page body...                                         ← body(&links)
//! </main><footer class="site-footer">..</footer></body></html>  ← footer()
//! ```
//!
//! The body receives a [`Links`] bound to the page being rendered. A link
//! error aborts the render and no text is returned.

use crate::config::{ConfigError, ConfigState, LinkPolicy, ProjectConfig, SiteMeta};
use crate::links::{LinkError, Links};
use crate::toc::Toc;
use crate::types::NavEntry;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

const CSS: &str = include_str!("../static/style.css");

/// Everything a render reads. Borrowed, so one context serves any number
/// of concurrent renders.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub state: &'a ConfigState,
    pub meta: &'a SiteMeta,
    pub policy: &'a LinkPolicy,
    pub toc: &'a Toc,
    pub nav: &'a [NavEntry],
}

/// Render one page: header, body, footer.
pub fn render<F>(ctx: &RenderContext<'_>, page: &NavEntry, body: F) -> Result<String, RenderError>
where
    F: FnOnce(&Links<'_>) -> Result<Markup, LinkError>,
{
    let project = ctx.state.get()?;
    let links = Links::new(project, ctx.policy, ctx.toc, &page.slug);
    let body = body(&links)?;

    let header = header(ctx, project, page).into_string();
    let footer = footer(project).into_string();
    let body = body.into_string();

    let mut out = String::with_capacity(header.len() + body.len() + footer.len());
    out.push_str(&header);
    out.push_str(&body);
    out.push_str(&footer);
    Ok(out)
}

/// Header fragment: everything up to and including the opening `<main>`.
pub fn header(ctx: &RenderContext<'_>, project: &ProjectConfig, page: &NavEntry) -> Markup {
    let title = format!("{} - {}", page.title, ctx.meta.title);
    html! {
        (DOCTYPE)
        (PreEscaped("<html lang=\""))
        (ctx.meta.lang)
        (PreEscaped("\">"))
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            meta name="generator" content={ (project.name) " " (project.version) };
            title { (title) }
            style { (PreEscaped(CSS)) }
        }
        (PreEscaped("<body>"))
        header.site-header {
            div.site-title {
                a href="index.html" { (ctx.meta.title) }
                @if !ctx.meta.tagline.is_empty() {
                    span.tagline { (ctx.meta.tagline) }
                }
            }
            nav.site-nav {
                (render_nav(ctx.nav, &page.slug))
            }
        }
        (PreEscaped("<main class=\"page page-"))
        (page.slug)
        (PreEscaped("\">"))
    }
}

/// Footer fragment: closes `<main>`, `<body>` and `<html>`.
pub fn footer(project: &ProjectConfig) -> Markup {
    html! {
        (PreEscaped("</main>"))
        footer.site-footer {
            p {
                (project.name) " " (project.version)
                " · hosted at "
                a href=(project.host_base()) { (project.host_base()) }
            }
        }
        (PreEscaped("</body></html>"))
    }
}

/// Navigation list with the current page marked.
pub fn render_nav(items: &[NavEntry], current: &str) -> Markup {
    html! {
        ul {
            @for item in items {
                @let is_current = item.slug == current;
                li class=[is_current.then_some("current")] {
                    a href=(item.file()) { (item.title) }
                }
            }
        }
    }
}

/// Convert a Markdown prose block to HTML.
pub fn markdown(source: &str) -> Markup {
    let parser = Parser::new(source);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

// ============================================================================
// Tests
// ============================================================================
