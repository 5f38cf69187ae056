//! # Project Pages
//!
//! Renders the documentation pages of a software project (home, download,
//! FAQ) behind one page shell. Every link into the project host, the
//! release archive server, or another section of the site goes through a
//! typed helper that reads a single, set-once project configuration.
//!
//! # Architecture
//!
//! ```text
//! project.toml ─► SiteConfig ─► Site { ConfigState, Toc, nav }
//!                                   │
//!              page body ◄── Links ◄┤   (one per page render)
//!                   │               │
//!              shell::render ──► header + body + footer ─► <slug>.html
//! ```
//!
//! A render is a pure, in-memory composition. The project configuration is
//! read-only once the [`config::ConfigState`] is initialized, so the
//! generator renders all pages in parallel over shared references.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `project.toml` loading, merging and validation; the set-once [`config::ConfigState`] |
//! | [`links`] | External project, internal anchor and versioned archive link helpers |
//! | [`toc`] | Table of contents: section id → page |
//! | [`shell`] | Header/footer wrapping via [`shell::render`] |
//! | [`pages`] | The built-in page bodies |
//! | [`generate`] | Parallel render of all pages and incremental writes |
//! | [`cache`] | Content-hash manifest that skips unchanged files |
//! | [`types`] | Shared report and navigation types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Configuration, Not Globals
//!
//! The project name, version and hosts live in one [`config::ProjectConfig`]
//! held by a [`config::ConfigState`]. It is passed by reference into every
//! render. Reading it before initialization is an error rather than a
//! default, so a misconfigured build fails instead of publishing links to
//! the wrong release.
//!
//! ## Body as a Closure
//!
//! The shell takes the page body as a function of [`links::Links`]. Header,
//! body and footer composition is ordinary control flow, and a link error
//! inside the body aborts the whole render.
//!
//! ## Maud for Markup
//!
//! Markup is written with [Maud](https://maud.lambda.xyz/). Interpolated
//! values are escaped, and the only raw HTML is the shell's open/close tags,
//! the embedded stylesheet and Markdown converted with `pulldown-cmark`.

pub mod cache;
pub mod config;
pub mod generate;
pub mod links;
pub mod output;
pub mod pages;
pub mod shell;
pub mod toc;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
