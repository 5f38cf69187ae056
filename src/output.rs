//! CLI output formatting.
//!
//! Every page is shown by its position and title, with the output file and
//! status on the same line and its sections as an indented context line:
//!
//! ```text
//! jode 1.1
//! 001 Home → index.html (written)
//!     Sections: known-bugs, limitations, news
//! 002 Download → download.html (unchanged)
//!     Sections: binaries, cvs
//! 003 FAQ → faq.html (written)
//!     Sections: decompiler, obfuscator
//!
//! Generated 3 pages (2 written, 1 unchanged) → dist
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::BuildReport;
use crate::toc::Toc;
use crate::types::{PageReport, PageStatus};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn status_label(status: PageStatus) -> &'static str {
    match status {
        PageStatus::Written => "written",
        PageStatus::Unchanged => "unchanged",
        PageStatus::Checked => "ok",
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Header line plus indented sections line for one page.
fn page_lines(index: usize, page: &PageReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} → {} ({})",
        format_index(index),
        page.title,
        page.file,
        status_label(page.status)
    )];
    if !page.sections.is_empty() {
        lines.push(format!("    Sections: {}", page.sections.join(", ")));
    }
    lines
}

/// Format the result of `build`.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![format!("{} {}", report.project, report.version)];
    for (i, page) in report.pages.iter().enumerate() {
        lines.extend(page_lines(i + 1, page));
    }

    lines.push(String::new());
    let mut summary = format!(
        "Generated {} ({} written, {} unchanged)",
        plural(report.pages.len(), "page"),
        report.count(PageStatus::Written),
        report.count(PageStatus::Unchanged),
    );
    if let Some(dir) = &report.output_dir {
        summary.push_str(&format!(" → {}", dir.display()));
    }
    lines.push(summary);
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

/// Format the result of `check`: pages, then sections that live on pages
/// this site does not build.
pub fn format_check_output(report: &BuildReport, toc: &Toc) -> Vec<String> {
    let mut lines = vec![format!("{} {}", report.project, report.version)];
    for (i, page) in report.pages.iter().enumerate() {
        lines.extend(page_lines(i + 1, page));
    }

    let built: Vec<&str> = report.pages.iter().map(|p| p.slug.as_str()).collect();
    let external: Vec<_> = toc.outside(&built).collect();
    if !external.is_empty() {
        lines.push(String::new());
        lines.push("External sections".to_string());
        for (id, page) in &external {
            lines.push(format!("    {} → {}.html#{} (not built)", id, page, id));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Checked {}, {}",
        plural(report.pages.len(), "page"),
        plural(toc.len(), "section")
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(report: &BuildReport, toc: &Toc) {
    for line in format_check_output(report, toc) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::path::PathBuf;

    fn page(slug: &str, title: &str, sections: &[&str], status: PageStatus) -> PageReport {
        PageReport {
            slug: slug.to_string(),
            title: title.to_string(),
            file: format!("{slug}.html"),
            sections: sections.iter().map(|s| s.to_string()).collect(),
            bytes: 100,
            status,
        }
    }

    fn report(pages: Vec<PageReport>, output_dir: Option<PathBuf>) -> BuildReport {
        BuildReport {
            project: "jode".to_string(),
            version: "1.1".to_string(),
            output_dir,
            pages,
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn build_output_lists_pages_and_summary() {
        let r = report(
            vec![
                page("index", "Home", &["news"], PageStatus::Written),
                page("faq", "FAQ", &[], PageStatus::Unchanged),
            ],
            Some(PathBuf::from("dist")),
        );
        let lines = format_build_output(&r);

        assert_eq!(lines[0], "jode 1.1");
        assert_eq!(lines[1], "001 Home → index.html (written)");
        assert_eq!(lines[2], "    Sections: news");
        assert_eq!(lines[3], "002 FAQ → faq.html (unchanged)");
        assert_eq!(
            lines.last().unwrap(),
            "Generated 2 pages (1 written, 1 unchanged) → dist"
        );
    }

    #[test]
    fn build_output_singular_page() {
        let r = report(vec![page("faq", "FAQ", &[], PageStatus::Written)], None);
        assert_eq!(
            format_build_output(&r).last().unwrap(),
            "Generated 1 page (1 written, 0 unchanged)"
        );
    }

    #[test]
    fn check_output_lists_external_sections() {
        let r = report(
            vec![page("download", "Download", &["links"], PageStatus::Checked)],
            None,
        );
        let toc = jode_toc();
        let lines = format_check_output(&r, &toc);

        assert!(lines.contains(&"001 Download → download.html (ok)".to_string()));
        assert!(lines.contains(&"External sections".to_string()));
        assert!(lines.contains(&"    links → links.html#links (not built)".to_string()));
        assert!(lines.contains(&"    news → index.html#news (not built)".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            &format!("Checked 1 page, {}", plural(toc.len(), "section"))
        );
    }
}
