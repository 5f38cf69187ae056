//! Project configuration.
//!
//! Handles loading, validating, and merging `project.toml`. Stock defaults
//! describe the JODE site; a user file overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [project]
//! name = "jode"
//! version = "1.1"
//! host_base_url = "https://sourceforge.net/projects/{project}"
//! # archive_base_url unset: the stock host pairs with
//! # ftp://{project}.sourceforge.net/pub/{project}, any other host is reused
//! archive_extension = "jar"
//!
//! [site]
//! title = "JODE"
//! tagline = "Java Optimize and Decompile Environment"
//! lang = "en"
//!
//! [links]
//! anchor_style = "auto"       # auto | fragment | qualified
//! unknown_sections = "error"  # error | warn
//!
//! [[sections]]                # Sections living outside the built-in pages
//! id = "links"
//! page = "links"
//! ```
//!
//! `{project}` inside either base URL is replaced with `project.name`.
//! Unknown keys are rejected to catch typos early.
//!
//! ## Configuration State
//!
//! [`ConfigState`] is the set-once holder the renderer reads the
//! [`ProjectConfig`] from. Reading it before [`ConfigState::init`] is an
//! error, never a silent default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("project configuration read before initialization")]
    Uninitialized,
    #[error("project configuration is already initialized")]
    AlreadyInitialized,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Placeholder substituted with the project name inside base URLs.
pub const PROJECT_PLACEHOLDER: &str = "{project}";

/// Project host used when `project.toml` names none.
pub const STOCK_HOST_BASE_URL: &str = "https://sourceforge.net/projects/{project}";

/// Archive server paired with [`STOCK_HOST_BASE_URL`].
pub const STOCK_ARCHIVE_BASE_URL: &str = "ftp://{project}.sourceforge.net/pub/{project}";

/// Everything loaded from `project.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Name, version and hosts every link helper reads.
    pub project: ProjectConfig,
    /// Presentation settings for the page shell.
    pub site: SiteMeta,
    /// How internal anchors are composed and checked.
    pub links: LinkPolicy,
    /// Extra table-of-contents entries for sections outside the built-in pages.
    pub sections: Vec<SectionEntry>,
}

/// The immutable project identity shared by every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project name, used in archive filenames and page chrome.
    pub name: String,
    /// Current release string substituted into archive links.
    pub version: String,
    /// Base of the project host; external project links hang off it.
    pub host_base_url: String,
    /// Base of the binary archive server. Unset means the stock host's FTP
    /// mirror, or `host_base_url` for any other host. `""` always means
    /// `host_base_url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_base_url: Option<String>,
    /// Extension of the released archives, without the dot.
    pub archive_extension: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "jode".to_string(),
            version: "1.1".to_string(),
            host_base_url: STOCK_HOST_BASE_URL.to_string(),
            archive_base_url: None,
            archive_extension: "jar".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Host base with the project placeholder expanded and trailing slashes removed.
    pub fn host_base(&self) -> String {
        self.expand(&self.host_base_url)
    }

    /// Archive base with the project placeholder expanded and trailing slashes removed.
    pub fn archive_base(&self) -> String {
        let raw = match self.archive_base_url.as_deref() {
            Some("") => self.host_base_url.as_str(),
            Some(url) => url,
            None if self.host_base_url == STOCK_HOST_BASE_URL => STOCK_ARCHIVE_BASE_URL,
            None => self.host_base_url.as_str(),
        };
        self.expand(raw)
    }

    /// `<name>-<version><suffix>.<ext>`
    pub fn archive_file_name(&self, suffix: &str) -> String {
        format!(
            "{}-{}{}.{}",
            self.name, self.version, suffix, self.archive_extension
        )
    }

    fn expand(&self, url: &str) -> String {
        url.replace(PROJECT_PLACEHOLDER, &self.name)
            .trim_end_matches('/')
            .to_string()
    }
}

/// Page shell presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Short site title, shown in the header and `<title>`.
    pub title: String,
    /// One-line description under the title.
    pub tagline: String,
    /// Value of the `<html lang>` attribute.
    pub lang: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "JODE".to_string(),
            tagline: "Java Optimize and Decompile Environment".to_string(),
            lang: "en".to_string(),
        }
    }
}

/// How `internal_anchor_link` picks between `#id` and `page.html#id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorStyle {
    /// Bare fragment when the section lives on the page being rendered,
    /// page-qualified otherwise.
    #[default]
    Auto,
    /// Always a bare `#id`.
    Fragment,
    /// Always `page.html#id`.
    Qualified,
}

/// What happens when a page references a section missing from the table of contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownSections {
    /// Fail the render.
    #[default]
    Error,
    /// Log a warning and emit a bare fragment.
    Warn,
}

/// Internal anchor policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkPolicy {
    pub anchor_style: AnchorStyle,
    pub unknown_sections: UnknownSections,
}

/// A table-of-contents entry declared in config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionEntry {
    /// Section identifier, used as the URL fragment.
    pub id: String,
    /// Slug of the page holding the section.
    pub page: String,
}

fn default_sections() -> Vec<SectionEntry> {
    ["links", "license", "applet"]
        .iter()
        .map(|id| SectionEntry {
            id: id.to_string(),
            page: id.to_string(),
        })
        .collect()
}

impl SiteConfig {
    /// Stock configuration: the JODE project plus the sections its pages
    /// reference but do not render themselves.
    pub fn stock() -> Self {
        Self {
            sections: default_sections(),
            ..Self::default()
        }
    }

    /// Validate config values are usable for link composition.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let project = &self.project;
        if project.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "project.name must not be empty".into(),
            ));
        }
        if project.name.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "project.name must not contain path separators".into(),
            ));
        }
        if project.version.trim().is_empty() {
            return Err(ConfigError::Validation(
                "project.version must not be empty".into(),
            ));
        }
        if project.version.contains(['/', '\\']) || project.version.contains(char::is_whitespace)
        {
            return Err(ConfigError::Validation(
                "project.version must not contain path separators or whitespace".into(),
            ));
        }
        if !project.host_base_url.contains("://") {
            return Err(ConfigError::Validation(
                "project.host_base_url must be an absolute URL".into(),
            ));
        }
        if let Some(archive) = &project.archive_base_url
            && !archive.is_empty()
            && !archive.contains("://")
        {
            return Err(ConfigError::Validation(
                "project.archive_base_url must be an absolute URL".into(),
            ));
        }
        if project.archive_extension.is_empty()
            || project.archive_extension.starts_with('.')
            || project.archive_extension.contains(['/', '\\'])
        {
            return Err(ConfigError::Validation(
                "project.archive_extension must be a bare extension like \"jar\"".into(),
            ));
        }
        for section in &self.sections {
            if section.id.is_empty() || section.id.contains(['#', '/']) {
                return Err(ConfigError::Validation(format!(
                    "section id {:?} must be non-empty and contain no '#' or '/'",
                    section.id
                )));
            }
            if section.page.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "section {:?} must name a page",
                    section.id
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Configuration State
// =============================================================================

/// Set-once holder for the [`ProjectConfig`].
///
/// Shared by reference across concurrent renders once initialized.
/// Replacing the value needs `&mut self`, so it cannot overlap a render.
#[derive(Debug, Default)]
pub struct ConfigState {
    cell: OnceLock<ProjectConfig>,
}

impl ConfigState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A state initialized with `project`.
    pub fn with(project: ProjectConfig) -> Self {
        Self {
            cell: OnceLock::from(project),
        }
    }

    /// Initialize the state. Fails if it already holds a value.
    pub fn init(&self, project: ProjectConfig) -> Result<(), ConfigError> {
        self.cell
            .set(project)
            .map_err(|_| ConfigError::AlreadyInitialized)
    }

    /// Read the project configuration.
    pub fn get(&self) -> Result<&ProjectConfig, ConfigError> {
        self.cell.get().ok_or(ConfigError::Uninitialized)
    }

    /// Replace the value between renders.
    pub fn reinitialize(&mut self, project: ProjectConfig) {
        self.cell = OnceLock::from(project);
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::stock())
        .map_err(|e| ConfigError::Validation(format!("stock config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (arrays included) replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, merged over stock defaults.
///
/// A missing file yields the stock config.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `project.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Project Pages Configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Project identity - read by every link helper
# ---------------------------------------------------------------------------
[project]
name = "jode"

# Current release; substituted into archive links.
version = "1.1"

# Project host. External project links are <host_base_url>/<path>.
# "{project}" is replaced with the project name.
host_base_url = "https://sourceforge.net/projects/{project}"

# Binary archive server. Archive links are
# <archive_base_url>/<name>-<version><suffix>.<archive_extension>
# When unset, the stock host above uses its FTP mirror
# ftp://{project}.sourceforge.net/pub/{project} and any other host is reused.
# Set to "" to always reuse host_base_url.
# archive_base_url = "https://downloads.example.org/{project}"
archive_extension = "jar"

# ---------------------------------------------------------------------------
# Page shell
# ---------------------------------------------------------------------------
[site]
title = "JODE"
tagline = "Java Optimize and Decompile Environment"
lang = "en"

# ---------------------------------------------------------------------------
# Internal anchors
# ---------------------------------------------------------------------------
[links]
# auto      - "#id" on the section's own page, "page.html#id" elsewhere
# fragment  - always "#id"
# qualified - always "page.html#id"
anchor_style = "auto"

# error - referencing an unknown section fails the build
# warn  - log a warning and emit "#id"
unknown_sections = "error"

# ---------------------------------------------------------------------------
# Sections hosted outside the built-in pages
# ---------------------------------------------------------------------------
[[sections]]
id = "links"
page = "links"

[[sections]]
id = "license"
page = "license"

[[sections]]
id = "applet"
page = "applet"
"##
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_project_is_jode() {
        let config = SiteConfig::stock();
        assert_eq!(config.project.name, "jode");
        assert_eq!(config.project.version, "1.1");
    }

    #[test]
    fn stock_declares_external_sections() {
        let ids: Vec<_> = SiteConfig::stock()
            .sections
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["links", "license", "applet"]);
    }

    #[test]
    fn stock_config_toml_matches_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let stock = SiteConfig::stock();
        assert_eq!(parsed.project, stock.project);
        assert_eq!(parsed.sections, stock.sections);
        assert_eq!(parsed.site.title, stock.site.title);
        assert_eq!(parsed.links.anchor_style, stock.links.anchor_style);
        assert_eq!(parsed.links.unknown_sections, stock.links.unknown_sections);
    }

    #[test]
    fn archive_base_expands_placeholder() {
        let project = ProjectConfig::default();
        assert_eq!(project.archive_base(), "ftp://jode.sourceforge.net/pub/jode");
    }

    #[test]
    fn archive_base_falls_back_to_host() {
        let project = ProjectConfig {
            host_base_url: "https://example.org/{project}/".to_string(),
            archive_base_url: None,
            ..ProjectConfig::default()
        };
        assert_eq!(project.archive_base(), "https://example.org/jode");
        assert_eq!(project.host_base(), "https://example.org/jode");
    }

    #[test]
    fn stock_host_names_the_project() {
        let project = ProjectConfig::default();
        assert_eq!(project.host_base(), "https://sourceforge.net/projects/jode");
    }

    #[test]
    fn host_base_without_placeholder_is_verbatim() {
        let project = ProjectConfig {
            host_base_url: "https://sourceforge.net/".to_string(),
            ..ProjectConfig::default()
        };
        assert_eq!(project.host_base(), "https://sourceforge.net");
    }

    #[test]
    fn empty_archive_base_reuses_stock_host() {
        let project = ProjectConfig {
            archive_base_url: Some(String::new()),
            ..ProjectConfig::default()
        };
        assert_eq!(project.archive_base(), "https://sourceforge.net/projects/jode");
    }

    #[test]
    fn archive_file_name_pattern() {
        let project = ProjectConfig::default();
        assert_eq!(project.archive_file_name("-1.2"), "jode-1.1-1.2.jar");
        assert_eq!(project.archive_file_name(""), "jode-1.1.jar");
    }

    // =========================================================================
    // Configuration state
    // =========================================================================

    #[test]
    fn get_before_init_is_uninitialized() {
        let state = ConfigState::new();
        for _ in 0..3 {
            assert!(matches!(state.get(), Err(ConfigError::Uninitialized)));
        }
        assert!(!state.is_initialized());
    }

    #[test]
    fn init_then_get() {
        let state = ConfigState::new();
        state.init(ProjectConfig::default()).unwrap();
        assert_eq!(state.get().unwrap().name, "jode");
    }

    #[test]
    fn second_init_rejected() {
        let state = ConfigState::new();
        state.init(ProjectConfig::default()).unwrap();
        let other = ProjectConfig {
            version: "2.0".to_string(),
            ..ProjectConfig::default()
        };
        assert!(matches!(
            state.init(other),
            Err(ConfigError::AlreadyInitialized)
        ));
        assert_eq!(state.get().unwrap().version, "1.1");
    }

    #[test]
    fn reinitialize_replaces_value() {
        let mut state = ConfigState::with(ProjectConfig::default());
        state.reinitialize(ProjectConfig {
            version: "1.1.1".to_string(),
            ..ProjectConfig::default()
        });
        assert_eq!(state.get().unwrap().version, "1.1.1");
    }

    #[test]
    fn state_shared_across_threads() {
        let state = ConfigState::with(ProjectConfig::default());
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(state.get().unwrap().name, "jode"));
            }
        });
    }

    // =========================================================================
    // Loading and merging
    // =========================================================================

    #[test]
    fn load_config_returns_stock_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("project.toml")).unwrap();
        assert_eq!(config.project, ProjectConfig::default());
        assert_eq!(config.sections.len(), 3);
    }

    #[test]
    fn load_config_partial_override() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("project.toml");
        fs::write(&path, "[project]\nversion = \"1.2\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.project.version, "1.2");
        // Untouched keys keep their stock values
        assert_eq!(config.project.name, "jode");
        assert_eq!(config.sections.len(), 3);
    }

    #[test]
    fn custom_host_without_archive_base_is_reused() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("project.toml");
        fs::write(
            &path,
            "[project]\nname = \"foo\"\nhost_base_url = \"https://example.org/foo\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.project.archive_base_url, None);
        assert_eq!(config.project.archive_base(), "https://example.org/foo");
    }

    #[test]
    fn explicit_archive_base_wins() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("project.toml");
        fs::write(
            &path,
            "[project]\nhost_base_url = \"https://example.org\"\narchive_base_url = \"ftp://mirror.example.org/{project}/\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.project.archive_base(), "ftp://mirror.example.org/jode");
    }

    #[test]
    fn sections_array_replaced_not_merged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("project.toml");
        fs::write(&path, "[[sections]]\nid = \"mirrors\"\npage = \"download\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(
            config.sections,
            vec![SectionEntry {
                id: "mirrors".to_string(),
                page: "download".to_string(),
            }]
        );
    }

    #[test]
    fn parse_link_policy() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("project.toml");
        fs::write(
            &path,
            "[links]\nanchor_style = \"qualified\"\nunknown_sections = \"warn\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.links.anchor_style, AnchorStyle::Qualified);
        assert_eq!(config.links.unknown_sections, UnknownSections::Warn);
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("project.toml");
        fs::write(&path, "[project]\nverison = \"1.2\"\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("project.toml");
        fs::write(&path, "[project\nname = ").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn unknown_anchor_style_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("project.toml");
        fs::write(&path, "[links]\nanchor_style = \"sometimes\"\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_nested_tables() {
        let base: toml::Value =
            toml::from_str("[project]\nname = \"jode\"\nversion = \"1.1\"").unwrap();
        let overlay: toml::Value = toml::from_str("[project]\nversion = \"1.2\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["project"]["name"].as_str(), Some("jode"));
        assert_eq!(merged["project"]["version"].as_str(), Some("1.2"));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_stock_passes() {
        assert!(SiteConfig::stock().validate().is_ok());
    }

    #[test]
    fn validate_empty_version() {
        let mut config = SiteConfig::stock();
        config.project.version = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_version_with_slash() {
        let mut config = SiteConfig::stock();
        config.project.version = "1.1/evil".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_relative_host() {
        let mut config = SiteConfig::stock();
        config.project.host_base_url = "sourceforge.net".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_dotted_extension() {
        let mut config = SiteConfig::stock();
        config.project.archive_extension = ".jar".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_section_id_with_hash() {
        let mut config = SiteConfig::stock();
        config.sections.push(SectionEntry {
            id: "#links".to_string(),
            page: "links".to_string(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("project.toml");
        fs::write(&path, "[project]\nname = \"\"\n").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }
}
