use clap::{ArgAction, Parser, Subcommand};
use project_pages::{config, generate, output, pages};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn version_string() -> &'static str {
    if env!("PAGES_RELEASE_TAG") == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("PAGES_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "project-pages")]
#[command(about = "Render a project's documentation pages")]
#[command(long_about = "\
Render a project's documentation pages

Every page (home, download, FAQ) is wrapped in the same header and footer.
Links to the project host, release archives and other sections are built
from project.toml, so bumping the version there updates every download link.

Output:

  dist/
  ├── index.html
  ├── download.html
  ├── faq.html
  └── .pages-manifest.json     # content hashes; unchanged pages are not rewritten

Run 'project-pages gen-config' to print a documented project.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project configuration file (missing file = stock defaults)
    #[arg(long, default_value = "project.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Override project.version for this run
    #[arg(long, global = true)]
    project_version: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render all pages into the output directory
    Build {
        /// Ignore the content-hash manifest and rewrite every page
        #[arg(long)]
        no_cache: bool,
        /// Print the build report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Render one page to stdout
    Render {
        /// Page slug (index, download, faq)
        slug: String,
    },
    /// Render all pages in memory and report, writing nothing
    Check,
    /// Print a stock project.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(cli.verbose, cli.quiet)?;

    match cli.command {
        Command::Build { no_cache, json } => {
            let site_config = load(&cli.config, cli.project_version)?;
            let report =
                generate::generate(site_config, pages::builtin(), &cli.output, !no_cache)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_build_output(&report);
            }
        }
        Command::Render { slug } => {
            let site_config = load(&cli.config, cli.project_version)?;
            let html = generate::render_one(site_config, pages::builtin(), &slug)?;
            print!("{html}");
        }
        Command::Check => {
            let site_config = load(&cli.config, cli.project_version)?;
            let site = generate::Site::new(site_config, pages::builtin())?;
            let report = generate::check(&site, pages::builtin())?;
            output::print_check_output(&report, site.toc());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `project.toml` and apply the `--project-version` override.
fn load(
    path: &Path,
    version_override: Option<String>,
) -> Result<config::SiteConfig, config::ConfigError> {
    let mut site_config = config::load_config(path)?;
    if let Some(version) = version_override {
        site_config.project.version = version;
        site_config.validate()?;
    }
    tracing::debug!(
        config = %path.display(),
        project = %site_config.project.name,
        version = %site_config.project.version,
        "loaded project configuration"
    );
    Ok(site_config)
}

/// Install the stderr tracing subscriber. `RUST_LOG` overrides the flags.
fn init_logging(verbose: u8, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = log_level(verbose, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("project_pages={level}")));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
