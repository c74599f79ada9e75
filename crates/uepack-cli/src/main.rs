use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use uepack_core::constants::CONFIG_FILE;
use uepack_core::{Settings, SystemRunner};
use uepack_gh::{GithubClient, ReleaseOverrides};

mod pipeline;
mod styles;

use styles as s;

/// The command-line interface for uepack.
#[derive(Debug, Parser)]
#[command(name = "uepack")]
#[command(version)]
#[command(styles = s::get_clap_styles())]
#[command(
    help_template = "{bin} {version}\n\n{about-with-newline}{usage-heading} {usage}\n\n{all-args}{after-help}"
)]
#[command(about = "Package Unreal Engine plugins and projects and publish them to GitHub")]
#[command(
    long_about = "uepack reads uepack.toml, packages the configured plugin against every
listed engine version and the configured project for every listed platform,
zips each build, optionally publishes MkDocs documentation and optionally
creates a GitHub release with every output file attached."
)]
#[command(
    after_help = "\x1b[1;32mExamples:\x1b[0m\n  \x1b[36muepack\x1b[0m                              \x1b[2m# Package using ./uepack.toml\x1b[0m\n  \x1b[36muepack --config ci/uepack.toml\x1b[0m      \x1b[2m# Use another config file\x1b[0m\n  \x1b[36muepack --gh-tag v1.2.0 --gh-prerelease true\x1b[0m"
)]
pub(crate) struct Cli {
    /// Path to the uepack config file.
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,
    /// Version used in the GitHub release name.
    #[arg(long = "gh-version", value_name = "VERSION")]
    gh_version: Option<String>,
    /// Tag created for the GitHub release.
    #[arg(long = "gh-tag", value_name = "TAG")]
    gh_tag: Option<String>,
    /// Commit or branch the release tag is created from.
    #[arg(long = "gh-commit", value_name = "COMMIT")]
    gh_commit: Option<String>,
    /// Mark the GitHub release as a pre-release.
    #[arg(long = "gh-prerelease", value_name = "BOOL", default_value = "false")]
    gh_prerelease: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    debug!("parsed cli arguments: {:?}", cli);

    s::print_banner();

    let overrides = ReleaseOverrides::from_args(
        cli.gh_version,
        cli.gh_tag,
        cli.gh_commit,
        &cli.gh_prerelease,
    );

    let settings = Settings::load(&cli.config)
        .with_context(|| format!("unable to load config '{}'", cli.config.display()))?;

    let client = settings
        .release
        .as_ref()
        .map(GithubClient::from_settings)
        .unwrap_or_else(|| GithubClient::new(""));

    pipeline::run(&settings, &overrides, &SystemRunner, &client)
}
