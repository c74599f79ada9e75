//! GitHub release publishing for uepack.
//!
//! Publishing has two phases: create the release, then upload every file in
//! the output directory as an asset. The first failure in either phase ends
//! the publish; nothing already created or uploaded is rolled back.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use uepack_core::{Plugin, Project, ReleaseSettings, Settings, Target};

mod client;

pub use client::GithubClient;

/// `owner/repo` on GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl From<&ReleaseSettings> for RepoRef {
    fn from(settings: &ReleaseSettings) -> Self {
        Self {
            owner: settings.owner.clone(),
            repo: settings.repo.clone(),
        }
    }
}

/// Body of `POST /repos/{owner}/{repo}/releases`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub prerelease: bool,
}

/// The fields of a created release that uepack uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub id: u64,
    pub html_url: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("GitHub responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request to GitHub failed: {0}")]
    Transport(String),
    #[error("unexpected response from GitHub: {0}")]
    Decode(String),
}

/// The two calls a release publish makes.
pub trait ReleaseApi {
    fn create_release(&self, repo: &RepoRef, release: &NewRelease) -> Result<Release, ApiError>;

    fn upload_asset(
        &self,
        repo: &RepoRef,
        release_id: u64,
        name: &str,
        content: &[u8],
    ) -> Result<(), ApiError>;
}

/// Command-line overrides for the release. Blank values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseOverrides {
    pub version: Option<String>,
    pub tag: Option<String>,
    pub commit: Option<String>,
    pub prerelease: bool,
}

impl ReleaseOverrides {
    /// Builds overrides from raw argument values and announces each applied
    /// one on stdout. `prerelease` is true only for `true` (any case).
    pub fn from_args(
        version: Option<String>,
        tag: Option<String>,
        commit: Option<String>,
        prerelease: &str,
    ) -> Self {
        let overrides = Self {
            version: non_blank(version),
            tag: non_blank(tag),
            commit: non_blank(commit),
            prerelease: prerelease.trim().eq_ignore_ascii_case("true"),
        };
        overrides.announce();
        overrides
    }

    fn announce(&self) {
        let values = [
            ("GitHub Version", self.version.as_deref()),
            ("GitHub Tag", self.tag.as_deref()),
            ("GitHub Commit", self.commit.as_deref()),
        ];
        for (name, value) in values {
            if let Some(value) = value {
                println!("Overriding {name}: {value}");
            }
        }
        if self.prerelease {
            println!("Overriding GitHub Pre-Release: true");
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Version of the packaged target: the plugin's if configured, else the
/// project's, else empty.
pub fn target_version(settings: &Settings) -> Result<String> {
    if let Some(plugin) = &settings.plugin {
        return Ok(Plugin::load(&plugin.manifest, &settings.output_dir)?
            .version()
            .to_string());
    }
    if let Some(project) = &settings.project {
        return Ok(Project::load(&project.manifest, &settings.output_dir)?
            .version()
            .to_string());
    }
    Ok(String::new())
}

/// Resolves the release request from settings, overrides and the target
/// version. The body is the release notes file, verbatim.
pub fn build_release(
    settings: &ReleaseSettings,
    overrides: &ReleaseOverrides,
    target_version: &str,
) -> Result<NewRelease> {
    let body = std::fs::read_to_string(&settings.release_notes).with_context(|| {
        format!(
            "failed to read release notes {}",
            settings.release_notes.display()
        )
    })?;

    let version = overrides.version.as_deref().unwrap_or(target_version);
    let tag = overrides.tag.as_deref().unwrap_or(target_version);
    let commit = overrides.commit.as_deref().unwrap_or(&settings.commit);

    Ok(NewRelease {
        tag_name: tag.to_string(),
        target_commitish: commit.to_string(),
        name: format!("Version {version}"),
        body,
        prerelease: overrides.prerelease,
    })
}

/// Files directly inside `output_dir`, sorted by name. Subdirectories are
/// skipped.
pub fn release_assets(output_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(output_dir)
        .with_context(|| format!("failed to list {}", output_dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", output_dir.display()))?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Creates the release and uploads every output file. Returns the release.
#[instrument(skip(api, release))]
pub fn publish(
    api: &dyn ReleaseApi,
    repo: &RepoRef,
    release: &NewRelease,
    output_dir: &Path,
) -> Result<Release> {
    println!("\nCreating new release on GitHub");
    let created = api.create_release(repo, release).map_err(|e| {
        error!("{}", e);
        anyhow::Error::new(e).context("failed to create release")
    })?;
    println!("Release {} created", created.id);
    info!(target: "uepack", "created release {} ({})", created.id, release.tag_name);

    for path in release_assets(output_dir)? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("Uploading {name}");
        let content =
            std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        debug!("uploading {} bytes as {}", content.len(), name);
        api.upload_asset(repo, created.id, &name, &content)
            .map_err(|e| {
                error!("{}", e);
                anyhow::Error::new(e).context(format!("failed to upload {name}"))
            })?;
        println!("Uploaded {name}");
    }

    println!("Release created: {}", created.html_url);
    Ok(created)
}
