use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::archive::{remove_file_if_exists, zip_dir};
use crate::config::Settings;
use crate::constants::*;
use crate::error::DocsError;
use crate::process::{CommandRunner, Invocation};
use crate::target::{Plugin, Project, Target};

/// Where the documentation PDF and site archive land in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsArtifacts {
    pub pdf: PathBuf,
    pub archive: PathBuf,
}

impl DocsArtifacts {
    /// Named after the plugin when one is configured, otherwise after the
    /// project, otherwise plain `Documentation`.
    pub fn resolve(settings: &Settings) -> Result<Self> {
        let stem = if let Some(plugin) = &settings.plugin {
            Plugin::load(&plugin.manifest, &settings.output_dir)?.docs_stem()
        } else if let Some(project) = &settings.project {
            Project::load(&project.manifest, &settings.output_dir)?.docs_stem()
        } else {
            "Documentation".to_string()
        };

        Ok(Self {
            pdf: settings.output_dir.join(format!("{stem}.pdf")),
            archive: settings.output_dir.join(format!("{stem}.zip")),
        })
    }
}

/// The three optional MkDocs steps, each gated by its own flag.
#[derive(Debug)]
pub struct DocsPublisher<'a> {
    settings: &'a Settings,
    runner: &'a dyn CommandRunner,
}

impl<'a> DocsPublisher<'a> {
    pub fn new(settings: &'a Settings, runner: &'a dyn CommandRunner) -> Self {
        Self { settings, runner }
    }

    /// Runs `mkdocs gh-deploy`. Its exit status is not inspected.
    #[instrument(skip(self))]
    pub fn deploy(&self) -> Result<()> {
        if !self.settings.docs.auto_deploy {
            return Ok(());
        }
        println!("Deploying documentation");
        let config = self.settings.docs.path.join(MKDOCS_CONFIG);
        let invocation = Invocation::new(MKDOCS_PROGRAM)
            .arg("gh-deploy")
            .arg("--force")
            .arg("--config-file")
            .arg(config.display().to_string());
        let status = self.runner.run(&invocation)?;
        info!(target: "uepack", "mkdocs gh-deploy finished with {}", status);
        Ok(())
    }

    /// Copies the generated PDF into the output directory.
    #[instrument(skip(self))]
    pub fn save_pdf(&self) -> Result<()> {
        if !self.settings.docs.include_pdf {
            return Ok(());
        }
        println!("Copying documentation PDF to output directory");
        let pdf = MKDOCS_PDF
            .iter()
            .fold(self.settings.docs.path.clone(), |path, part| path.join(part));
        if !pdf.is_file() {
            return Err(DocsError::PdfNotFound(pdf).into());
        }

        let destination = DocsArtifacts::resolve(self.settings)?.pdf;
        remove_file_if_exists(&destination)?;
        std::fs::copy(&pdf, &destination).with_context(|| {
            format!("failed to copy {} to {}", pdf.display(), destination.display())
        })?;
        Ok(())
    }

    /// Zips the generated site into the output directory.
    #[instrument(skip(self))]
    pub fn create_zip(&self) -> Result<()> {
        if !self.settings.docs.create_zip {
            return Ok(());
        }
        println!("Creating ZIP for documentation website");
        let site = self.settings.docs.path.join(MKDOCS_SITE_DIR);
        if !site.is_dir() {
            return Err(DocsError::SiteNotFound(site).into());
        }

        let destination = DocsArtifacts::resolve(self.settings)?.archive;
        zip_dir(&site, &destination)
    }
}
