use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::archive::{archive_path_for, remove_dir_if_exists, zip_dir};
use crate::config::Settings;
use crate::constants::{UAT_DIR, UAT_SCRIPT};
use crate::error::PackageError;
use crate::platform::Platform;
use crate::process::{CommandRunner, Invocation};
use crate::target::{Plugin, Project, Target};

/// Runs packaging jobs: one build tool invocation plus one zip per
/// (target, dimension value) pair.
#[derive(Debug)]
pub struct Packager<'a> {
    settings: &'a Settings,
    runner: &'a dyn CommandRunner,
}

impl<'a> Packager<'a> {
    pub fn new(settings: &'a Settings, runner: &'a dyn CommandRunner) -> Self {
        Self { settings, runner }
    }

    /// Packages `plugin` with one engine version. Returns the archive path.
    #[instrument(skip(self, plugin), fields(plugin = plugin.name()))]
    pub fn package_plugin(
        &self,
        plugin: &Plugin,
        engine_version: &str,
        toolchain_version: &str,
    ) -> Result<PathBuf> {
        let output = plugin.build_path(engine_version);
        println!("\nPackaging plugin using Unreal Engine {engine_version}");
        println!("Plugin : {}", plugin.manifest().display());
        println!("Output : {}", output.display());

        let invocation = Invocation::new(self.uat_script(engine_version))
            .arg("BuildPlugin")
            .arg(format!("-Plugin={}", plugin.manifest().display()))
            .arg(format!("-Package={}", output.display()))
            .arg(format!("-VS{toolchain_version}"))
            .arg("-Rocket");

        self.run_job(&output, &invocation)
    }

    /// Packages `project` for one platform with the configured engine version.
    #[instrument(skip(self, project), fields(project = project.name()))]
    pub fn package_project(
        &self,
        project: &Project,
        engine_version: &str,
        platform: Platform,
    ) -> Result<PathBuf> {
        let output = project.build_path(platform.as_str());
        println!("\nPackaging project using Unreal Engine {engine_version}");
        println!("Project : {}", project.manifest().display());
        println!("Output : {}", output.display());

        let invocation = Invocation::new(self.uat_script(engine_version))
            .arg("BuildCookRun")
            .arg(format!("-project={}", project.manifest().display()))
            .arg(format!("-targetplatform={platform}"))
            .arg("-cook")
            .arg("-allmaps")
            .arg("-build")
            .arg("-stage")
            .arg("-pak")
            .arg("-archive")
            .arg(format!("-archivedirectory={}", output.display()));

        self.run_job(&output, &invocation)
    }

    fn uat_script(&self, engine_version: &str) -> PathBuf {
        UAT_DIR
            .iter()
            .fold(self.settings.engine_dir(engine_version), |path, part| {
                path.join(part)
            })
            .join(UAT_SCRIPT)
    }

    fn run_job(&self, output: &Path, invocation: &Invocation) -> Result<PathBuf> {
        remove_dir_if_exists(output)?;

        println!("\nExecuting command : {invocation}\n");
        let status = self.runner.run(invocation)?;
        if !status.success() {
            if self.settings.strict_builds {
                return Err(PackageError::BuildFailed {
                    output: output.to_path_buf(),
                    status: status.to_string(),
                }
                .into());
            }
            // The build tool reports its own errors; archiving goes ahead.
            warn!("build tool finished with {} for {}", status, output.display());
        }

        let archive = archive_path_for(output);
        zip_dir(output, &archive)
            .with_context(|| format!("failed to archive {}", output.display()))?;
        info!(target: "uepack", "packaged {}", archive.display());
        Ok(archive)
    }
}
