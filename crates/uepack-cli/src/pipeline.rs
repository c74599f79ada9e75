use anyhow::Result;
use tracing::{info, instrument};

use uepack_core::{tasks, CommandRunner, DocsPublisher, Packager, Plugin, Project, Settings};
use uepack_gh::{ReleaseApi, ReleaseOverrides, RepoRef};

/// Runs every step of a packaging run in order. The first error ends the run.
#[instrument(skip_all)]
pub fn run(
    settings: &Settings,
    overrides: &ReleaseOverrides,
    runner: &dyn CommandRunner,
    api: &dyn ReleaseApi,
) -> Result<()> {
    tasks::run_pre_task(settings, runner)?;

    let packager = Packager::new(settings, runner);
    package_plugin(settings, &packager)?;
    package_project(settings, &packager)?;

    let docs = DocsPublisher::new(settings, runner);
    docs.deploy()?;
    docs.save_pdf()?;
    docs.create_zip()?;

    create_release(settings, overrides, api)?;

    tasks::run_post_task(settings, runner)
}

fn package_plugin(settings: &Settings, packager: &Packager<'_>) -> Result<()> {
    let Some(config) = &settings.plugin else {
        return Ok(());
    };
    let plugin = Plugin::load(&config.manifest, &settings.output_dir)?;
    for version in &config.engine_versions {
        packager.package_plugin(&plugin, version, &config.toolchain_version)?;
    }
    Ok(())
}

fn package_project(settings: &Settings, packager: &Packager<'_>) -> Result<()> {
    let Some(config) = &settings.project else {
        return Ok(());
    };
    let project = Project::load(&config.manifest, &settings.output_dir)?;
    for platform in &config.platforms {
        packager.package_project(&project, &config.engine_version, *platform)?;
    }
    Ok(())
}

fn create_release(
    settings: &Settings,
    overrides: &ReleaseOverrides,
    api: &dyn ReleaseApi,
) -> Result<()> {
    let Some(config) = &settings.release else {
        return Ok(());
    };
    let version = uepack_gh::target_version(settings)?;
    let release = uepack_gh::build_release(config, overrides, &version)?;
    let published =
        uepack_gh::publish(api, &RepoRef::from(config), &release, &settings.output_dir)?;
    info!(target: "uepack", "release {} published", published.id);
    Ok(())
}
