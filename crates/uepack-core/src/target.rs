//! Descriptors for the things uepack packages.
//!
//! A target is read from its own manifest and knows how to name its output:
//! each packaging job substitutes one dimension value (an engine version for
//! plugins, a platform for projects) into the target's [`OutputTemplate`].

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use ini::Ini;
use serde::Deserialize;
use tracing::debug;

use crate::constants::*;
use crate::error::ManifestError;

/// An output path with one unfilled slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    dir: PathBuf,
    prefix: String,
    suffix: String,
    label: &'static str,
}

impl OutputTemplate {
    pub fn new(
        dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        label: &'static str,
    ) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
            label,
        }
    }

    /// The output path for one dimension value.
    pub fn path_for(&self, value: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}{}", self.prefix, value, self.suffix))
    }
}

impl Display for OutputTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = format!("{}{{{}}}{}", self.prefix, self.label, self.suffix);
        write!(f, "{}", self.dir.join(name).display())
    }
}

/// Common view over plugins and projects.
pub trait Target: std::fmt::Debug {
    /// Display name with whitespace removed.
    fn name(&self) -> &str;
    fn version(&self) -> &str;
    /// The `.uplugin` / `.uproject` this target was read from.
    fn manifest(&self) -> &Path;
    fn template(&self) -> &OutputTemplate;

    /// Output directory of the job for `dimension`.
    fn build_path(&self, dimension: &str) -> PathBuf {
        self.template().path_for(dimension)
    }

    /// File stem used for the documentation PDF and site archive.
    fn docs_stem(&self) -> String {
        format!("{}Documentation-v{}", self.name(), self.version())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PluginDescriptor {
    friendly_name: String,
    version_name: String,
}

#[derive(Debug, Clone)]
pub struct Plugin {
    name: String,
    version: String,
    manifest: PathBuf,
    template: OutputTemplate,
}

impl Plugin {
    /// Reads `FriendlyName` and `VersionName` from a `.uplugin` file.
    pub fn load(manifest: &Path, output_dir: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(manifest).map_err(|source| ManifestError::Read {
            path: manifest.to_path_buf(),
            source,
        })?;
        let descriptor: PluginDescriptor =
            serde_json::from_str(&text).map_err(|source| ManifestError::Plugin {
                path: manifest.to_path_buf(),
                source,
            })?;

        let name = strip_whitespace(&descriptor.friendly_name);
        let version = descriptor.version_name;
        let template = OutputTemplate::new(
            output_dir,
            format!("{name}-UE"),
            format!("-v{version}"),
            "engine",
        );
        debug!("loaded plugin {} v{} from {}", name, version, manifest.display());

        Ok(Self {
            name,
            version,
            manifest: manifest.to_path_buf(),
            template,
        })
    }
}

impl Target for Plugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn manifest(&self) -> &Path {
        &self.manifest
    }

    fn template(&self) -> &OutputTemplate {
        &self.template
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    version: String,
    manifest: PathBuf,
    template: OutputTemplate,
}

impl Project {
    /// Reads the project name and version from `Config/DefaultGame.ini` next
    /// to the `.uproject`. A missing ini or key falls back to defaults.
    pub fn load(manifest: &Path, output_dir: &Path) -> Result<Self, ManifestError> {
        let project_dir = manifest.parent().unwrap_or(Path::new(""));
        let ini_path = PROJECT_SETTINGS_INI
            .iter()
            .fold(project_dir.to_path_buf(), |path, part| path.join(part));

        let (name, version) = if ini_path.exists() {
            let ini = Ini::load_from_file_noescape(&ini_path).map_err(|source| {
                ManifestError::ProjectSettings {
                    path: ini_path.clone(),
                    source,
                }
            })?;
            let section = ini.section(Some(PROJECT_SETTINGS_SECTION));
            let get = |key: &str| section.and_then(|props| props.get(key)).map(str::to_string);
            (get("ProjectName"), get("ProjectVersion"))
        } else {
            debug!("{} not found, using fallback project metadata", ini_path.display());
            (None, None)
        };

        let name = strip_whitespace(&name.unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_string()));
        let version = version.unwrap_or_else(|| FALLBACK_PROJECT_VERSION.to_string());
        let template = OutputTemplate::new(
            output_dir,
            format!("{name}-v{version}-"),
            "",
            "platform",
        );

        Ok(Self {
            name,
            version,
            manifest: manifest.to_path_buf(),
            template,
        })
    }
}

impl Target for Project {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn manifest(&self) -> &Path {
        &self.manifest
    }

    fn template(&self) -> &OutputTemplate {
        &self.template
    }
}

fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}
