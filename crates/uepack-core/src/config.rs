use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, instrument};

use crate::constants::*;
use crate::error::ConfigError;
use crate::platform::Platform;

/// Raw contents of `uepack.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
pub struct PackagerConfig {
    #[serde(default)]
    pub environment: EnvironmentSection,
    #[serde(default)]
    pub plugin: PluginSection,
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub mkdocs: MkdocsSection,
    #[serde(default)]
    pub github: GithubSection,
    #[serde(default)]
    pub tasks: TasksSection,
}

impl PackagerConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str::<Self>(text)?)
    }

    /// Fills a blank `github.token` from `GITHUB_TOKEN`.
    pub fn apply_env(&mut self) {
        if is_blank(&self.github.token) {
            if let Ok(token) = std::env::var("GITHUB_TOKEN") {
                debug!("using GITHUB_TOKEN from the environment");
                self.github.token = token;
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EnvironmentSection {
    #[serde(default)]
    pub unreal_install_dir: String,
    #[serde(default)]
    pub output: String,
    /// Fail the run when the build tool exits unsuccessfully.
    #[serde(default)]
    pub strict_builds: Flag,
}

#[derive(Debug, Deserialize)]
pub struct PluginSection {
    #[serde(default)]
    pub path: String,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub unreal_versions: Vec<String>,
    #[serde(
        default = "default_toolchain_version",
        deserialize_with = "deserialize_text"
    )]
    pub visual_studio: String,
}

impl Default for PluginSection {
    fn default() -> Self {
        Self {
            path: String::new(),
            unreal_versions: Vec::new(),
            visual_studio: default_toolchain_version(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectSection {
    #[serde(default)]
    pub path: String,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub platforms: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub unreal_version: String,
}

#[derive(Debug, Deserialize)]
pub struct MkdocsSection {
    #[serde(default = "default_docs_path")]
    pub path: String,
    #[serde(default)]
    pub auto_deploy: Flag,
    #[serde(default)]
    pub include_pdf: Flag,
    #[serde(default)]
    pub create_zip: Flag,
}

impl Default for MkdocsSection {
    fn default() -> Self {
        Self {
            path: default_docs_path(),
            auto_deploy: Flag::default(),
            include_pdf: Flag::default(),
            create_zip: Flag::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GithubSection {
    #[serde(default)]
    pub create_release: Flag,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub commit: String,
    #[serde(default)]
    pub release_notes: String,
    /// REST API root, for GitHub Enterprise hosts.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_uploads_url")]
    pub uploads_url: String,
}

impl Default for GithubSection {
    fn default() -> Self {
        Self {
            create_release: Flag::default(),
            owner: String::new(),
            repo: String::new(),
            token: String::new(),
            commit: String::new(),
            release_notes: String::new(),
            api_url: default_api_url(),
            uploads_url: default_uploads_url(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TasksSection {
    pub pre: Option<String>,
    pub post: Option<String>,
}

fn default_toolchain_version() -> String {
    DEFAULT_TOOLCHAIN_VERSION.to_string()
}

fn default_docs_path() -> String {
    DEFAULT_DOCS_PATH.to_string()
}

fn default_api_url() -> String {
    GITHUB_API_URL.to_string()
}

fn default_uploads_url() -> String {
    GITHUB_UPLOADS_URL.to_string()
}

/// A boolean switch. Accepts TOML booleans or strings; see [`parse_flag`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flag(pub bool);

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Bool(value) => Flag(value),
            Raw::Text(text) => Flag(parse_flag(&text)),
        })
    }
}

/// Truthiness rule for string switches: only `false` (ignoring case and
/// whitespace) is false, everything else is true.
pub fn parse_flag(value: &str) -> bool {
    let normalized: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    !normalized.eq_ignore_ascii_case("false")
}

/// Splits a comma-separated list, dropping whitespace and empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').filter_map(normalize_item).collect()
}

fn normalize_item(value: &str) -> Option<String> {
    let item: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    (!item.is_empty()).then_some(item)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Int(value) => value.to_string(),
        }
    }
}

fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Scalar::deserialize(deserializer)?.into_string())
}

fn deserialize_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<Scalar>),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::List(items) => items
            .into_iter()
            .filter_map(|item| normalize_item(&item.into_string()))
            .collect(),
        Raw::Text(text) => split_list(&text),
    })
}

/// Validated, immutable settings for one run. Every path is absolute.
#[derive(Debug, Clone)]
pub struct Settings {
    pub install_dir: PathBuf,
    pub output_dir: PathBuf,
    pub strict_builds: bool,
    pub plugin: Option<PluginSettings>,
    pub project: Option<ProjectSettings>,
    pub docs: DocsSettings,
    pub release: Option<ReleaseSettings>,
    pub tasks: TaskSettings,
}

#[derive(Debug, Clone)]
pub struct PluginSettings {
    pub manifest: PathBuf,
    pub engine_versions: Vec<String>,
    pub toolchain_version: String,
}

#[derive(Debug, Clone)]
pub struct ProjectSettings {
    pub manifest: PathBuf,
    pub platforms: Vec<Platform>,
    pub engine_version: String,
}

#[derive(Debug, Clone)]
pub struct DocsSettings {
    pub path: PathBuf,
    pub auto_deploy: bool,
    pub include_pdf: bool,
    pub create_zip: bool,
}

impl DocsSettings {
    pub fn any_enabled(&self) -> bool {
        self.auto_deploy || self.include_pdf || self.create_zip
    }
}

#[derive(Debug, Clone)]
pub struct ReleaseSettings {
    pub owner: String,
    pub repo: String,
    pub token: String,
    pub commit: String,
    pub release_notes: PathBuf,
    pub api_url: String,
    pub uploads_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct TaskSettings {
    pub pre: Option<PathBuf>,
    pub post: Option<PathBuf>,
}

impl Settings {
    /// Loads `path` and validates it, resolving relative paths against the
    /// directory that contains the config file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = PackagerConfig::load_from_file(path)?;
        config.apply_env();
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Ok(Self::verify(config, base_dir)?)
    }

    /// Validates `config` and prepares the output directory.
    ///
    /// All checks run before the output directory is touched, including that
    /// it holds none of the configured inputs. On success the previous output
    /// directory has been replaced by an empty one.
    #[instrument(skip(config))]
    pub fn verify(config: PackagerConfig, base_dir: &Path) -> Result<Self, ConfigError> {
        let base_dir = std::path::absolute(base_dir).map_err(|source| ConfigError::Resolve {
            path: base_dir.to_path_buf(),
            source,
        })?;
        let PackagerConfig {
            environment,
            plugin,
            project,
            mkdocs,
            github,
            tasks,
        } = config;

        if is_blank(&environment.unreal_install_dir) {
            return Err(ConfigError::MissingInstallDir);
        }
        let install_dir = resolve(&base_dir, &environment.unreal_install_dir);
        if !install_dir.exists() {
            return Err(ConfigError::InstallDirNotFound(install_dir));
        }

        if is_blank(&environment.output) {
            return Err(ConfigError::MissingOutput);
        }
        let output_dir = resolve(&base_dir, &environment.output);

        let plugin = verify_plugin(plugin, &base_dir, &install_dir)?;
        let project = verify_project(project, &base_dir, &install_dir)?;

        let docs = DocsSettings {
            path: resolve(&base_dir, &mkdocs.path),
            auto_deploy: mkdocs.auto_deploy.0,
            include_pdf: mkdocs.include_pdf.0,
            create_zip: mkdocs.create_zip.0,
        };
        if docs.any_enabled() {
            let mkdocs_config = docs.path.join(MKDOCS_CONFIG);
            if !mkdocs_config.exists() {
                return Err(ConfigError::MkdocsConfigNotFound(mkdocs_config));
            }
        }

        let release = verify_release(github, &base_dir)?;

        let tasks = TaskSettings {
            pre: verify_task("pre", tasks.pre, &base_dir)?,
            post: verify_task("post", tasks.post, &base_dir)?,
        };

        let mut inputs = vec![base_dir.as_path(), install_dir.as_path()];
        inputs.extend(plugin.as_ref().map(|p| p.manifest.as_path()));
        inputs.extend(project.as_ref().map(|p| p.manifest.as_path()));
        if docs.any_enabled() {
            inputs.push(docs.path.as_path());
        }
        inputs.extend(release.as_ref().map(|r| r.release_notes.as_path()));
        inputs.extend(tasks.pre.as_deref());
        inputs.extend(tasks.post.as_deref());
        ensure_output_is_disjoint(&output_dir, &inputs)?;

        reset_output_dir(&output_dir)?;

        Ok(Self {
            install_dir,
            output_dir,
            strict_builds: environment.strict_builds.0,
            plugin,
            project,
            docs,
            release,
            tasks,
        })
    }

    /// Root of an installed engine version, e.g. `<install>/UE_5.3`.
    pub fn engine_dir(&self, version: &str) -> PathBuf {
        engine_dir(&self.install_dir, version)
    }
}

fn verify_plugin(
    section: PluginSection,
    base_dir: &Path,
    install_dir: &Path,
) -> Result<Option<PluginSettings>, ConfigError> {
    if is_blank(&section.path) {
        return Ok(None);
    }

    let manifest = resolve(base_dir, &section.path);
    if !manifest.exists() {
        return Err(ConfigError::PluginNotFound(manifest));
    }
    if !has_extension(&manifest, PLUGIN_EXTENSION) {
        return Err(ConfigError::InvalidPluginExtension(manifest));
    }
    if section.unreal_versions.is_empty() {
        return Err(ConfigError::MissingPluginVersions);
    }
    for version in &section.unreal_versions {
        ensure_engine_installed(install_dir, version)?;
    }

    let toolchain_version = section.visual_studio.trim().to_string();
    if toolchain_version.is_empty() || !toolchain_version.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidToolchainVersion(section.visual_studio));
    }

    Ok(Some(PluginSettings {
        manifest,
        engine_versions: section.unreal_versions,
        toolchain_version,
    }))
}

fn verify_project(
    section: ProjectSection,
    base_dir: &Path,
    install_dir: &Path,
) -> Result<Option<ProjectSettings>, ConfigError> {
    if is_blank(&section.path) {
        return Ok(None);
    }

    let manifest = resolve(base_dir, &section.path);
    if !manifest.exists() {
        return Err(ConfigError::ProjectNotFound(manifest));
    }
    if !has_extension(&manifest, PROJECT_EXTENSION) {
        return Err(ConfigError::InvalidProjectExtension(manifest));
    }
    if section.platforms.is_empty() {
        return Err(ConfigError::MissingPlatforms);
    }
    let platforms = section
        .platforms
        .iter()
        .map(|value| Platform::from_str(value))
        .collect::<Result<Vec<_>, _>>()?;

    let engine_version = section.unreal_version.trim().to_string();
    if engine_version.is_empty() {
        return Err(ConfigError::MissingProjectVersion);
    }
    ensure_engine_installed(install_dir, &engine_version)?;

    Ok(Some(ProjectSettings {
        manifest,
        platforms,
        engine_version,
    }))
}

fn verify_release(
    section: GithubSection,
    base_dir: &Path,
) -> Result<Option<ReleaseSettings>, ConfigError> {
    if !section.create_release.0 {
        return Ok(None);
    }

    let required = [
        ("owner", &section.owner),
        ("repo", &section.repo),
        ("token", &section.token),
        ("commit", &section.commit),
        ("release notes file", &section.release_notes),
        ("api_url", &section.api_url),
        ("uploads_url", &section.uploads_url),
    ];
    if let Some((name, _)) = required.into_iter().find(|(_, value)| is_blank(value)) {
        return Err(ConfigError::MissingReleaseField(name));
    }

    let release_notes = resolve(base_dir, &section.release_notes);
    if !release_notes.exists() {
        return Err(ConfigError::ReleaseNotesNotFound(release_notes));
    }

    Ok(Some(ReleaseSettings {
        owner: section.owner.trim().to_string(),
        repo: section.repo.trim().to_string(),
        token: section.token.trim().to_string(),
        commit: section.commit.trim().to_string(),
        release_notes,
        api_url: section.api_url.trim().to_string(),
        uploads_url: section.uploads_url.trim().to_string(),
    }))
}

fn verify_task(
    kind: &'static str,
    raw: Option<String>,
    base_dir: &Path,
) -> Result<Option<PathBuf>, ConfigError> {
    let Some(raw) = raw.filter(|value| !is_blank(value)) else {
        return Ok(None);
    };

    let path = resolve(base_dir, &raw);
    if !path.exists() {
        return Err(ConfigError::TaskNotFound { kind, path });
    }
    if !has_extension(&path, TASK_EXTENSION) {
        return Err(ConfigError::InvalidTaskExtension { kind, path });
    }
    Ok(Some(path))
}

fn ensure_engine_installed(install_dir: &Path, version: &str) -> Result<(), ConfigError> {
    let path = engine_dir(install_dir, version);
    if path.exists() {
        return Ok(());
    }
    Err(ConfigError::EngineNotInstalled {
        version: version.to_string(),
        path,
    })
}

/// The output directory is wiped, so it must not be or contain any input.
fn ensure_output_is_disjoint(output_dir: &Path, inputs: &[&Path]) -> Result<(), ConfigError> {
    match inputs.iter().find(|input| input.starts_with(output_dir)) {
        Some(input) => Err(ConfigError::OutputOverlapsInput {
            path: output_dir.to_path_buf(),
            input: input.to_path_buf(),
        }),
        None => Ok(()),
    }
}

fn reset_output_dir(output_dir: &Path) -> Result<(), ConfigError> {
    let wrap = |source| ConfigError::OutputReset {
        path: output_dir.to_path_buf(),
        source,
    };
    if output_dir.exists() {
        info!(target: "uepack", "removing previous output {}", output_dir.display());
        std::fs::remove_dir_all(output_dir).map_err(wrap)?;
    }
    std::fs::create_dir_all(output_dir).map_err(wrap)
}

pub(crate) fn engine_dir(install_dir: &Path, version: &str) -> PathBuf {
    install_dir.join(format!("{ENGINE_DIR_PREFIX}{version}"))
}

fn resolve(base_dir: &Path, raw: &str) -> PathBuf {
    base_dir.join(raw.trim()).components().collect()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.to_string_lossy().ends_with(extension)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Engine installs for 5.3/5.4, a plugin and a project under one temp dir.
    pub(crate) fn workspace() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("engines/UE_5.3")).unwrap();
        fs::create_dir_all(root.join("engines/UE_5.4")).unwrap();
        fs::create_dir_all(root.join("MyPlugin")).unwrap();
        fs::write(
            root.join("MyPlugin/MyPlugin.uplugin"),
            r#"{ "FriendlyName": "My Plugin", "VersionName": "1.2.0" }"#,
        )
        .unwrap();
        fs::create_dir_all(root.join("Game/Config")).unwrap();
        fs::write(root.join("Game/Game.uproject"), "{}").unwrap();
        fs::write(
            root.join("Game/Config/DefaultGame.ini"),
            "[/Script/EngineSettings.GeneralProjectSettings]\nProjectName=Space Game\nProjectVersion=0.3.1\n",
        )
        .unwrap();
        dir
    }

    fn minimal(extra: &str) -> PackagerConfig {
        let text = format!(
            "[environment]\nunreal_install_dir = \"engines\"\noutput = \"out\"\n{extra}"
        );
        PackagerConfig::from_toml(&text).expect("fixture config should parse")
    }

    #[test]
    fn flag_parsing_follows_false_only_rule() {
        assert!(!parse_flag("false"));
        assert!(!parse_flag("False"));
        assert!(!parse_flag(" false "));
        assert!(!parse_flag("FA LSE"));
        assert!(parse_flag("true"));
        assert!(parse_flag("yes"));
        assert!(parse_flag("0"));
        assert!(parse_flag(""));
    }

    #[test]
    fn flags_accept_booleans_strings_and_defaults() {
        let cfg = PackagerConfig::from_toml(
            r#"
            [mkdocs]
            auto_deploy = true
            include_pdf = " False "
            create_zip = "on"
            "#,
        )
        .unwrap();
        assert!(cfg.mkdocs.auto_deploy.0);
        assert!(!cfg.mkdocs.include_pdf.0);
        assert!(cfg.mkdocs.create_zip.0);
        assert!(!cfg.github.create_release.0);
    }

    #[test]
    fn lists_accept_arrays_and_comma_strings() {
        let cfg = PackagerConfig::from_toml(
            r#"
            [plugin]
            unreal_versions = ["5.3", " 5.4 ", ""]
            visual_studio = 2022

            [project]
            platforms = "Win64, Linux,,"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.plugin.unreal_versions, vec!["5.3", "5.4"]);
        assert_eq!(cfg.plugin.visual_studio, "2022");
        assert_eq!(cfg.project.platforms, vec!["Win64", "Linux"]);
    }

    #[test]
    fn absent_sections_use_documented_defaults() {
        let cfg = PackagerConfig::from_toml("").unwrap();
        assert_eq!(cfg.plugin.visual_studio, "2019");
        assert_eq!(cfg.mkdocs.path, ".");
        assert!(cfg.tasks.pre.is_none());
        assert!(!cfg.environment.strict_builds.0);
    }

    #[test]
    fn verify_resolves_absolute_paths_and_recreates_output() {
        let dir = workspace();
        let stale = dir.path().join("out/stale.zip");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, b"old").unwrap();

        let cfg = minimal(
            r#"
            [plugin]
            path = "MyPlugin/MyPlugin.uplugin"
            unreal_versions = ["5.3", "5.4"]

            [project]
            path = "Game/Game.uproject"
            platforms = ["Win64", "Linux"]
            unreal_version = "5.4"
            "#,
        );
        let settings = Settings::verify(cfg, dir.path()).expect("config should verify");

        assert!(settings.install_dir.is_absolute());
        assert!(settings.output_dir.is_absolute());
        assert!(settings.docs.path.is_absolute());
        let plugin = settings.plugin.as_ref().unwrap();
        assert!(plugin.manifest.is_absolute() && plugin.manifest.exists());
        assert_eq!(plugin.toolchain_version, "2019");
        let project = settings.project.as_ref().unwrap();
        assert_eq!(project.platforms, vec![Platform::Win64, Platform::Linux]);

        assert!(settings.output_dir.is_dir());
        assert!(!stale.exists());
        assert_eq!(fs::read_dir(&settings.output_dir).unwrap().count(), 0);
    }

    #[test]
    fn missing_install_dir_is_reported_first() {
        let dir = workspace();
        let cfg = PackagerConfig::from_toml("[environment]\noutput = \"out\"").unwrap();
        let err = Settings::verify(cfg, dir.path()).expect_err("must fail");
        assert!(matches!(err, ConfigError::MissingInstallDir));
    }

    #[test]
    fn failed_validation_leaves_output_untouched() {
        let dir = workspace();
        let keep = dir.path().join("out/keep.txt");
        fs::create_dir_all(keep.parent().unwrap()).unwrap();
        fs::write(&keep, b"keep").unwrap();

        let cfg = minimal(
            r#"
            [plugin]
            path = "MyPlugin/MyPlugin.uplugin"
            unreal_versions = ["5.3", "5.5"]
            "#,
        );
        let err = Settings::verify(cfg, dir.path()).expect_err("must fail");
        assert!(matches!(
            err,
            ConfigError::EngineNotInstalled { ref version, .. } if version == "5.5"
        ));
        assert!(keep.exists());
    }

    #[test]
    fn output_must_not_contain_inputs() {
        let dir = workspace();
        let plugin = "[plugin]\npath = \"MyPlugin/MyPlugin.uplugin\"\nunreal_versions = \"5.3\"";

        for output in [".", "MyPlugin", "engines"] {
            let text = format!(
                "[environment]\nunreal_install_dir = \"engines\"\noutput = \"{output}\"\n{plugin}"
            );
            let cfg = PackagerConfig::from_toml(&text).unwrap();
            let err = Settings::verify(cfg, dir.path()).expect_err("must fail");
            assert!(
                matches!(err, ConfigError::OutputOverlapsInput { .. }),
                "output {output} gave {err}"
            );
        }

        assert!(dir.path().join("MyPlugin/MyPlugin.uplugin").exists());
        assert!(dir.path().join("engines/UE_5.3").is_dir());
    }

    #[test]
    fn output_may_not_hold_release_notes_or_tasks() {
        let dir = workspace();
        fs::create_dir_all(dir.path().join("out")).unwrap();
        fs::write(dir.path().join("out/pre.py"), "").unwrap();
        let err = Settings::verify(minimal("[tasks]\npre = \"out/pre.py\""), dir.path())
            .expect_err("must fail");
        assert!(matches!(
            err,
            ConfigError::OutputOverlapsInput { ref input, .. } if input.ends_with("out/pre.py")
        ));
        assert!(dir.path().join("out/pre.py").exists());

        // A sibling whose name starts with the output name is not inside it.
        fs::write(dir.path().join("outline.py"), "").unwrap();
        let settings =
            Settings::verify(minimal("[tasks]\npre = \"outline.py\""), dir.path()).unwrap();
        assert!(settings.tasks.pre.is_some());
    }

    #[test]
    fn plugin_requires_uplugin_extension_and_digit_toolchain() {
        let dir = workspace();
        let cfg = minimal("[plugin]\npath = \"Game/Game.uproject\"\nunreal_versions = \"5.3\"");
        let err = Settings::verify(cfg, dir.path()).expect_err("must fail");
        assert!(matches!(err, ConfigError::InvalidPluginExtension(_)));

        let cfg = minimal(
            "[plugin]\npath = \"MyPlugin/MyPlugin.uplugin\"\nunreal_versions = \"5.3\"\nvisual_studio = \"vs2022\"",
        );
        let err = Settings::verify(cfg, dir.path()).expect_err("must fail");
        assert!(matches!(err, ConfigError::InvalidToolchainVersion(_)));
    }

    #[test]
    fn plugin_requires_engine_versions() {
        let dir = workspace();
        let cfg = minimal("[plugin]\npath = \"MyPlugin/MyPlugin.uplugin\"");
        let err = Settings::verify(cfg, dir.path()).expect_err("must fail");
        assert!(matches!(err, ConfigError::MissingPluginVersions));
    }

    #[test]
    fn project_rejects_unsupported_platform_by_name() {
        let dir = workspace();
        let cfg = minimal(
            "[project]\npath = \"Game/Game.uproject\"\nplatforms = [\"Win64\", \"Switch\"]\nunreal_version = \"5.4\"",
        );
        let err = Settings::verify(cfg, dir.path()).expect_err("must fail");
        assert!(err.to_string().contains("Switch is not a supported platform"));
    }

    #[test]
    fn project_requires_engine_version() {
        let dir = workspace();
        let cfg = minimal("[project]\npath = \"Game/Game.uproject\"\nplatforms = \"Win64\"");
        let err = Settings::verify(cfg, dir.path()).expect_err("must fail");
        assert!(matches!(err, ConfigError::MissingProjectVersion));
    }

    #[test]
    fn docs_flags_require_mkdocs_config() {
        let dir = workspace();
        let cfg = minimal("[mkdocs]\npath = \"docs\"\ninclude_pdf = \"true\"");
        let err = Settings::verify(cfg, dir.path()).expect_err("must fail");
        assert!(matches!(err, ConfigError::MkdocsConfigNotFound(_)));

        // Disabled docs never look at the path.
        let cfg = minimal("[mkdocs]\npath = \"docs\"");
        assert!(Settings::verify(cfg, dir.path()).is_ok());
    }

    #[test]
    fn release_requires_every_field() {
        let dir = workspace();
        fs::write(dir.path().join("NOTES.md"), "notes").unwrap();
        let cfg = minimal(
            r#"
            [github]
            create_release = "true"
            owner = "acme"
            repo = "plugin"
            commit = "main"
            release_notes = "NOTES.md"
            "#,
        );
        let err = Settings::verify(cfg, dir.path()).expect_err("must fail");
        assert!(matches!(err, ConfigError::MissingReleaseField("token")));

        let cfg = minimal(
            r#"
            [github]
            create_release = true
            owner = "acme"
            repo = "plugin"
            token = "secret"
            commit = "main"
            release_notes = "NOTES.md"
            "#,
        );
        let settings = Settings::verify(cfg, dir.path()).unwrap();
        let release = settings.release.unwrap();
        assert_eq!(release.release_notes, dir.path().join("NOTES.md"));
    }

    #[test]
    fn release_hosts_default_to_github_and_can_be_overridden() {
        let dir = workspace();
        fs::write(dir.path().join("NOTES.md"), "notes").unwrap();
        let github = r#"
            [github]
            create_release = true
            owner = "acme"
            repo = "plugin"
            token = "secret"
            commit = "main"
            release_notes = "NOTES.md"
            "#;

        let settings = Settings::verify(minimal(github), dir.path()).unwrap();
        let release = settings.release.unwrap();
        assert_eq!(release.api_url, "https://api.github.com");
        assert_eq!(release.uploads_url, "https://uploads.github.com");

        let text = format!(
            "{github}api_url = \"https://ghe.example.com/api/v3\"\nuploads_url = \"https://ghe.example.com/api/uploads\"\n"
        );
        let settings = Settings::verify(minimal(&text), dir.path()).unwrap();
        let release = settings.release.unwrap();
        assert_eq!(release.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(release.uploads_url, "https://ghe.example.com/api/uploads");

        let text = format!("{github}api_url = \" \"\n");
        let err = Settings::verify(minimal(&text), dir.path()).expect_err("must fail");
        assert!(matches!(err, ConfigError::MissingReleaseField("api_url")));
    }

    #[test]
    fn tasks_must_exist_and_be_python() {
        let dir = workspace();
        fs::write(dir.path().join("pre.sh"), "echo").unwrap();
        let cfg = minimal("[tasks]\npre = \"pre.sh\"");
        let err = Settings::verify(cfg, dir.path()).expect_err("must fail");
        assert!(matches!(err, ConfigError::InvalidTaskExtension { kind: "pre", .. }));

        let cfg = minimal("[tasks]\npost = \"missing.py\"");
        let err = Settings::verify(cfg, dir.path()).expect_err("must fail");
        assert!(matches!(err, ConfigError::TaskNotFound { kind: "post", .. }));

        let cfg = minimal("[tasks]\npre = \"   \"");
        let settings = Settings::verify(cfg, dir.path()).unwrap();
        assert!(settings.tasks.pre.is_none());
    }

    #[test]
    fn load_resolves_against_config_directory() {
        let dir = workspace();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "[environment]\nunreal_install_dir = \"engines\"\noutput = \"build/out\"\n",
        )
        .unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.output_dir, dir.path().join("build/out"));
        assert!(settings.output_dir.is_dir());
    }
}
