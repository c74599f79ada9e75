//! Constants used across the uepack workspace.

/// The filename for uepack's configuration.
pub const CONFIG_FILE: &str = "uepack.toml";

/// Required extension of a plugin descriptor.
pub const PLUGIN_EXTENSION: &str = ".uplugin";
/// Required extension of a project descriptor.
pub const PROJECT_EXTENSION: &str = ".uproject";
/// Required extension of pre/post task scripts.
pub const TASK_EXTENSION: &str = ".py";

/// Interpreter used to run pre/post tasks.
pub const TASK_INTERPRETER: &str = "python";

/// Prefix of an engine installation directory, e.g. `UE_5.3`.
pub const ENGINE_DIR_PREFIX: &str = "UE_";

/// Location of the automation tool inside an engine installation.
pub const UAT_DIR: [&str; 3] = ["Engine", "Build", "BatchFiles"];
#[cfg(windows)]
pub const UAT_SCRIPT: &str = "RunUAT.bat";
#[cfg(not(windows))]
pub const UAT_SCRIPT: &str = "RunUAT.sh";

/// Project settings file, relative to the `.uproject` directory.
pub const PROJECT_SETTINGS_INI: [&str; 2] = ["Config", "DefaultGame.ini"];
pub const PROJECT_SETTINGS_SECTION: &str = "/Script/EngineSettings.GeneralProjectSettings";
pub const FALLBACK_PROJECT_NAME: &str = "UnrealProject";
pub const FALLBACK_PROJECT_VERSION: &str = "1.0.0";

/// MkDocs layout.
pub const MKDOCS_CONFIG: &str = "mkdocs.yml";
pub const MKDOCS_SITE_DIR: &str = "site";
pub const MKDOCS_PDF: [&str; 3] = ["site", "pdf", "document.pdf"];
pub const MKDOCS_PROGRAM: &str = "mkdocs";

pub const DEFAULT_TOOLCHAIN_VERSION: &str = "2019";
pub const DEFAULT_DOCS_PATH: &str = ".";

/// Public GitHub hosts.
pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_UPLOADS_URL: &str = "https://uploads.github.com";
