use std::path::PathBuf;

use thiserror::Error;

/// A violated configuration precondition. Validation stops at the first one.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unreal Engine installation directory not specified in config file")]
    MissingInstallDir,
    #[error("invalid Unreal Engine installation directory: {0}")]
    InstallDirNotFound(PathBuf),
    #[error("output path not specified in config file")]
    MissingOutput,

    #[error("plugin does not exist: {0}")]
    PluginNotFound(PathBuf),
    #[error("invalid plugin path '{0}': must end with .uplugin")]
    InvalidPluginExtension(PathBuf),
    #[error("no Unreal Engine versions specified for the plugin in config file")]
    MissingPluginVersions,
    #[error("invalid Visual Studio version '{0}': only integers are allowed")]
    InvalidToolchainVersion(String),

    #[error("project does not exist: {0}")]
    ProjectNotFound(PathBuf),
    #[error("invalid project path '{0}': must end with .uproject")]
    InvalidProjectExtension(PathBuf),
    #[error("no platforms specified for the project in config file")]
    MissingPlatforms,
    #[error(transparent)]
    UnsupportedPlatform(#[from] PlatformParseError),
    #[error("no Unreal Engine version specified for the project in config file")]
    MissingProjectVersion,

    #[error("Unreal Engine {version} is not installed (expected {path})")]
    EngineNotInstalled { version: String, path: PathBuf },

    #[error("mkdocs integration is enabled but {0} could not be found")]
    MkdocsConfigNotFound(PathBuf),

    #[error("GitHub release is enabled but {0} is not specified in config file")]
    MissingReleaseField(&'static str),
    #[error("release notes file could not be found: {0}")]
    ReleaseNotesNotFound(PathBuf),

    #[error("{kind}-task {path} does not exist")]
    TaskNotFound { kind: &'static str, path: PathBuf },
    #[error("invalid {kind}-task '{path}': only Python scripts are currently supported")]
    InvalidTaskExtension { kind: &'static str, path: PathBuf },

    #[error("output directory {path} must not contain {input}")]
    OutputOverlapsInput { path: PathBuf, input: PathBuf },

    #[error("failed to resolve path '{path}'")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to prepare output directory {path}")]
    OutputReset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
#[error(
    "{0} is not a supported platform. Only Win64, HoloLens, Mac, IOS, Android, Linux, LinuxArm64 and TVOS are supported"
)]
pub struct PlatformParseError(pub String);

/// A target manifest that cannot be turned into a descriptor.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse plugin descriptor {path}")]
    Plugin {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse project settings {path}")]
    ProjectSettings {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },
}

#[derive(Debug, Error)]
pub enum DocsError {
    #[error("PDF file could not be found: {0}")]
    PdfNotFound(PathBuf),
    #[error("documentation could not be found: {0}")]
    SiteNotFound(PathBuf),
}

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("build of {output} failed with {status}")]
    BuildFailed { output: PathBuf, status: String },
}
