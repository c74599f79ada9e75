//! Core logic for uepack, the Unreal Engine release packager.
//!
//! This crate owns configuration loading and validation, plugin/project
//! descriptors, the packaging jobs that drive the engine's automation tool,
//! zip archiving, the MkDocs publishing steps and pre/post tasks.

pub mod archive;
pub mod config;
pub mod constants;
pub mod docs;
pub mod error;
pub mod packager;
pub mod platform;
pub mod process;
pub mod target;
pub mod tasks;

pub use config::{PackagerConfig, ReleaseSettings, Settings};
pub use docs::{DocsArtifacts, DocsPublisher};
pub use error::{ConfigError, DocsError, ManifestError, PackageError};
pub use packager::Packager;
pub use platform::Platform;
pub use process::{CommandRunner, Invocation, RunStatus, SystemRunner};
pub use target::{OutputTemplate, Plugin, Project, Target};
