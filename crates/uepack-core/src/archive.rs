use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// `<dir>.zip`, the archive that sits next to a job's output directory.
pub fn archive_path_for(dir: &Path) -> PathBuf {
    let mut name = dir.as_os_str().to_owned();
    name.push(".zip");
    PathBuf::from(name)
}

/// Writes the contents of `source` into a new zip at `destination`,
/// replacing any existing file. Entries are relative to `source`.
pub fn zip_dir(source: &Path, destination: &Path) -> Result<()> {
    if !source.is_dir() {
        bail!("cannot archive {}: directory not found", source.display());
    }
    remove_file_if_exists(destination)?;

    let file = File::create(destination)
        .with_context(|| format!("failed to create archive {}", destination.display()))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0usize;
    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .context("archive entry escaped its root")?;
        let name = relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else {
            writer.start_file(name, options)?;
            let mut input = File::open(entry.path())
                .with_context(|| format!("failed to open {}", entry.path().display()))?;
            io::copy(&mut input, &mut writer)?;
            entries += 1;
        }
    }

    writer
        .finish()
        .with_context(|| format!("failed to finish archive {}", destination.display()))?;
    debug!("archived {} files into {}", entries, destination.display());
    Ok(())
}

pub(crate) fn remove_file_if_exists(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
    }
}

pub(crate) fn remove_dir_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
    }
    Ok(())
}
