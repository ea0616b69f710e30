use crate::error::{ProcessingError, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::ZipArchive;

/// Where an archive under a source tree lands in the destination tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPlan {
    pub archive: PathBuf,
    pub relative_path: PathBuf,
    pub destination: PathBuf,
}

impl ExtractionPlan {
    /// Resolve `archive_path` against `source_root` and mirror it under
    /// `destination_root` with the final extension removed.
    ///
    /// Both paths are canonicalized first, so trailing separators, `..`
    /// components and symlinks do not affect the scope check. The source
    /// root must be a strict ancestor of the archive.
    pub fn new(archive_path: &Path, source_root: &Path, destination_root: &Path) -> Result<Self> {
        let archive = archive_path.canonicalize()?;
        let root = source_root.canonicalize()?;

        let relative_path = match archive.strip_prefix(&root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative.to_path_buf(),
            _ => {
                return Err(ProcessingError::PathScope {
                    archive: archive_path.to_path_buf(),
                    source_root: source_root.to_path_buf(),
                })
            }
        };

        let destination = destination_root.join(relative_path.with_extension(""));

        Ok(Self {
            archive,
            relative_path,
            destination,
        })
    }

    /// Extract every member into the destination directory and return the
    /// member names in central-directory order
    pub fn extract(&self) -> Result<Vec<String>> {
        let file = File::open(&self.archive)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;

        fs::create_dir_all(&self.destination)?;

        let mut members = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let out_path = self.destination.join(entry.mangled_name());

            if entry.is_dir() {
                fs::create_dir_all(&out_path)?;
            } else {
                if let Some(parent) = out_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut writer = BufWriter::new(File::create(&out_path)?);
                std::io::copy(&mut entry, &mut writer)?;
                writer.flush()?;
            }

            debug!(member = entry.name(), path = %out_path.display(), "Extracted member");
            members.push(entry.name().to_string());
        }

        info!(
            archive = %self.archive.display(),
            destination = %self.destination.display(),
            members = members.len(),
            "Extracted archive"
        );

        Ok(members)
    }
}

/// Extract `archive_path`, which must live under `source_root`, into the
/// mirrored directory under `destination_root`
pub fn extract(
    archive_path: &Path,
    source_root: &Path,
    destination_root: &Path,
) -> Result<Vec<String>> {
    ExtractionPlan::new(archive_path, source_root, destination_root)?.extract()
}
