//! Writes buckets into the must-gather tree

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::bucket::Bucket;
use super::document::encode_list;
use super::layout::ArtifactPath;
use crate::models::TaggedResource;

/// Outcome of writing one namespace group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    Ok(ArtifactPath),
    Failed { path: ArtifactPath, cause: String },
}

impl WriteResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, WriteResult::Ok(_))
    }

    pub fn path(&self) -> &ArtifactPath {
        match self {
            WriteResult::Ok(path) | WriteResult::Failed { path, .. } => path,
        }
    }

    /// Markdown line pointing at the artifact, or saying why it is missing
    pub fn reference(&self) -> String {
        match self {
            WriteResult::Ok(path) => format!("For more information, check [`{0}`]({0})", path),
            WriteResult::Failed { path, cause } => {
                format!("❌ Unable to write `{}`: {}", path, cause)
            }
        }
    }
}

/// Serializes buckets under a per-cluster root directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    root: PathBuf,
}

impl ArtifactWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write every non-empty namespace group of `bucket`
    ///
    /// Groups are written independently: a failure is recorded for its
    /// namespace and the remaining groups are still attempted.
    pub fn write(&self, bucket: &Bucket) -> BTreeMap<String, WriteResult> {
        let mut results = BTreeMap::new();

        for (namespace, items) in bucket.groups() {
            if items.is_empty() {
                continue;
            }

            let path = ArtifactPath::file_for(bucket.kind(), namespace);
            let result = match self.write_group(&path, items) {
                Ok(()) => {
                    tracing::debug!("Wrote {} {} to {}", items.len(), bucket.kind(), path);
                    WriteResult::Ok(path)
                }
                Err(e) => {
                    tracing::warn!("Failed to write {}: {:#}", path, e);
                    WriteResult::Failed {
                        path,
                        cause: format!("{:#}", e),
                    }
                }
            };
            results.insert(namespace.clone(), result);
        }

        results
    }

    fn write_group(&self, path: &ArtifactPath, items: &[TaggedResource]) -> Result<()> {
        let target = path.resolve(&self.root);
        if let Some(dir) = target.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }

        let yaml = encode_list(items).context("Failed to encode YAML")?;
        write_atomic(&target, yaml.as_bytes())
            .with_context(|| format!("Failed to write {}", target.display()))
    }
}

/// Mode requested for written files, before the process umask
#[cfg(unix)]
const FILE_MODE: u32 = 0o666;

/// Write `contents` to `path` through a temporary file in the same directory
///
/// Readers see either the previous file or the complete new one. The file
/// gets the same permissions a plain create would give it.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(FILE_MODE));
    }
    let mut file = builder.tempfile_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
