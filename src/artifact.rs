//! Temporary artifact management
//!
//! All exported files live in a single managed directory. In-progress
//! exports are staged in an `incoming/` subdirectory and renamed into the
//! managed directory on success, so a half-written file is never
//! addressable by a download (resolution only ever looks at basenames in
//! the managed directory itself).
//!
//! Deletion is fire-and-forget: a detached timer task removes the file
//! after its window elapses. A file already gone at that point is a no-op,
//! and removal failures are logged, never surfaced — no client waits on
//! deletion.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Subdirectory for in-progress files, unreachable via basename resolution.
const INCOMING_DIR: &str = "incoming";

/// Maximum length of the logstore-derived slug in an artifact name.
const SLUG_MAX_LEN: usize = 64;

/// Manages the artifact namespace: name construction, creation, sanitized
/// resolution, and scheduled deletion.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Open (creating if absent) the managed directory at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(dir.join(INCOMING_DIR))?;
        Ok(Self { dir })
    }

    /// The managed directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Build a collision-free artifact file name for one export call.
    ///
    /// The logstore component is reduced to a path-safe slug; a
    /// second-resolution timestamp plus a random suffix makes names from
    /// concurrent exports of the same logstore distinct.
    pub fn unique_file_name(&self, logstore: &str) -> String {
        let slug = sanitize_slug(logstore);
        let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let suffix: u32 = rand::random();
        format!("{slug}_{stamp}_{suffix:08x}.txt")
    }

    /// Start a new artifact under `incoming/`, returning a handle that must
    /// be either committed or discarded.
    pub async fn create(&self, file_name: &str) -> Result<PendingArtifact> {
        let part_path = self.dir.join(INCOMING_DIR).join(file_name);
        let final_path = self.dir.join(file_name);
        let file = File::create(&part_path).await?;
        Ok(PendingArtifact {
            writer: BufWriter::new(file),
            part_path,
            final_path,
        })
    }

    /// Reduce a requested name to a path inside the managed directory.
    ///
    /// Directory components are stripped, so no path outside the managed
    /// directory is ever addressable; names with no usable base component
    /// (or hidden-file names) resolve to `ArtifactNotFound`. Existence is
    /// checked at open time, not here.
    pub fn resolve(&self, requested: &str) -> Result<PathBuf> {
        let name = Path::new(requested)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::ArtifactNotFound {
                name: requested.to_string(),
            })?;
        if name.starts_with('.') {
            return Err(Error::ArtifactNotFound {
                name: requested.to_string(),
            });
        }
        Ok(self.dir.join(name))
    }

    /// Resolve and open an artifact for reading.
    ///
    /// Returns the sanitized file name together with the open handle. A
    /// file that vanished between resolution and open — the deletion timer
    /// racing a late download — is the expected `ArtifactNotFound` outcome,
    /// not an error state.
    pub async fn open(&self, requested: &str) -> Result<(String, File)> {
        let path = self.resolve(requested)?;
        match File::open(&path).await {
            Ok(file) => {
                // resolve() guarantees a utf-8 basename
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(requested)
                    .to_string();
                Ok((name, file))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::ArtifactNotFound {
                name: requested.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Arrange for `path` to be removed after `delay`, without blocking.
    ///
    /// The timer runs on a detached task; the returned handle is only
    /// useful to tests that want to await the removal. There is no way to
    /// extend or revoke an artifact's lifetime once scheduled.
    pub fn schedule_deletion(&self, path: PathBuf, delay: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "expired artifact removed");
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "artifact already gone at expiry");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove expired artifact");
                }
            }
        })
    }
}

/// An artifact being written, staged under `incoming/`.
///
/// Call [`commit`](PendingArtifact::commit) to publish it to downloaders or
/// [`discard`](PendingArtifact::discard) to drop the partial file.
pub struct PendingArtifact {
    writer: BufWriter<File>,
    part_path: PathBuf,
    final_path: PathBuf,
}

impl PendingArtifact {
    /// The destination writer for the export loop.
    pub fn writer(&mut self) -> &mut BufWriter<File> {
        &mut self.writer
    }

    /// Flush and publish: rename from `incoming/` into the managed
    /// directory, making the artifact visible to downloads. Returns the
    /// published path.
    pub async fn commit(mut self) -> Result<PathBuf> {
        self.writer.flush().await?;
        tokio::fs::rename(&self.part_path, &self.final_path).await?;
        Ok(self.final_path)
    }

    /// Drop the partial file. Removal failures are logged, not raised —
    /// a stale `incoming/` entry is harmless to downloaders.
    pub async fn discard(self) {
        let PendingArtifact {
            writer, part_path, ..
        } = self;
        drop(writer);
        if let Err(e) = tokio::fs::remove_file(&part_path).await
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %part_path.display(), error = %e, "failed to remove discarded artifact");
        }
    }
}

/// Reduce a logstore name to a path- and URL-safe slug.
fn sanitize_slug(logstore: &str) -> String {
    let mut slug: String = logstore
        .chars()
        .take(SLUG_MAX_LEN)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if slug.is_empty() {
        slug.push_str("logs");
    }
    slug
}
