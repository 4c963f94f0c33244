// src/services/image_store.rs
// DOCUMENTATION: Filesystem storage for travel and place images
// PURPOSE: Deterministic path scheme, staged writes and base64 embedding for responses

use crate::errors::TravelError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures_util::{Stream, StreamExt};
use std::fmt::Display;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Prefix that turns base64 bytes into a value usable directly as an <img> src
pub const EMBED_PREFIX: &str = "data:image/jpeg;base64,";

const PREVIEW_FILE: &str = "preview.jpg";

/// Image tree rooted at the configured image directory
/// DOCUMENTATION: Layout below the root:
///   travel/{travel_id}/preview.jpg
///   travel/{travel_id}/places/{place_id}/preview.jpg
///   travel/{travel_id}/places/{place_id}/images/{original_filename}
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn travel_dir(&self, travel_id: Uuid) -> PathBuf {
        self.root.join("travel").join(travel_id.to_string())
    }

    pub fn travel_preview_path(&self, travel_id: Uuid) -> PathBuf {
        self.travel_dir(travel_id).join(PREVIEW_FILE)
    }

    pub fn place_dir(&self, travel_id: Uuid, place_id: Uuid) -> PathBuf {
        self.travel_dir(travel_id)
            .join("places")
            .join(place_id.to_string())
    }

    pub fn place_preview_path(&self, travel_id: Uuid, place_id: Uuid) -> PathBuf {
        self.place_dir(travel_id, place_id).join(PREVIEW_FILE)
    }

    /// Path for an uploaded place image, keeping only the final component of
    /// the client-supplied file name
    pub fn place_image_path(
        &self,
        travel_id: Uuid,
        place_id: Uuid,
        file_name: &str,
    ) -> Result<PathBuf, TravelError> {
        let name = Path::new(file_name)
            .file_name()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                TravelError::InvalidInput(format!("invalid image file name {:?}", file_name))
            })?;

        Ok(self
            .place_dir(travel_id, place_id)
            .join("images")
            .join(name))
    }

    /// Open a temporary file next to `target`, creating missing directories
    /// DOCUMENTATION: Nothing is visible at `target` until StagedImage::commit
    pub async fn stage(&self, target: PathBuf) -> Result<StagedImage, TravelError> {
        let dir = target
            .parent()
            .ok_or_else(|| {
                TravelError::StorageError(format!("image path {:?} has no parent", target))
            })?
            .to_path_buf();

        fs::create_dir_all(&dir).await.map_err(|e| {
            log::error!("Failed to create image directory {:?}: {}", dir, e);
            TravelError::from(e)
        })?;

        let temp = dir.join(format!(".{}.part", Uuid::new_v4()));
        let file = File::create(&temp).await.map_err(|e| {
            log::error!("Failed to create staging file {:?}: {}", temp, e);
            TravelError::from(e)
        })?;

        Ok(StagedImage {
            temp,
            target,
            file: Some(file),
            committed: false,
        })
    }

    /// Read an image and return it base64-encoded with the data-URI prefix
    /// DOCUMENTATION: A missing file is an error, never an empty value
    pub async fn load(&self, path: &str) -> Result<String, TravelError> {
        let bytes = fs::read(path).await.map_err(|e| {
            log::error!("Failed to open image {}: {}", path, e);
            TravelError::StorageError(format!("failed to open image {}: {}", path, e))
        })?;

        Ok(embed(&bytes))
    }

    /// Embed a stored reference; an empty reference (unset preview) stays empty
    pub async fn load_reference(&self, path: &str) -> Result<String, TravelError> {
        if path.is_empty() {
            return Ok(String::new());
        }
        self.load(path).await
    }

    /// Embed every reference in order
    pub async fn load_all(&self, paths: &[String]) -> Result<Vec<String>, TravelError> {
        let mut embedded = Vec::with_capacity(paths.len());
        for path in paths {
            embedded.push(self.load_reference(path).await?);
        }
        Ok(embedded)
    }

    /// Remove a directory subtree; an absent directory counts as removed
    pub async fn remove_dir(&self, dir: &Path) -> Result<(), TravelError> {
        match fs::remove_dir_all(dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                log::error!("Failed to remove image directory {:?}: {}", dir, e);
                Err(TravelError::from(e))
            }
        }
    }

    /// Remove a directory created for a row that turned out not to exist,
    /// along with any parent that is left empty below the root
    pub async fn discard_dir(&self, dir: &Path) {
        if let Err(e) = self.remove_dir(dir).await {
            log::warn!("Failed to discard image directory {:?}: {}", dir, e);
            return;
        }
        let mut parent = dir.parent();
        while let Some(p) = parent {
            if p == self.root.as_path() || !p.starts_with(&self.root) {
                break;
            }
            // remove_dir only succeeds on an empty directory
            if fs::remove_dir(p).await.is_err() {
                break;
            }
            parent = p.parent();
        }
    }

    /// Remove a single image; an absent file counts as removed
    pub async fn remove_file(&self, path: &Path) -> Result<(), TravelError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TravelError::from(e)),
        }
    }
}

/// Base64 data URI for raw image bytes
pub fn embed(bytes: &[u8]) -> String {
    format!("{}{}", EMBED_PREFIX, STANDARD.encode(bytes))
}

/// Image bytes written to a temporary file, waiting for the database to
/// record `target` before being moved there
/// DOCUMENTATION: Dropping an uncommitted StagedImage deletes the temp file
/// with a blocking std::fs call, which is a single unlink on the executor thread
#[derive(Debug)]
pub struct StagedImage {
    temp: PathBuf,
    target: PathBuf,
    file: Option<File>,
    committed: bool,
}

impl StagedImage {
    /// Final location as stored in the database
    pub fn target_path(&self) -> String {
        self.target.to_string_lossy().into_owned()
    }

    pub async fn write_all(&mut self, bytes: &[u8]) -> Result<(), TravelError> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| TravelError::StorageError("staging file already closed".into()))?;
        file.write_all(bytes).await.map_err(|e| {
            log::error!("Failed to write staging file {:?}: {}", self.temp, e);
            TravelError::from(e)
        })
    }

    /// Copy a byte stream (e.g. a raw request body) into the staging file
    pub async fn write_stream<S, B, E>(&mut self, mut stream: S) -> Result<u64, TravelError>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: Display,
    {
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                log::error!("Failed to read upload body: {}", e);
                TravelError::StorageError(e.to_string())
            })?;
            self.write_all(chunk.as_ref()).await?;
            written += chunk.as_ref().len() as u64;
        }
        Ok(written)
    }

    /// Flush and close the temp file without moving it
    pub async fn finish(&mut self) -> Result<(), TravelError> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
            file.sync_all().await?;
        }
        Ok(())
    }

    /// Move the staged bytes to their final path
    pub async fn commit(mut self) -> Result<PathBuf, TravelError> {
        self.finish().await?;
        fs::rename(&self.temp, &self.target).await.map_err(|e| {
            log::error!(
                "Failed to move {:?} into place at {:?}: {}",
                self.temp,
                self.target,
                e
            );
            TravelError::from(e)
        })?;
        self.committed = true;
        Ok(self.target.clone())
    }
}

impl Drop for StagedImage {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.temp) {
            if e.kind() != ErrorKind::NotFound {
                log::warn!("Failed to discard staging file {:?}: {}", self.temp, e);
            }
        }
    }
}
