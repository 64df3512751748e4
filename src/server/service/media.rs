//! Image storage and best-effort cleanup.
//!
//! Uploaded images live below `<upload root>/Images/<folder>/` and are referenced from
//! records by their path relative to the upload root, e.g.
//! `Images/adverts/5b6f...--cover.png`. Deletions are spawned onto the runtime and never
//! block or fail the request that triggered them.

use std::path::{Component, Path, PathBuf};

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::server::{error::AppError, util::upload::UploadedImage};

/// Top-level directory holding every stored image, also the URL prefix it is served under.
pub const IMAGES_DIR: &str = "Images";

/// MIME types accepted for uploads. Anything else is treated as if no file was sent.
pub const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/jpg", "image/jpeg", "image/png"];

pub fn is_accepted_image(content_type: &str) -> bool {
    ACCEPTED_IMAGE_TYPES.contains(&content_type)
}

/// Sub-directory an image is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFolder {
    Adverts,
    Profile,
}

impl ImageFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adverts => "adverts",
            Self::Profile => "profile",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory served under `/Images`.
    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    /// Creates the image folders if they do not exist yet.
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        for folder in [ImageFolder::Adverts, ImageFolder::Profile] {
            tokio::fs::create_dir_all(self.images_dir().join(folder.as_str())).await?;
        }
        Ok(())
    }

    /// Writes an uploaded image and returns its path relative to the upload root.
    ///
    /// # Arguments
    /// - `folder` - Folder to store the image in
    /// - `image` - Accepted upload
    ///
    /// # Returns
    /// - `Ok(String)` - Stored reference such as `Images/profile/<uuid>--me.png`
    /// - `Err(AppError::IoErr)` - Directory creation or write failed
    pub async fn save(&self, folder: ImageFolder, image: UploadedImage) -> Result<String, AppError> {
        let file_name = format!("{}--{}", Uuid::new_v4(), sanitize_file_name(&image.file_name));
        let relative = format!("{}/{}/{}", IMAGES_DIR, folder.as_str(), file_name);

        let dir = self.images_dir().join(folder.as_str());
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), &image.bytes).await?;

        tracing::debug!("Stored image {}", relative);

        Ok(relative)
    }

    /// Schedules deletion of the current image when a new file replaced it.
    ///
    /// Does nothing when the record has no image or no new file was uploaded.
    pub fn replace_image(
        &self,
        current: Option<&str>,
        replacement_supplied: bool,
    ) -> Option<JoinHandle<()>> {
        if !replacement_supplied {
            return None;
        }
        current.and_then(|path| self.schedule_delete(path))
    }

    /// Schedules deletion of the image of a record that is being deleted.
    pub fn cascade_delete_image(&self, current: Option<&str>) -> Option<JoinHandle<()>> {
        current.and_then(|path| self.schedule_delete(path))
    }

    /// Spawns removal of a stored image.
    ///
    /// Paths that are empty, absolute or contain `..` are refused and nothing is spawned.
    /// Failures, including an already missing file, are logged at debug level only.
    pub fn schedule_delete(&self, relative: &str) -> Option<JoinHandle<()>> {
        let Some(path) = self.resolve(relative) else {
            tracing::debug!("Refusing to delete image outside upload root: {}", relative);
            return None;
        };

        Some(tokio::spawn(async move {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => tracing::debug!("Deleted image {}", path.display()),
                Err(e) => tracing::debug!("Could not delete image {}: {}", path.display(), e),
            }
        }))
    }

    fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let path = Path::new(relative);
        if relative.is_empty() || !path.components().all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }
        Some(self.root.join(path))
    }
}

/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}
