// src/images.rs

//! The image store the listing workflows write uploads to.
//!
//! Only the contract lives here. The file-backed store belongs to the
//! hosting application.

use std::path::Path;

use uuid::Uuid;

use crate::errors::AppResult;

/// One uploaded file as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Lowercased extension including the dot, e.g. `.jpg`.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
    }
}

pub trait ImageStore {
    /// Stores the acceptable files for `owner_id` and returns their public
    /// URLs in input order. Files the store rejects are skipped silently.
    fn save_images(&self, owner_id: Uuid, files: &[ImageUpload]) -> AppResult<Vec<String>>;

    /// Removes everything stored for `owner_id`. Succeeds when nothing is
    /// stored.
    fn delete_images(&self, owner_id: Uuid) -> AppResult<()>;
}

/// Which uploads a store keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub allowed_extensions: Vec<&'static str>,
    pub max_file_bytes: usize,
    /// Only this many leading uploads are considered at all.
    pub max_files: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: vec![".jpg", ".jpeg", ".png", ".webp"],
            max_file_bytes: 10 * 1024 * 1024,
            max_files: 15,
        }
    }
}

impl UploadPolicy {
    pub fn allows(&self, file: &ImageUpload) -> bool {
        if file.bytes.is_empty() || file.bytes.len() > self.max_file_bytes {
            return false;
        }
        file.extension()
            .is_some_and(|ext| self.allowed_extensions.contains(&ext.as_str()))
    }

    /// The uploads a conforming store would keep, in order. The count cap is
    /// applied before the per-file checks.
    pub fn accepted<'a>(&self, files: &'a [ImageUpload]) -> Vec<&'a ImageUpload> {
        files
            .iter()
            .take(self.max_files)
            .filter(|file| self.allows(file))
            .collect()
    }
}

/// Public URL for a stored vehicle image.
pub fn vehicle_image_url(owner_id: Uuid, stored_name: &str) -> String {
    format!("/uploads/vehicles/{owner_id}/{stored_name}")
}
