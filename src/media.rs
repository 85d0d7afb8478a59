use std::path::PathBuf;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::ImageFormat;
use ulid::Ulid;

const INVALID_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

/// Decodes a `data:image/<type>;base64,...` URI or bare base64 into image
/// bytes and their detected format.
pub fn decode(data: &str) -> foodgram_shared::Result<(Vec<u8>, ImageFormat)> {
    let encoded = match data.split_once(";base64,") {
        Some((prefix, encoded)) if prefix.starts_with("data:") => encoded,
        _ => data,
    };

    let invalid = || foodgram_shared::Error::field("image", INVALID_IMAGE);

    let bytes = STANDARD.decode(encoded.trim()).map_err(|_| invalid())?;
    let format = image::guess_format(&bytes).map_err(|_| invalid())?;
    image::load_from_memory_with_format(&bytes, format).map_err(|_| invalid())?;

    Ok((bytes, format))
}

/// Recipe images on the local filesystem, served under `/media/`.
#[derive(Clone, Debug)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Stores the image and returns its media-relative path.
    pub async fn save(&self, data: &str) -> crate::error::AppResult<String> {
        let (bytes, format) = decode(data)?;
        let extension = format.extensions_str().first().copied().unwrap_or("img");
        let path = format!("recipes/{}.{extension}", Ulid::new().to_string().to_lowercase());

        let full_path = self.root.join(&path);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(anyhow::Error::from)?;
        }
        tokio::fs::write(&full_path, bytes)
            .await
            .map_err(anyhow::Error::from)?;

        tracing::debug!(%path, "image stored");

        Ok(path)
    }

    /// Best effort, a missing file is not an error.
    pub async fn remove(&self, path: &str) {
        if path.is_empty() {
            return;
        }

        match tokio::fs::remove_file(self.root.join(path)).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                tracing::warn!(%path, err = %e, "failed to remove image");
            }
            _ => {}
        }
    }
}
