use thiserror::Error;

/// Failure loading a single asset. Failures are isolated per asset and never
/// abort sibling loads.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("invalid glTF: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("no geometry found in {0}")]
    NoGeometry(String),
    #[error("empty image {0}")]
    EmptyImage(String),
}

impl AssetError {
    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
