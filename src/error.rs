use std::path::PathBuf;

use thiserror::Error;

use crate::detect::Format;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Feature not enabled: {0}. Recompile with --features {0}")]
    FeatureDisabled(&'static str),

    #[error("Unsupported source image: {}", .0.display())]
    UnsupportedSource(PathBuf),

    #[error("Image is already in {0} format")]
    SameFormat(Format),

    #[error("No image selected")]
    NoSelection,

    #[error("Failed to convert image {}: {message}", .path.display())]
    Conversion { path: PathBuf, message: String },
}

impl Error {
    /// True when no converter exists for the requested target.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownFormat(_) | Self::FeatureDisabled(_))
    }
}
