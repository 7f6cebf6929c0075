use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::Error;

/// Number of leading bytes needed by [`Format::from_magic_bytes`].
pub const HEADER_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Png,
    Jpeg,
    Jpg,
    Bmp,
    Ico,
    Tiff,
    Webp,
}

impl Format {
    pub const ALL: [Self; 7] = [
        Self::Png,
        Self::Jpeg,
        Self::Jpg,
        Self::Bmp,
        Self::Ico,
        Self::Tiff,
        Self::Webp,
    ];

    /// Formats a selection may start from.
    pub const SOURCES: [Self; 5] = [Self::Png, Self::Jpg, Self::Bmp, Self::Jpeg, Self::Webp];

    pub fn name(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Jpg => "JPG",
            Self::Bmp => "BMP",
            Self::Ico => "ICO",
            Self::Tiff => "TIFF",
            Self::Webp => "WEBP",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Jpg => "jpg",
            Self::Bmp => "bmp",
            Self::Ico => "ico",
            Self::Tiff => "tiff",
            Self::Webp => "webp",
        }
    }

    pub fn is_source(self) -> bool {
        Self::SOURCES.contains(&self)
    }

    pub fn detect(path: &Path, header: &[u8]) -> Option<Self> {
        Self::from_extension(path).or_else(|| Self::from_magic_bytes(header))
    }

    /// Detects the format of a file on disk, reading its header only when
    /// the extension says nothing.
    pub fn detect_file(path: &Path) -> Option<Self> {
        let header = match Self::from_extension(path) {
            Some(_) => Vec::new(),
            None => read_header(path).ok()?,
        };
        Self::detect(path, &header)
    }

    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())?;

        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpeg" => Some(Self::Jpeg),
            "jpg" => Some(Self::Jpg),
            "bmp" => Some(Self::Bmp),
            "ico" => Some(Self::Ico),
            "tiff" | "tif" => Some(Self::Tiff),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    pub fn from_magic_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PNG: \x89PNG
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(Self::Png);
        }

        // JPEG: \xFF\xD8\xFF
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // TIFF
        if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return Some(Self::Tiff);
        }

        // ICO: reserved 0, type 1
        if bytes.starts_with(&[0x00, 0x00, 0x01, 0x00]) {
            return Some(Self::Ico);
        }

        // WEBP: RIFF....WEBP
        if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
            return Some(Self::Webp);
        }

        // BMP
        if bytes.starts_with(b"BM") {
            return Some(Self::Bmp);
        }

        None
    }
}

fn read_header(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    File::open(path)?
        .take(HEADER_LEN as u64)
        .read_to_end(&mut header)?;
    Ok(header)
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
