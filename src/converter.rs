use std::ffi::OsString;
use std::fmt::Display;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::detect::Format;
use crate::error::{Error, Result};
use crate::formats::{Target, prepare};

/// Re-encodes images into a single target format.
///
/// Holds only the target descriptor, so one can be built per request and
/// dropped right after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    target: Target,
}

impl Converter {
    pub fn new(target: Target) -> Self {
        Self { target }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn format(&self) -> Format {
        self.target.format
    }

    pub fn format_name(&self) -> &'static str {
        self.target.format.name()
    }

    /// `destination_base` with `.<ext>` appended. An existing extension on
    /// the base is kept.
    pub fn output_path(&self, destination_base: &Path) -> PathBuf {
        let mut path = OsString::from(destination_base.as_os_str());
        path.push(".");
        path.push(self.target.extension());
        PathBuf::from(path)
    }

    /// Converts `source` and writes it next to `destination_base`, returning
    /// the path written. Nothing is left at that path on failure.
    pub fn convert(&self, source: &Path, destination_base: &Path) -> Result<PathBuf> {
        let output = self.output_path(destination_base);
        log::debug!(
            "converting {} to {} at {}",
            source.display(),
            self.format_name(),
            output.display()
        );

        let reader = image::ImageReader::open(source)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| conversion_error(source, e))?;
        let image = reader.decode().map_err(|e| conversion_error(source, e))?;
        let image = prepare::prepare(image, self.target.pixels);

        let mut staged = staging_file(&output).map_err(|e| conversion_error(source, e))?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            image
                .write_to(&mut writer, self.target.encoder)
                .map_err(|e| conversion_error(source, e))?;
            writer.flush().map_err(|e| conversion_error(source, e))?;
        }
        staged
            .persist(&output)
            .map_err(|e| conversion_error(source, e.error))?;

        log::info!(
            "converted {} to {}",
            source.display(),
            output.display()
        );
        Ok(output)
    }
}

fn conversion_error(source: &Path, err: impl Display) -> Error {
    Error::Conversion {
        path: source.to_path_buf(),
        message: err.to_string(),
    }
}

/// Temporary file in the same directory as `output`, so the final rename
/// never crosses a filesystem. Removed on drop unless persisted.
fn staging_file(output: &Path) -> std::io::Result<tempfile::NamedTempFile> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".imgconv-").suffix(".part");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    builder.tempfile_in(dir)
}
