//! Selection state behind the conversion buttons.
//!
//! A [`Session`] remembers the chosen source image, which targets are
//! offered for it, and turns each conversion request into an [`Outcome`]
//! the shell can show as-is.

use std::path::{Path, PathBuf};

use crate::detect::Format;
use crate::error::{Error, Result};
use crate::formats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// What the shell shows after a conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub severity: Severity,
    pub title: &'static str,
    pub message: String,
    pub output: Option<PathBuf>,
}

impl Outcome {
    fn info(message: String, output: PathBuf) -> Self {
        Self {
            severity: Severity::Info,
            title: "Success",
            message,
            output: Some(output),
        }
    }

    fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            title: "Warning",
            message,
            output: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            title: "Error",
            message,
            output: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.severity == Severity::Info
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    path: PathBuf,
    format: Format,
}

#[derive(Debug, Default)]
pub struct Session {
    selection: Option<Selection>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the first of `paths` that is a supported source image.
    ///
    /// Its own format is disabled as a target. Paths without a recognised
    /// source format are skipped; if none remain the selection is rejected
    /// and the previous one is kept. An empty list resets the session.
    pub fn select<I, P>(&mut self, paths: I) -> Result<&Path>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        let Some(first) = paths.first() else {
            self.reset();
            return Err(Error::NoSelection);
        };

        let Some((path, format)) = paths.iter().find_map(|p| {
            Format::detect_file(p)
                .filter(|f| f.is_source())
                .map(|f| (p.clone(), f))
        }) else {
            log::warn!("rejecting selection of {}", first.display());
            return Err(Error::UnsupportedSource(first.clone()));
        };

        log::debug!("selected {} as {format}", path.display());
        let selection = self.selection.insert(Selection { path, format });
        Ok(&selection.path)
    }

    pub fn reset(&mut self) {
        self.selection = None;
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selection.as_ref().map(|s| s.path.as_path())
    }

    pub fn source_format(&self) -> Option<Format> {
        self.selection.as_ref().map(|s| s.format)
    }

    pub fn is_enabled(&self, target: Format) -> bool {
        self.source_format().is_some_and(|source| source != target)
    }

    pub fn enabled_targets(&self) -> Vec<Format> {
        Format::ALL
            .into_iter()
            .filter(|f| self.is_enabled(*f))
            .collect()
    }

    /// Converts the selected image to `target`, writing
    /// `destination_base.<ext>`.
    pub fn convert(&self, target: &str, destination_base: &Path) -> Outcome {
        match self.try_convert(target, destination_base) {
            Ok((format, output)) => Outcome::info(
                format!("Image successfully converted to {format}"),
                output,
            ),
            Err(err) if err.is_not_found() => {
                log::warn!("{err}");
                Outcome::warning(format!(
                    "Could not find a converter for format {}",
                    target.trim().to_ascii_uppercase()
                ))
            }
            Err(err @ (Error::NoSelection | Error::SameFormat(_))) => {
                log::warn!("{err}");
                Outcome::warning(err.to_string())
            }
            Err(err) => {
                log::error!("{err}");
                Outcome::error(err.to_string())
            }
        }
    }

    fn try_convert(&self, target: &str, destination_base: &Path) -> Result<(Format, PathBuf)> {
        let selection = self.selection.as_ref().ok_or(Error::NoSelection)?;
        let converter = formats::get_converter(target)?;
        if converter.format() == selection.format {
            return Err(Error::SameFormat(selection.format));
        }
        let output = converter.convert(&selection.path, destination_base)?;
        Ok((converter.format(), output))
    }
}
