//! Common error types.

use crate::catalog::{Race, TechId};

use std::fmt;
use std::path::{Path, PathBuf};

/// A shortcut type equivalent to `Result<T, cubatrice_cards::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error that occurs within the crate.
#[derive(Debug)]
pub enum Error {
    ConfigOpen(PathBuf, String),
    ConfigDeser(PathBuf, String),
    InvalidNameOverride(String),
    CatalogOpen(Race, PathBuf, String),
    CatalogDeser(Race, PathBuf, String),
    MissingDisplayName(TechId),
    TemplateOpen(Race, bool, String),
    GlyphOpen(String, String),
    ImageWrite(PathBuf, String),
    ImageConversion(&'static str, &'static str),
    VipsError(String),
    CairoError(String),
    FontconfigInit,
    FontLoad(String),
    InvalidCString(String),
}

impl Error {
    pub fn config_open(path: impl AsRef<Path>, e: impl fmt::Display) -> Self {
        Self::ConfigOpen(path.as_ref().to_path_buf(), e.to_string())
    }

    pub fn config_deser(path: impl AsRef<Path>, e: impl fmt::Display) -> Self {
        Self::ConfigDeser(path.as_ref().to_path_buf(), e.to_string())
    }

    pub fn catalog_open(race: Race, path: impl AsRef<Path>, e: impl fmt::Display) -> Self {
        Self::CatalogOpen(race, path.as_ref().to_path_buf(), e.to_string())
    }

    pub fn catalog_deser(race: Race, path: impl AsRef<Path>, e: impl fmt::Display) -> Self {
        Self::CatalogDeser(race, path.as_ref().to_path_buf(), e.to_string())
    }

    pub fn template_open(race: Race, upgraded: bool, e: impl fmt::Display) -> Self {
        Self::TemplateOpen(race, upgraded, e.to_string())
    }

    pub fn glyph_open(name: impl AsRef<str>, e: impl fmt::Display) -> Self {
        Self::GlyphOpen(name.as_ref().to_string(), e.to_string())
    }

    pub fn image_write(path: impl AsRef<Path>, e: impl fmt::Display) -> Self {
        Self::ImageWrite(path.as_ref().to_path_buf(), e.to_string())
    }

    pub fn cairo(e: impl fmt::Display) -> Self {
        Self::CairoError(e.to_string())
    }

    /// Whether this error leaves nothing to render for a whole race.
    pub fn is_asset_failure(&self) -> bool {
        matches!(
            self,
            Self::CatalogOpen(..) | Self::CatalogDeser(..) | Self::TemplateOpen(..) | Self::GlyphOpen(..)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigOpen(path, e) => {
                write!(f, "failed to open config {}: {e}", path.display())
            }
            Self::ConfigDeser(path, e) => {
                write!(f, "failed to parse config {}: {e}", path.display())
            }
            Self::InvalidNameOverride(key) => {
                write!(f, "display name override key `{key}` is not a technology id")
            }
            Self::CatalogOpen(race, path, e) => {
                write!(f, "failed to open {race} catalog {}: {e}", path.display())
            }
            Self::CatalogDeser(race, path, e) => {
                write!(f, "failed to parse {race} catalog {}: {e}", path.display())
            }
            Self::MissingDisplayName(id) => write!(f, "technology {id} has no display name"),
            Self::TemplateOpen(race, upgraded, e) => {
                let state = if *upgraded { "upgraded" } else { "unupgraded" };
                write!(f, "failed to open {state} {race} template: {e}")
            }
            Self::GlyphOpen(name, e) => write!(f, "failed to open glyph `{name}`: {e}"),
            Self::ImageWrite(path, e) => {
                write!(f, "failed to write image {}: {e}", path.display())
            }
            Self::ImageConversion(from, to) => {
                write!(f, "failed to convert image from {from} to {to}")
            }
            Self::VipsError(e) => write!(f, "libvips error: {e}"),
            Self::CairoError(e) => write!(f, "cairo error: {e}"),
            Self::FontconfigInit => write!(f, "failed to initialize fontconfig"),
            Self::FontLoad(font) => write!(f, "failed to load font `{font}`"),
            Self::InvalidCString(s) => write!(f, "string contains a nul byte: {s:?}"),
        }
    }
}

impl std::error::Error for Error {}
