//! Where card templates and glyphs come from and finished cards go.

use crate::catalog::Race;
use crate::error::{Error, Result};
use crate::image::ImgBackend;

use libvips::VipsImage;
use std::path::PathBuf;

pub trait AssetStore {
    type Image;

    /// Blank card for `race` in the given upgrade state.
    fn template(&self, race: Race, upgraded: bool) -> Result<Self::Image>;

    fn glyph(&self, name: &str) -> Result<Self::Image>;

    /// Persists a finished card under `filename`, which has no extension.
    fn save(&self, card: &Self::Image, filename: &str) -> Result<()>;
}

/// Name a finished card is saved under.
pub fn card_filename(race: Race, title: &str) -> String {
    format!("{}_{title}", race.slug())
}

/// Asset folders on disk:
/// `<cards>/<race>_unupgraded.png`, `<cards>/<race>_upgraded.png`,
/// `<glyphs>/<name>.png`, and `<output>/<filename>.<ext>`.
pub struct DirAssetStore<'b> {
    pub backend: &'b ImgBackend,
    pub cards: PathBuf,
    pub glyphs: PathBuf,
    pub output: PathBuf,
    pub ext: String,
    /// Size glyphs are stretched to, if any.
    pub glyph_size: Option<(i32, i32)>,
}

impl<'b> DirAssetStore<'b> {
    pub fn template_path(&self, race: Race, upgraded: bool) -> PathBuf {
        let state = if upgraded { "upgraded" } else { "unupgraded" };
        let mut path = self.cards.clone();
        path.push(format!("{}_{state}.png", race.slug()));
        path
    }

    pub fn glyph_path(&self, name: &str) -> PathBuf {
        let mut path = self.glyphs.clone();
        path.push(format!("{name}.png"));
        path
    }

    pub fn output_path(&self, filename: &str) -> PathBuf {
        let mut path = self.output.clone();
        path.push(format!("{filename}.{}", self.ext));
        path
    }
}

impl AssetStore for DirAssetStore<'_> {
    type Image = VipsImage;

    fn template(&self, race: Race, upgraded: bool) -> Result<VipsImage> {
        let path = self.template_path(race, upgraded);
        self.backend
            .open(&path)
            .map_err(|e| Error::template_open(race, upgraded, e))
    }

    fn glyph(&self, name: &str) -> Result<VipsImage> {
        let path = self.glyph_path(name);
        let img = self.backend.open(&path).map_err(|e| Error::glyph_open(name, e))?;
        match self.glyph_size {
            Some((w, h)) => self.backend.resize(&img, w, h),
            None => Ok(img),
        }
    }

    fn save(&self, card: &VipsImage, filename: &str) -> Result<()> {
        self.backend.write(card, self.output_path(filename))
    }
}
