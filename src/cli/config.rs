//! Configuration file.

use crate::catalog::DisplayNames;
use crate::error::{Error, Result};
use crate::image::Color;
use crate::text::Font;

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "cards.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub paths: PathsConfig,
    pub font: FontConfig,
    #[serde(default)]
    pub glyph: GlyphConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub names: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    pub cards: PathBuf,
    pub glyphs: PathBuf,
    pub catalog: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FontSource {
    Path { path: PathBuf },
    Name { name: String, style: Option<String> },
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontConfig {
    #[serde(flatten)]
    pub source: FontSource,
    #[serde(default)]
    pub color: Color,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlyphConfig {
    #[serde(default = "default_glyph_name")]
    pub name: String,
    #[serde(default = "default_glyph_width")]
    pub width: Option<i32>,
    #[serde(default = "default_glyph_height")]
    pub height: Option<i32>,
}

fn default_glyph_name() -> String {
    String::from("arrow_small")
}

fn default_glyph_width() -> Option<i32> {
    Some(125)
}

fn default_glyph_height() -> Option<i32> {
    Some(100)
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            name: default_glyph_name(),
            width: default_glyph_width(),
            height: default_glyph_height(),
        }
    }
}

impl GlyphConfig {
    pub fn size(&self) -> Option<(i32, i32)> {
        self.width.zip(self.height)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_ext")]
    pub ext: String,
}

fn default_ext() -> String {
    String::from("png")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { ext: default_ext() }
    }
}

impl Config {
    /// Opens `path`, or `./cards.toml` if none is given.
    pub fn find(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::open(path),
            None => Self::open(DEFAULT_CONFIG),
        }
    }

    /// Reads a config file. Relative paths inside it are taken from the
    /// folder the file is in.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::config_open(path, e))?;
        let folder = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        Self::parse(&content, &folder).map_err(|e| Error::config_deser(path, e))
    }

    pub fn parse(content: &str, folder: &Path) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        config.paths = PathsConfig {
            cards: folder.join(&config.paths.cards),
            glyphs: folder.join(&config.paths.glyphs),
            catalog: folder.join(&config.paths.catalog),
            output: folder.join(&config.paths.output),
        };
        if let FontSource::Path { path } = &mut config.font.source {
            *path = folder.join(&*path);
        }
        Ok(config)
    }

    pub fn load_font(&self) -> Result<Font> {
        match &self.font.source {
            FontSource::Path { path } => Font::from_file(path),
            FontSource::Name { name, style } => Font::from_name(name, style.as_deref()),
        }
    }

    pub fn display_names(&self) -> Result<DisplayNames> {
        DisplayNames::default().with_overrides(&self.names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TechId;

    const SAMPLE: &str = r##"
        [paths]
        cards = "GIMP/Cards"
        glyphs = "GIMP/Etc"
        catalog = "data/techConverters"
        output = "img"

        [font]
        path = "fonts/Evogria.otf"
        color = "#101010"

        [names]
        "107" = "Cultural Singularity"
    "##;

    #[test]
    fn resolves_paths_against_the_config_folder() {
        let config = Config::parse(SAMPLE, Path::new("/srv/cubatrice")).unwrap();
        assert_eq!(config.paths.cards, PathBuf::from("/srv/cubatrice/GIMP/Cards"));
        assert_eq!(config.paths.output, PathBuf::from("/srv/cubatrice/img"));
        match &config.font.source {
            FontSource::Path { path } => {
                assert_eq!(path, &PathBuf::from("/srv/cubatrice/fonts/Evogria.otf"))
            }
            other => panic!("unexpected font source {other:?}"),
        }
        assert_eq!(config.output.ext, "png");
        assert_eq!(config.glyph.name, "arrow_small");
        assert_eq!(config.glyph.size(), Some((125, 100)));
    }

    #[test]
    fn font_by_name_and_name_overrides() {
        let content = SAMPLE.replace(r#"path = "fonts/Evogria.otf""#, r#"name = "Evogria""#);
        let config = Config::parse(&content, Path::new("")).unwrap();
        assert!(matches!(
            config.font.source,
            FontSource::Name { ref name, style: None } if name == "Evogria"
        ));
        let names = config.display_names().unwrap();
        assert_eq!(names.get(TechId(107)), Some("Cultural Singularity"));
        assert_eq!(names.get(TechId(1)), Some("Quantum Computers"));
    }

    #[test]
    fn missing_paths_are_rejected() {
        assert!(Config::parse("[font]\nname = \"Evogria\"", Path::new("")).is_err());
    }
}
