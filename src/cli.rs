//! CLI implementation.
mod config;

pub use crate::cli::config::{Config, FontSource};
use crate::catalog::{JsonCatalog, Race};
use crate::error::Result;
use crate::image::{ImgBackend, VipsCanvas};
use crate::logs::TermLogger;
use crate::pipeline::{LogVisitor, Pipeline, Summary};
use crate::store::DirAssetStore;

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Render technology card images for every race
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file, `./cards.toml` if omitted
    pub config: Option<PathBuf>,

    /// Output images path, overriding the configured one
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only render these races
    #[arg(short, long, value_enum)]
    pub race: Vec<Race>,

    /// Also log each card as it starts
    #[arg(short, long)]
    pub verbose: bool,
}

macro_rules! error {
    ($res:expr) => {
        $res.unwrap_or_else(|e| panic!("{e}"))
    };
}

impl Cli {
    pub fn run() {
        std::panic::set_hook(Box::new(|panic_info| {
            if let Some(s) = panic_info.payload().downcast_ref::<String>() {
                eprintln!("{s}");
            } else {
                eprintln!("{panic_info}");
            }
        }));

        let cli = Self::parse();
        let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
        error!(TermLogger::init(level));

        let summary = error!(cli.render());
        if summary.failed > 0 || summary.failed_races > 0 {
            std::process::exit(1);
        }
    }

    fn races(&self) -> Vec<Race> {
        if self.race.is_empty() {
            Race::ALL.to_vec()
        } else {
            self.race.clone()
        }
    }

    pub fn render(&self) -> Result<Summary> {
        let mut config = Config::find(self.config.as_deref())?;
        if let Some(output) = &self.output {
            config.paths.output = output.clone();
        }

        let names = config.display_names()?;
        let font = config.load_font()?;
        log::debug!("using font {}", font.name());
        let backend = ImgBackend::new()?;
        let store = DirAssetStore {
            backend: &backend,
            cards: config.paths.cards.clone(),
            glyphs: config.paths.glyphs.clone(),
            output: config.paths.output.clone(),
            ext: config.output.ext.clone(),
            glyph_size: config.glyph.size(),
        };
        let catalog = JsonCatalog::new(config.paths.catalog.clone());
        let canvas = VipsCanvas {
            backend: &backend,
            font: &font,
            color: config.font.color,
        };
        let pipeline = Pipeline {
            store: &store,
            catalog: &catalog,
            names: &names,
            metrics: &font,
            glyph: &config.glyph.name,
            visitor: LogVisitor::default(),
        };
        pipeline.run(&canvas, &self.races())
    }
}
