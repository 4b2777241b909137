use cubatrice_cards::catalog::{Catalog, DisplayNames, JsonCatalog, Race, TechCatalog, TechId};
use cubatrice_cards::error::{Error, Result};
use cubatrice_cards::layer::{Bitmap, Canvas, LabelLayer};
use cubatrice_cards::pipeline::{select, should_render, Pipeline, Summary, Visitor};
use cubatrice_cards::store::AssetStore;
use cubatrice_cards::text::FontMetrics;

use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
struct Sheet {
    name: String,
    ops: Vec<String>,
}

impl Sheet {
    fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ops: Vec::new() }
    }
}

impl Bitmap for Sheet {
    fn width(&self) -> i32 {
        125
    }

    fn height(&self) -> i32 {
        100
    }
}

struct Recorder;

impl Canvas for Recorder {
    type Image = Sheet;

    fn copy(&self, img: &Sheet) -> Result<Sheet> {
        Ok(img.clone())
    }

    fn print(&self, mut img: Sheet, label: &LabelLayer) -> Result<Sheet> {
        img.ops.push(label.text.clone());
        Ok(img)
    }

    fn blit(&self, mut img: Sheet, src: &Sheet, _x: i32, _y: i32) -> Result<Sheet> {
        img.ops.push(format!("<{}>", src.name));
        Ok(img)
    }
}

struct Monospace;

impl FontMetrics for Monospace {
    fn text_width(&self, text: &str, size: u32) -> f64 {
        text.chars().count() as f64 * size as f64 * 0.6
    }
}

#[derive(Default)]
struct MemoryStore {
    missing_templates: Vec<Race>,
    missing_glyph: bool,
    saved: RefCell<Vec<(String, Sheet)>>,
}

impl AssetStore for MemoryStore {
    type Image = Sheet;

    fn template(&self, race: Race, upgraded: bool) -> Result<Sheet> {
        if self.missing_templates.contains(&race) {
            return Err(Error::template_open(race, upgraded, "no such file"));
        }
        let state = if upgraded { "upgraded" } else { "unupgraded" };
        Ok(Sheet::new(format!("{race}_{state}")))
    }

    fn glyph(&self, name: &str) -> Result<Sheet> {
        if self.missing_glyph {
            return Err(Error::glyph_open(name, "no such file"));
        }
        Ok(Sheet::new(name))
    }

    fn save(&self, card: &Sheet, filename: &str) -> Result<()> {
        self.saved.borrow_mut().push((filename.to_string(), card.clone()));
        Ok(())
    }
}

struct MemoryCatalog(HashMap<Race, &'static str>);

impl TechCatalog for MemoryCatalog {
    fn load(&self, race: Race) -> Result<Catalog> {
        let content = self
            .0
            .get(&race)
            .ok_or_else(|| Error::catalog_open(race, race.catalog_name(), "not found"))?;
        JsonCatalog::parse(content).map_err(|e| Error::catalog_deser(race, race.catalog_name(), e))
    }
}

#[derive(Default)]
struct Events(RefCell<Vec<String>>);

impl Visitor for &Events {
    fn on_race_skip(&self, race: Race) {
        self.0.borrow_mut().push(format!("skip {race}"));
    }

    fn on_race_err(&self, race: Race, e: &Error) {
        assert!(e.is_asset_failure(), "{e}");
        self.0.borrow_mut().push(format!("race error {race}"));
    }

    fn on_iter_err(&self, race: Race, id: TechId, e: &Error) {
        let kind = match e {
            Error::MissingDisplayName(_) => "no name",
            _ => "other",
        };
        self.0.borrow_mut().push(format!("card error {race} {id} {kind}"));
    }
}

const KIT: &str = r#"[
    {"id": 105, "name": "Genetic Resynthesis",
     "input": [{"Cubes": ["Food", 1]}],
     "output": [{"Cubes": ["Biotech", 2]}, {"VictoryPoint": 1}]},
    {"id": 5, "name": "Genetic Engineering",
     "input": [{"Cubes": ["Food", 2]}, {"Cubes": ["Culture", 1]}],
     "output": [{"Cubes": ["Biotech", 2]}, {"Token": "Envoy"}]}
]"#;

const UNITY: &str = r#"[
    {"id": 1, "name": "Quantum Computers",
     "input": [{"Cubes": ["Power", 1]}], "output": [{"Cubes": ["Information", 1]}]}
]"#;

const ZETH: &str = r#"[
    {"id": 7, "name": "Ubiquitous Cultural Repository",
     "input": [{"Cubes": ["Culture", 3]}], "output": [{"Cubes": ["Ultratech", 1]}]},
    {"id": 107, "name": "?",
     "input": [{"Cubes": ["Culture", 2]}], "output": [{"Cubes": ["Ultratech", 1]}]}
]"#;

fn catalog() -> MemoryCatalog {
    MemoryCatalog(
        [(Race::Kit, KIT), (Race::Unity, UNITY), (Race::Zeth, ZETH)]
            .into_iter()
            .collect(),
    )
}

fn run(store: &MemoryStore, races: &[Race], events: &Events) -> Result<Summary> {
    let names = DisplayNames::default();
    let catalog = catalog();
    let pipeline = Pipeline {
        store,
        catalog: &catalog,
        names: &names,
        metrics: &Monospace,
        glyph: "arrow_small",
        visitor: events,
    };
    pipeline.run(&Recorder, races)
}

#[test]
fn one_card_per_upgrade_state() {
    let store = MemoryStore::default();
    let events = Events::default();
    let summary = run(&store, &[Race::Kit, Race::Unity], &events).unwrap();

    assert_eq!(summary.rendered, 2);
    assert_eq!(summary.skipped_races, 1);
    let saved = store.saved.borrow();
    assert_eq!(saved.len(), 2);

    let (name, card) = &saved[0];
    assert_eq!(name, "kit_Genetic Engineering");
    assert_eq!(card.name, "kit_unupgraded");
    assert_eq!(card.ops, ["Genetic Engineering", "3", "<arrow_small>", "3"]);

    let (name, card) = &saved[1];
    assert_eq!(name, "kit_Genetic Resynthesis");
    assert_eq!(card.name, "kit_upgraded");
    assert_eq!(card.ops, ["Genetic Resynthesis", "1", "<arrow_small>", "6"]);

    assert!(saved.iter().all(|(name, _)| !name.starts_with("unity")));
    assert_eq!(*events.0.borrow(), ["skip unity"]);
}

#[test]
fn missing_names_skip_only_that_card() {
    let store = MemoryStore::default();
    let events = Events::default();
    let summary = run(&store, &[Race::Zeth], &events).unwrap();

    assert_eq!(summary.rendered, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(store.saved.borrow()[0].0, "zeth_Ubiquitous Cultural Repository");
    assert_eq!(*events.0.borrow(), ["card error zeth 107 no name"]);
}

#[test]
fn asset_failures_stop_only_their_race() {
    let store = MemoryStore {
        missing_templates: vec![Race::Kit],
        ..Default::default()
    };
    let events = Events::default();
    let summary = run(&store, &[Race::Caylion, Race::Kit, Race::Zeth], &events).unwrap();

    assert_eq!(summary.failed_races, 2);
    assert_eq!(summary.rendered, 1);
    assert_eq!(*events.0.borrow(), ["race error caylion", "race error kit", "card error zeth 107 no name"]);
}

#[test]
fn missing_glyph_stops_the_run() {
    let store = MemoryStore {
        missing_glyph: true,
        ..Default::default()
    };
    let events = Events::default();
    let result = run(&store, &[Race::Kit], &events);
    assert!(matches!(result, Err(Error::GlyphOpen(..))));
    assert!(store.saved.borrow().is_empty());
}

#[test]
fn selection_follows_upgrade_state() {
    let catalog = JsonCatalog::parse(KIT).unwrap();
    let base: Vec<_> = select(catalog.values(), false).iter().map(|t| t.id).collect();
    let upgraded: Vec<_> = select(catalog.values(), true).iter().map(|t| t.id).collect();
    assert_eq!(base, [TechId(5)]);
    assert_eq!(upgraded, [TechId(105)]);
    assert!(should_render(TechId(21), false));
    assert!(!should_render(TechId(100), true));
    assert!(should_render(TechId(101), true));
}
