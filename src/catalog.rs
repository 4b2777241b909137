//! Technology definitions per race, and the names printed on their cards.

use crate::cost::Item;
use crate::error::{Error, Result};

#[cfg(feature = "cli")]
use clap::ValueEnum;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
pub enum Race {
    Caylion,
    EniEt,
    Faderan,
    Imdril,
    Kit,
    Kjas,
    Unity,
    Yengii,
    Zeth,
}

impl Race {
    pub const ALL: [Race; 9] = [
        Race::Caylion,
        Race::EniEt,
        Race::Faderan,
        Race::Imdril,
        Race::Kit,
        Race::Kjas,
        Race::Unity,
        Race::Yengii,
        Race::Zeth,
    ];

    /// Lowercase name used in image file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Race::Caylion => "caylion",
            Race::EniEt => "eniet",
            Race::Faderan => "faderan",
            Race::Imdril => "imdril",
            Race::Kit => "kit",
            Race::Kjas => "kjas",
            Race::Unity => "unity",
            Race::Yengii => "yengii",
            Race::Zeth => "zeth",
        }
    }

    /// Name of the race's catalog file, without extension.
    pub fn catalog_name(&self) -> &'static str {
        match self {
            Race::Caylion => "Caylion",
            Race::EniEt => "Eni Et",
            Race::Faderan => "Faderan",
            Race::Imdril => "Imdril",
            Race::Kit => "Kit",
            Race::Kjas => "Kjas",
            Race::Unity => "Unity",
            Race::Yengii => "Yengii",
            Race::Zeth => "Zeth",
        }
    }

    /// The Unity share every other race's technologies and have no
    /// cards of their own.
    pub fn has_technology_track(&self) -> bool {
        *self != Race::Unity
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Technology id. `1..=21` are base technologies, and `id + 100` is the
/// upgraded form of `id`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct TechId(pub u32);

impl TechId {
    pub const UPGRADE_OFFSET: u32 = 100;

    pub fn is_upgraded(&self) -> bool {
        self.0 > Self::UPGRADE_OFFSET
    }

    /// The unupgraded id of the same technology slot.
    pub fn base(&self) -> TechId {
        if self.is_upgraded() {
            TechId(self.0 - Self::UPGRADE_OFFSET)
        } else {
            *self
        }
    }

    pub fn upgraded(&self) -> TechId {
        TechId(self.base().0 + Self::UPGRADE_OFFSET)
    }

    /// Release tier of the technology slot, if it is one of the 21.
    pub fn tier(&self) -> Option<u32> {
        match self.base().0 {
            1..=7 => Some(1),
            8..=14 => Some(2),
            15..=21 => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for TechId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TechnologyRecord {
    pub id: TechId,
    pub name: String,
    #[serde(default)]
    pub input: Vec<Item>,
    #[serde(default)]
    pub output: Vec<Item>,
}

/// All technologies of a race, ordered by id.
pub type Catalog = BTreeMap<TechId, TechnologyRecord>;

pub trait TechCatalog {
    fn load(&self, race: Race) -> Result<Catalog>;
}

/// Reads `<folder>/<race catalog name>.json`, a JSON array of technology
/// records.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    pub folder: PathBuf,
}

impl JsonCatalog {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self { folder: folder.into() }
    }

    pub fn path(&self, race: Race) -> PathBuf {
        let mut path = self.folder.clone();
        path.push(format!("{}.json", race.catalog_name()));
        path
    }

    pub fn parse(content: &str) -> serde_json::Result<Catalog> {
        let records: Vec<TechnologyRecord> = serde_json::from_str(content)?;
        Ok(records.into_iter().map(|r| (r.id, r)).collect())
    }
}

impl TechCatalog for JsonCatalog {
    fn load(&self, race: Race) -> Result<Catalog> {
        let path = self.path(race);
        let content = fs::read_to_string(&path).map_err(|e| Error::catalog_open(race, &path, e))?;
        Self::parse(&content).map_err(|e| Error::catalog_deser(race, &path, e))
    }
}

const TECH_NAMES: [(u32, &str); 35] = [
    (1, "Quantum Computers"),
    (101, "Nondeterministic Polynomial Collapse"),
    (2, "Universal Translator"),
    (102, "Universal Empathetic Communication"),
    (3, "Nanotechnology"),
    (103, "Nanofabricators"),
    (4, "Atomic Transmutations"),
    (104, "Pseudomaterials"),
    (5, "Genetic Engineering"),
    (105, "Genetic Resynthesis"),
    (6, "Clinical Immortality"),
    (106, "Practical Immortality"),
    (7, "Ubiquitous Cultural Repository"),
    (8, "Hyperspace Mining"),
    (108, "Hyperspace Settlements"),
    (9, "Cross Species Ethical Equality"),
    (10, "Antimatter Power"),
    (110, "Antimatter Compounds"),
    (11, "Achronal Analysis"),
    (111, "Time Viewers"),
    (12, "Singulary Control"),
    (112, "Wormhole Grid"),
    (13, "Interspecies Medical Exchange"),
    (113, "Panbiologic Medicine"),
    (14, "Organic Construction"),
    (15, "Megastructures"),
    (115, "Dyson Swarms"),
    (16, "Social Exodus"),
    // TODO: confirm against the printed card
    (116, "Galactic Colonization"),
    (17, "Matter Generation"),
    (18, "Galactic Telecom Control"),
    (19, "Poly Species Corporations"),
    (20, "Xeno Cultural Exchange"),
    (21, "Temporal Dilation"),
    (121, "Stasis Field"),
];

/// Card titles by technology id. Upgraded names that are not known yet
/// are absent rather than guessed.
#[derive(Debug, Clone)]
pub struct DisplayNames(HashMap<TechId, String>);

impl DisplayNames {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, id: TechId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn insert(&mut self, id: TechId, name: impl Into<String>) {
        self.0.insert(id, name.into());
    }

    /// Adds or replaces names from string keyed entries, as found in a
    /// configuration file.
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Result<Self> {
        for (key, name) in overrides {
            let id = key
                .trim()
                .parse::<u32>()
                .map_err(|_| Error::InvalidNameOverride(key.clone()))?;
            self.insert(TechId(id), name.clone());
        }
        Ok(self)
    }
}

impl Default for DisplayNames {
    fn default() -> Self {
        Self(
            TECH_NAMES
                .iter()
                .map(|(id, name)| (TechId(*id), name.to_string()))
                .collect(),
        )
    }
}
