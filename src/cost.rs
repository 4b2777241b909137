//! Resource amounts and the printable cost they add up to.
//!
//! Every resource has a weight expressed in half cost units, so the value
//! printed on a card is the weighted total divided by two, with a trailing
//! `½` when the total is odd.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Suffix appended to a cost with an odd number of half units.
pub const HALF: &str = "½";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CubeKind {
    Biotech,
    Power,
    Information,
    Culture,
    Food,
    Industry,
    Ship,
    Ultratech,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    Cube(CubeKind),
    VictoryPoint,
}

/// Which pool a resource is paid from. Both weigh the same.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Ledger {
    Standard,
    Donation,
}

/// Weight of each resource in half cost units.
pub const WEIGHTS: [(Resource, u64); 9] = [
    (Resource::Cube(CubeKind::Biotech), 3),
    (Resource::Cube(CubeKind::Power), 3),
    (Resource::Cube(CubeKind::Information), 3),
    (Resource::Cube(CubeKind::Culture), 2),
    (Resource::Cube(CubeKind::Food), 2),
    (Resource::Cube(CubeKind::Industry), 2),
    (Resource::Cube(CubeKind::Ship), 2),
    (Resource::Cube(CubeKind::Ultratech), 6),
    (Resource::VictoryPoint, 6),
];

impl Resource {
    pub fn weight(&self) -> Option<u64> {
        WEIGHTS
            .iter()
            .find(|(resource, _)| resource == self)
            .map(|(_, weight)| *weight)
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "Biotech" => CubeKind::Biotech,
            "Power" => CubeKind::Power,
            "Information" => CubeKind::Information,
            "Culture" => CubeKind::Culture,
            "Food" => CubeKind::Food,
            "Industry" => CubeKind::Industry,
            "Ship" => CubeKind::Ship,
            "Ultratech" => CubeKind::Ultratech,
            "VictoryPoint" => return Ok(Resource::VictoryPoint),
            _ => return Err(format!("unknown resource kind `{s}`")),
        };
        Ok(Resource::Cube(kind))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ResourceAmount {
    pub ledger: Ledger,
    pub kind: Resource,
    pub quantity: u64,
}

impl ResourceAmount {
    pub fn new(kind: Resource, quantity: u64) -> Self {
        Self { ledger: Ledger::Standard, kind, quantity }
    }

    pub fn donation(kind: Resource, quantity: u64) -> Self {
        Self { ledger: Ledger::Donation, kind, quantity }
    }

    /// Reads one catalog entry. Both `{"Cubes": ["Biotech", 3]}` and the
    /// legacy `{"VictoryPoint": 2}` forms are understood, with their
    /// `Donation` counterparts. Only the first key of an entry is read.
    fn from_json(value: &Value) -> Option<Self> {
        let (tag, body) = value.as_object()?.iter().next()?;
        let ledger = match tag.as_str() {
            "Cubes" | "VictoryPoint" => Ledger::Standard,
            "DonationCubes" | "DonationVictoryPoint" => Ledger::Donation,
            _ => return None,
        };
        let (kind, quantity) = match tag.as_str() {
            "Cubes" | "DonationCubes" => match body.as_array()?.as_slice() {
                [kind, quantity] => (kind.as_str()?.parse().ok()?, quantity.as_u64()?),
                _ => return None,
            },
            _ => (Resource::VictoryPoint, body.as_u64()?),
        };
        Some(Self { ledger, kind, quantity })
    }
}

/// One input or output entry of a technology, as read from the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Item {
    Resource(ResourceAmount),
    /// An entry that does not describe a weighted resource, kept verbatim
    /// for reporting.
    Unrecognized(String),
}

impl From<Value> for Item {
    fn from(value: Value) -> Self {
        match ResourceAmount::from_json(&value) {
            Some(amount) => Item::Resource(amount),
            None => Item::Unrecognized(value.to_string()),
        }
    }
}

impl From<ResourceAmount> for Item {
    fn from(amount: ResourceAmount) -> Self {
        Item::Resource(amount)
    }
}

/// A printable cost, stored as a count of half units.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(pub u64);

impl Cost {
    /// Sums the weighted resources in `items`. Unrecognized entries are
    /// reported and left out of the sum.
    pub fn of<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut total: u64 = 0;
        for item in items {
            match item {
                Item::Resource(amount) => {
                    let sum = amount
                        .kind
                        .weight()
                        .and_then(|weight| weight.checked_mul(amount.quantity))
                        .and_then(|weighted| total.checked_add(weighted));
                    match sum {
                        Some(sum) => total = sum,
                        None => log::warn!("cannot add {amount:?} to the cost, skipping"),
                    }
                }
                Item::Unrecognized(raw) => log::warn!("bad cost entry {raw}, skipping"),
            }
        }
        Self(total)
    }

    pub fn whole(&self) -> u64 {
        self.0 / 2
    }

    pub fn has_half(&self) -> bool {
        self.0 % 2 == 1
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_half() {
            write!(f, "{}{HALF}", self.whole())
        } else {
            write!(f, "{}", self.whole())
        }
    }
}

/// Turns a list of entries into the cost string printed on a card.
pub fn aggregate(items: &[Item]) -> String {
    Cost::of(items).to_string()
}
