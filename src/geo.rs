//! Geographic Classification
//!
//! Normalizes free-text location names to a canonical set of Indian states
//! and union territories, assigns each to a coarse zone, and classifies an
//! ad's target-location set (single state, regional, national).
//!
//! Unrecognized names normalize to `None` and are excluded from region-scoped
//! aggregates; they are never coerced to a default region.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A campaign targeting this many distinct zones or more is national.
pub const NATIONAL_ZONE_THRESHOLD: usize = 4;
/// A campaign targeting this many distinct states or more is national.
pub const NATIONAL_STATE_THRESHOLD: usize = 10;

/// Coarse geographic zone. Declaration order is the fixed tie-break order for
/// [`LocationClassification::primary_zone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Zone {
    North,
    South,
    East,
    West,
    Central,
    Northeast,
    Unknown,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Zone::North => "North",
            Zone::South => "South",
            Zone::East => "East",
            Zone::West => "West",
            Zone::Central => "Central",
            Zone::Northeast => "Northeast",
            Zone::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StateKind {
    State,
    #[serde(rename = "UT")]
    UnionTerritory,
}

/// A canonical state or union territory.
#[derive(Debug, Clone, Copy)]
pub struct StateInfo {
    pub name: &'static str,
    pub zone: Zone,
    pub kind: StateKind,
    pub capital: bool,
}

/// The canonical region set: all Indian states and UTs with zone assignments.
pub static STATES: &[StateInfo] = &[
    // North
    StateInfo { name: "Delhi", zone: Zone::North, kind: StateKind::UnionTerritory, capital: true },
    StateInfo { name: "Haryana", zone: Zone::North, kind: StateKind::State, capital: false },
    StateInfo { name: "Himachal Pradesh", zone: Zone::North, kind: StateKind::State, capital: false },
    StateInfo { name: "Jammu and Kashmir", zone: Zone::North, kind: StateKind::UnionTerritory, capital: false },
    StateInfo { name: "Ladakh", zone: Zone::North, kind: StateKind::UnionTerritory, capital: false },
    StateInfo { name: "Punjab", zone: Zone::North, kind: StateKind::State, capital: false },
    StateInfo { name: "Rajasthan", zone: Zone::North, kind: StateKind::State, capital: false },
    StateInfo { name: "Chandigarh", zone: Zone::North, kind: StateKind::UnionTerritory, capital: true },
    StateInfo { name: "Uttarakhand", zone: Zone::North, kind: StateKind::State, capital: false },
    // South
    StateInfo { name: "Andhra Pradesh", zone: Zone::South, kind: StateKind::State, capital: false },
    StateInfo { name: "Karnataka", zone: Zone::South, kind: StateKind::State, capital: false },
    StateInfo { name: "Kerala", zone: Zone::South, kind: StateKind::State, capital: false },
    StateInfo { name: "Tamil Nadu", zone: Zone::South, kind: StateKind::State, capital: false },
    StateInfo { name: "Telangana", zone: Zone::South, kind: StateKind::State, capital: false },
    StateInfo { name: "Puducherry", zone: Zone::South, kind: StateKind::UnionTerritory, capital: false },
    StateInfo { name: "Lakshadweep", zone: Zone::South, kind: StateKind::UnionTerritory, capital: false },
    StateInfo { name: "Andaman and Nicobar Islands", zone: Zone::South, kind: StateKind::UnionTerritory, capital: false },
    // East
    StateInfo { name: "Bihar", zone: Zone::East, kind: StateKind::State, capital: false },
    StateInfo { name: "Jharkhand", zone: Zone::East, kind: StateKind::State, capital: false },
    StateInfo { name: "Odisha", zone: Zone::East, kind: StateKind::State, capital: false },
    StateInfo { name: "West Bengal", zone: Zone::East, kind: StateKind::State, capital: false },
    // West
    StateInfo { name: "Goa", zone: Zone::West, kind: StateKind::State, capital: false },
    StateInfo { name: "Gujarat", zone: Zone::West, kind: StateKind::State, capital: false },
    StateInfo { name: "Maharashtra", zone: Zone::West, kind: StateKind::State, capital: false },
    StateInfo { name: "Dadra and Nagar Haveli and Daman and Diu", zone: Zone::West, kind: StateKind::UnionTerritory, capital: false },
    // Central
    StateInfo { name: "Chhattisgarh", zone: Zone::Central, kind: StateKind::State, capital: false },
    StateInfo { name: "Madhya Pradesh", zone: Zone::Central, kind: StateKind::State, capital: false },
    StateInfo { name: "Uttar Pradesh", zone: Zone::Central, kind: StateKind::State, capital: false },
    // Northeast
    StateInfo { name: "Arunachal Pradesh", zone: Zone::Northeast, kind: StateKind::State, capital: false },
    StateInfo { name: "Assam", zone: Zone::Northeast, kind: StateKind::State, capital: false },
    StateInfo { name: "Manipur", zone: Zone::Northeast, kind: StateKind::State, capital: false },
    StateInfo { name: "Meghalaya", zone: Zone::Northeast, kind: StateKind::State, capital: false },
    StateInfo { name: "Mizoram", zone: Zone::Northeast, kind: StateKind::State, capital: false },
    StateInfo { name: "Nagaland", zone: Zone::Northeast, kind: StateKind::State, capital: false },
    StateInfo { name: "Sikkim", zone: Zone::Northeast, kind: StateKind::State, capital: false },
    StateInfo { name: "Tripura", zone: Zone::Northeast, kind: StateKind::State, capital: false },
];

/// Alternate names and common abbreviations.
static ALIASES: &[(&str, &str)] = &[
    ("NCT of Delhi", "Delhi"),
    ("National Capital Territory of Delhi", "Delhi"),
    ("New Delhi", "Delhi"),
    ("J&K", "Jammu and Kashmir"),
    ("Jammu & Kashmir", "Jammu and Kashmir"),
    ("HP", "Himachal Pradesh"),
    ("AP", "Andhra Pradesh"),
    ("TN", "Tamil Nadu"),
    ("KA", "Karnataka"),
    ("KL", "Kerala"),
    ("TS", "Telangana"),
    ("WB", "West Bengal"),
    ("MH", "Maharashtra"),
    ("MP", "Madhya Pradesh"),
    ("UP", "Uttar Pradesh"),
    ("CG", "Chhattisgarh"),
    ("OR", "Odisha"),
    ("RJ", "Rajasthan"),
    ("GJ", "Gujarat"),
    ("PB", "Punjab"),
    ("HR", "Haryana"),
    ("UK", "Uttarakhand"),
    ("A&N Islands", "Andaman and Nicobar Islands"),
    ("DNH & DD", "Dadra and Nagar Haveli and Daman and Diu"),
];

/// One normalized entry of a target-location set.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedState {
    pub name: &'static str,
    pub zone: Zone,
    pub kind: StateKind,
    #[serde(rename = "isCapital")]
    pub capital: bool,
}

/// Aggregated classification of an ad's target-location set.
#[derive(Debug, Clone, Serialize)]
pub struct LocationClassification {
    pub states: Vec<ClassifiedState>,
    #[serde(rename = "zoneCounts")]
    pub zone_counts: BTreeMap<Zone, u32>,
    #[serde(rename = "primaryZone")]
    pub primary_zone: Zone,
    #[serde(rename = "isNational")]
    pub is_national: bool,
    #[serde(rename = "stateCount")]
    pub state_count: usize,
    #[serde(rename = "uniqueStates")]
    pub unique_states: Vec<&'static str>,
}

impl Default for LocationClassification {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            zone_counts: BTreeMap::new(),
            primary_zone: Zone::Unknown,
            is_national: false,
            state_count: 0,
            unique_states: Vec::new(),
        }
    }
}

/// Normalize a raw location name to its canonical state name.
///
/// Resolution order: alias exact match, canonical exact match, then a
/// case-insensitive pass over both tables. `None` means "not a recognized
/// state"; callers must exclude such entries from region-scoped aggregates.
pub fn normalize_region_name(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some((_, canonical)) = ALIASES.iter().find(|(alias, _)| *alias == trimmed) {
        return Some(*canonical);
    }

    if let Some(state) = STATES.iter().find(|s| s.name == trimmed) {
        return Some(state.name);
    }

    let lower = trimmed.to_lowercase();
    for (alias, canonical) in ALIASES {
        if alias.to_lowercase() == lower || canonical.to_lowercase() == lower {
            return Some(*canonical);
        }
    }
    STATES
        .iter()
        .find(|s| s.name.to_lowercase() == lower)
        .map(|s| s.name)
}

/// Look up the canonical table entry for a (possibly raw) state name.
pub fn state_info(name: &str) -> Option<&'static StateInfo> {
    let canonical = normalize_region_name(name)?;
    STATES.iter().find(|s| s.name == canonical)
}

/// Zone of a state; [`Zone::Unknown`] for unrecognized input.
pub fn zone_of(name: &str) -> Zone {
    state_info(name).map(|s| s.zone).unwrap_or(Zone::Unknown)
}

/// Classify a set of raw location names.
///
/// Unrecognized names are dropped. `primary_zone` is the zone with the most
/// entries; ties resolve to the zone earliest in the [`Zone`] declaration
/// order. A campaign is national when it reaches either fixed threshold
/// (distinct zones or distinct states).
pub fn classify_locations<'a, I>(names: I) -> LocationClassification
where
    I: IntoIterator<Item = &'a str>,
{
    let mut classification = LocationClassification::default();

    for raw in names {
        let Some(info) = state_info(raw) else {
            continue;
        };

        if !classification.unique_states.contains(&info.name) {
            classification.unique_states.push(info.name);
        }
        classification.states.push(ClassifiedState {
            name: info.name,
            zone: info.zone,
            kind: info.kind,
            capital: info.capital,
        });
        *classification.zone_counts.entry(info.zone).or_insert(0) += 1;
    }

    classification.state_count = classification.unique_states.len();

    let mut max_count = 0;
    for (zone, count) in &classification.zone_counts {
        if *count > max_count {
            max_count = *count;
            classification.primary_zone = *zone;
        }
    }

    classification.is_national = classification.zone_counts.len() >= NATIONAL_ZONE_THRESHOLD
        || classification.state_count >= NATIONAL_STATE_THRESHOLD;

    classification
}

/// Classify a serialized target-location payload.
///
/// The payload is a JSON array of objects with a `name` field. A payload that
/// fails to decode classifies the same as an empty location set.
pub fn classify_locations_json(raw: &str) -> LocationClassification {
    #[derive(serde::Deserialize)]
    struct RawLocation {
        name: Option<String>,
    }

    let locations: Vec<RawLocation> = match serde_json::from_str(raw) {
        Ok(locations) => locations,
        Err(error) => {
            tracing::debug!(%error, "unparseable target_locations payload");
            return LocationClassification::default();
        }
    };

    let names: Vec<String> = locations.into_iter().filter_map(|l| l.name).collect();
    classify_locations(names.iter().map(String::as_str))
}

/// Human-readable one-line summary of a location classification.
pub fn format_location_summary(classification: &LocationClassification) -> String {
    if classification.state_count == 0 {
        return "Unknown".to_string();
    }
    if classification.is_national {
        return format!("National Campaign ({} states)", classification.state_count);
    }
    if classification.state_count == 1 {
        return classification.unique_states[0].to_string();
    }
    if classification.state_count <= 3 {
        return classification.unique_states.join(", ");
    }
    format!(
        "{} Region ({} states)",
        classification.primary_zone, classification.state_count
    )
}

/// All canonical states assigned to a zone.
pub fn states_in_zone(zone: Zone) -> Vec<&'static str> {
    STATES
        .iter()
        .filter(|s| s.zone == zone)
        .map(|s| s.name)
        .collect()
}

/// Per-zone counts of states and union territories.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ZoneStats {
    pub states: u32,
    pub uts: u32,
    pub total: u32,
}

pub fn zone_stats() -> BTreeMap<Zone, ZoneStats> {
    let mut stats: BTreeMap<Zone, ZoneStats> = BTreeMap::new();
    for state in STATES {
        let entry = stats.entry(state.zone).or_default();
        entry.total += 1;
        match state.kind {
            StateKind::State => entry.states += 1,
            StateKind::UnionTerritory => entry.uts += 1,
        }
    }
    stats
}
