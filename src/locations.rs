//! Static table of the administrative regions served by the proxy.
//!
//! Each region maps one-to-one onto a CWA township-forecast dataset. The table
//! is compiled into the binary and never mutated.

use serde::{Serialize, Serializer};
use std::fmt;

/// `(location name, dataset id)` pairs for the CWA township forecasts for the
/// next 3 days. Each county's weekly bundle sits at the id two above it.
const DATASETS: [(&str, &str); 22] = [
    ("宜蘭縣", "F-D0047-001"),
    ("桃園市", "F-D0047-005"),
    ("新竹縣", "F-D0047-009"),
    ("苗栗縣", "F-D0047-013"),
    ("彰化縣", "F-D0047-017"),
    ("南投縣", "F-D0047-021"),
    ("雲林縣", "F-D0047-025"),
    ("嘉義縣", "F-D0047-029"),
    ("屏東縣", "F-D0047-033"),
    ("臺東縣", "F-D0047-037"),
    ("花蓮縣", "F-D0047-041"),
    ("澎湖縣", "F-D0047-045"),
    ("基隆市", "F-D0047-049"),
    ("新竹市", "F-D0047-053"),
    ("嘉義市", "F-D0047-057"),
    ("臺北市", "F-D0047-061"),
    ("高雄市", "F-D0047-065"),
    ("新北市", "F-D0047-069"),
    ("臺中市", "F-D0047-073"),
    ("臺南市", "F-D0047-077"),
    ("連江縣", "F-D0047-081"),
    ("金門縣", "F-D0047-085"),
];

/// Table position of the location used when none valid is requested.
const DEFAULT_INDEX: usize = 15;

/// Name used when no valid location is requested or configured.
pub const DEFAULT_LOCATION_NAME: &str = DATASETS[DEFAULT_INDEX].0;

/// A validated administrative region together with its upstream dataset id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    name: &'static str,
    dataset_id: &'static str,
}

impl Location {
    /// Looks up `name` in the allow-list. Matching is exact.
    pub fn lookup(name: &str) -> Option<Self> {
        DATASETS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(name, dataset_id)| Self { name, dataset_id })
    }

    /// Resolves a caller-supplied location name.
    ///
    /// Missing or unknown names are silently replaced by `default`; this never
    /// fails.
    pub fn resolve(requested: Option<&str>, default: Location) -> Self {
        requested.and_then(Self::lookup).unwrap_or(default)
    }

    /// Iterates over every known location in table order.
    pub fn all() -> impl Iterator<Item = Location> {
        DATASETS
            .iter()
            .map(|&(name, dataset_id)| Self { name, dataset_id })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn dataset_id(&self) -> &'static str {
        self.dataset_id
    }
}

impl Default for Location {
    fn default() -> Self {
        let (name, dataset_id) = DATASETS[DEFAULT_INDEX];
        Self { name, dataset_id }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}
