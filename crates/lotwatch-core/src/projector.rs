//! Filtering and ordering of the record set for display.
//!
//! [`project`] is a pure function of the store snapshot and the [`Query`]:
//! the list panel, the dropdown and the map markers all derive from the same
//! ordered result, so the sort must be stable for them to line up.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::CarparkRecord;
use crate::store::CarparkStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    LotsDesc,
    LotsAsc,
    NameAsc,
    DistanceAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::LotsDesc,
        SortKey::LotsAsc,
        SortKey::NameAsc,
        SortKey::DistanceAsc,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::LotsDesc => "lots-desc",
            SortKey::LotsAsc => "lots-asc",
            SortKey::NameAsc => "name-asc",
            SortKey::DistanceAsc => "distance-asc",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key '{0}'; expected one of lots-desc, lots-asc, name-asc, distance-asc")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub search_text: String,
    pub lot_type_filter: Option<String>,
    pub sort_key: SortKey,
}

impl Query {
    #[must_use]
    pub fn matches(&self, record: &CarparkRecord) -> bool {
        let needle = self.search_text.trim().to_lowercase();
        let text_ok = needle.is_empty() || record.haystack().contains(&needle);
        let type_ok = match self.lot_type_filter.as_deref() {
            None | Some("") => true,
            Some(t) => record.lot_type == t,
        };
        text_ok && type_ok
    }
}

/// Filter and stably sort the store's records for `query`.
#[must_use]
pub fn project<'a>(store: &'a CarparkStore, query: &Query) -> Vec<&'a CarparkRecord> {
    let mut items: Vec<&CarparkRecord> = store.all().iter().filter(|r| query.matches(r)).collect();

    // `sort_by` is stable; equal keys keep feed order.
    match query.sort_key {
        SortKey::LotsDesc => items.sort_by(|a, b| b.available_lots.cmp(&a.available_lots)),
        SortKey::LotsAsc => items.sort_by(|a, b| a.available_lots.cmp(&b.available_lots)),
        SortKey::NameAsc => items.sort_by(|a, b| collate(&a.name, &b.name)),
        SortKey::DistanceAsc => items.sort_by(|a, b| compare_distance(a.distance, b.distance)),
    }
    items
}

/// Case-insensitive collation. Names equal up to case put lowercase first,
/// as ICU collation does.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Unknown distances sort after every known one.
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
