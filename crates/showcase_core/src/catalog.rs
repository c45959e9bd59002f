use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::Exclusions;

/// One repository row from the public catalog feed.
///
/// The feed is an external snapshot: rows are never mutated locally and a
/// fresh copy is fetched on every sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

/// A catalog row joined with its current exclusion status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedEntry {
    pub entry: CatalogEntry,
    pub excluded: bool,
}

/// Joins the catalog snapshot with the exclusion set by name equality.
///
/// Output order equals catalog order. The status is computed here on every
/// read rather than stored on the entry, so a stale flag cannot survive a
/// set mutation.
pub fn annotate(catalog: &[CatalogEntry], exclusions: &Exclusions) -> Vec<AnnotatedEntry> {
    let excluded: HashSet<&str> = exclusions.names().iter().map(String::as_str).collect();
    catalog
        .iter()
        .map(|entry| AnnotatedEntry {
            excluded: excluded.contains(entry.name.as_str()),
            entry: entry.clone(),
        })
        .collect()
}
