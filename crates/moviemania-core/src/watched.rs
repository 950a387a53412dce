//! State transitions for the watched list.
//!
//! Every function takes the current list by reference and returns a new one.
//! Entries that a transition does not touch keep their relative order.

use moviemania_models::{WatchedEntry, WatchedSummary};

/// Add an entry. An entry whose id is already listed replaces the existing
/// one in place, so the list never holds two entries for the same id.
pub fn add(list: &[WatchedEntry], entry: WatchedEntry) -> Vec<WatchedEntry> {
    if contains(list, &entry.id) {
        return list
            .iter()
            .map(|existing| {
                if existing.id == entry.id {
                    entry.clone()
                } else {
                    existing.clone()
                }
            })
            .collect();
    }

    let mut next = list.to_vec();
    next.push(entry);
    next
}

pub fn update_rating(list: &[WatchedEntry], id: &str, rating: u8) -> Vec<WatchedEntry> {
    list.iter()
        .map(|entry| {
            if entry.id == id {
                WatchedEntry {
                    user_rating: rating,
                    ..entry.clone()
                }
            } else {
                entry.clone()
            }
        })
        .collect()
}

/// Remove the entry for `id`. Unknown ids leave the list unchanged.
pub fn delete(list: &[WatchedEntry], id: &str) -> Vec<WatchedEntry> {
    list.iter().filter(|entry| entry.id != id).cloned().collect()
}

pub fn contains(list: &[WatchedEntry], id: &str) -> bool {
    list.iter().any(|entry| entry.id == id)
}

pub fn find<'a>(list: &'a [WatchedEntry], id: &str) -> Option<&'a WatchedEntry> {
    list.iter().find(|entry| entry.id == id)
}

pub fn summary(list: &[WatchedEntry]) -> WatchedSummary {
    WatchedSummary::from_entries(list)
}
