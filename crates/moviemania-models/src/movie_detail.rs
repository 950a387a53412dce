use serde::{Deserialize, Serialize};

/// Full record for the currently selected movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub release_date: String,
    /// Parsed from "<N> min"; None when the provider reports "N/A"
    pub runtime_minutes: Option<u32>,
    pub genre: String,
    /// IMDb rating (0.0-10.0); None when the provider reports "N/A"
    pub external_rating: Option<f64>,
    pub plot: String,
    pub actors: String,
    pub director: String,
}

impl MovieDetail {
    /// Runtime as displayed next to the release date
    pub fn runtime_label(&self) -> String {
        match self.runtime_minutes {
            Some(minutes) => format!("{} min", minutes),
            None => "N/A".to_string(),
        }
    }
}
