use serde::{Deserialize, Serialize};
use crate::movie_detail::MovieDetail;

/// A movie the user has rated and added to their watched list.
///
/// Field names on disk match the list the browser version of MovieMania
/// stored, so an exported list can be dropped into the data directory as is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    #[serde(rename = "imdbID")]
    pub id: String,
    pub title: String,
    #[serde(rename = "poster")]
    pub poster_url: String,
    pub year: String,
    #[serde(rename = "imdbRating", default)]
    pub external_rating: Option<f64>,
    #[serde(rename = "userRating")]
    pub user_rating: u8, // 1-10
    #[serde(rename = "runtime", default)]
    pub runtime_minutes: Option<u32>,
}

impl WatchedEntry {
    /// Build an entry from a fetched detail record and the chosen rating
    pub fn from_detail(detail: &MovieDetail, user_rating: u8) -> Self {
        Self {
            id: detail.id.clone(),
            title: detail.title.clone(),
            poster_url: detail.poster_url.clone(),
            year: detail.year.clone(),
            external_rating: detail.external_rating,
            user_rating,
            runtime_minutes: detail.runtime_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_browser_format() {
        let json = r#"{
            "imdbID": "tt0372784",
            "title": "Batman Begins",
            "poster": "https://example.com/bb.jpg",
            "year": "2005",
            "imdbRating": 8.2,
            "userRating": 9,
            "runtime": 140
        }"#;

        let entry: WatchedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "tt0372784");
        assert_eq!(entry.user_rating, 9);
        assert_eq!(entry.external_rating, Some(8.2));
        assert_eq!(entry.runtime_minutes, Some(140));
    }

    #[test]
    fn test_deserialize_missing_numbers() {
        // NaN was written as null by JSON.stringify
        let json = r#"{
            "imdbID": "tt1",
            "title": "Unknown",
            "poster": "N/A",
            "year": "1999",
            "imdbRating": null,
            "userRating": 4
        }"#;

        let entry: WatchedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.external_rating, None);
        assert_eq!(entry.runtime_minutes, None);
    }

    #[test]
    fn test_from_detail() {
        let detail = MovieDetail {
            id: "tt001".to_string(),
            title: "Movie 1".to_string(),
            year: "2020".to_string(),
            poster_url: "poster".to_string(),
            release_date: "01 Jan 2020".to_string(),
            runtime_minutes: Some(101),
            genre: "Drama".to_string(),
            external_rating: Some(7.1),
            plot: String::new(),
            actors: String::new(),
            director: String::new(),
        };

        let entry = WatchedEntry::from_detail(&detail, 7);
        assert_eq!(entry.id, "tt001");
        assert_eq!(entry.user_rating, 7);
        assert_eq!(entry.runtime_minutes, Some(101));
        assert_eq!(entry.external_rating, Some(7.1));
    }
}
