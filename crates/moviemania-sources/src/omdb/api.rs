use crate::error::SourceError;
use moviemania_models::{MovieDetail, SearchResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

#[derive(Debug, Deserialize)]
struct OmdbDetailResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
}

/// Parse "142 min" into minutes. "N/A" and anything non-numeric yield None.
pub fn parse_runtime(runtime: &str) -> Option<u32> {
    runtime.split_whitespace().next()?.parse().ok()
}

/// Parse an IMDb rating such as "8.2". "N/A" yields None.
pub fn parse_rating(rating: &str) -> Option<f64> {
    let rating = rating.trim();
    if rating.is_empty() || rating == NOT_AVAILABLE {
        return None;
    }
    rating.parse().ok()
}

/// Decode a search response body
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResult>, SourceError> {
    let parsed: OmdbSearchResponse = serde_json::from_str(body)?;

    if parsed.response != "True" {
        let message = parsed.error.unwrap_or_else(|| "Movie not found!".to_string());
        return Err(SourceError::NotFound(message));
    }

    Ok(parsed
        .search
        .into_iter()
        .map(|item| SearchResult {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: item.poster,
        })
        .collect())
}

/// Decode a detail response body for `requested_id`
pub fn parse_detail_response(requested_id: &str, body: &str) -> Result<MovieDetail, SourceError> {
    let parsed: OmdbDetailResponse = serde_json::from_str(body)?;

    if parsed.response != "True" {
        let message = parsed.error.unwrap_or_else(|| "Movie not found!".to_string());
        return Err(SourceError::NotFound(message));
    }

    // Keyed by the requested id so the response matches the selection
    if let Some(returned) = parsed.imdb_id.as_deref().filter(|id| !id.is_empty() && *id != requested_id) {
        warn!("OMDb returned {} when asked for {}", returned, requested_id);
    }
    let id = requested_id.to_string();

    Ok(MovieDetail {
        runtime_minutes: parse_runtime(&parsed.runtime),
        external_rating: parse_rating(&parsed.imdb_rating),
        id,
        title: parsed.title,
        year: parsed.year,
        poster_url: parsed.poster,
        release_date: parsed.released,
        genre: parsed.genre,
        plot: parsed.plot,
        actors: parsed.actors,
        director: parsed.director,
    })
}

async fn get_body(client: &Client, base_url: &str, params: &[(&str, &str)]) -> Result<String, SourceError> {
    let response = client
        .get(base_url)
        .query(params)
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Http { status: status.as_u16() });
    }

    Ok(response.text().await?)
}

/// `GET {base_url}?apikey={key}&s={query}`
pub async fn search(client: &Client, base_url: &str, api_key: &str, query: &str) -> Result<Vec<SearchResult>, SourceError> {
    debug!("Searching OMDb for {:?}", query);
    let body = get_body(client, base_url, &[("apikey", api_key), ("s", query)]).await?;
    let results = parse_search_response(&body)?;
    debug!("OMDb search {:?} returned {} results", query, results.len());
    Ok(results)
}

/// `GET {base_url}?apikey={key}&i={id}`
pub async fn get_details(client: &Client, base_url: &str, api_key: &str, id: &str) -> Result<MovieDetail, SourceError> {
    debug!("Fetching OMDb details for {}", id);
    let body = get_body(client, base_url, &[("apikey", api_key), ("i", id)]).await?;
    parse_detail_response(id, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "Search": [
            {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "https://m.media-amazon.com/bb.jpg"},
            {"Title": "Batman v Superman: Dawn of Justice", "Year": "2016", "imdbID": "tt2975590", "Type": "movie", "Poster": "N/A"}
        ],
        "totalResults": "2",
        "Response": "True"
    }"#;

    const DETAIL_BODY: &str = r#"{
        "Title": "Inception",
        "Year": "2010",
        "Rated": "PG-13",
        "Released": "16 Jul 2010",
        "Runtime": "148 min",
        "Genre": "Action, Adventure, Sci-Fi",
        "Director": "Christopher Nolan",
        "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page",
        "Plot": "A thief who steals corporate secrets through the use of dream-sharing technology.",
        "Poster": "https://m.media-amazon.com/inception.jpg",
        "imdbRating": "8.8",
        "imdbID": "tt1375666",
        "Response": "True"
    }"#;

    #[test]
    fn test_parse_search_response() {
        let results = parse_search_response(SEARCH_BODY).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "tt0372784");
        assert_eq!(results[0].title, "Batman Begins");
        assert_eq!(results[0].year, "2005");
        assert_eq!(results[1].poster_url, "N/A");
    }

    #[test]
    fn test_parse_search_not_found() {
        let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let err = parse_search_response(body).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
        assert_eq!(err.to_string(), "Movie not found!");
    }

    #[test]
    fn test_parse_search_malformed() {
        let err = parse_search_response("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[test]
    fn test_parse_detail_response() {
        let detail = parse_detail_response("tt1375666", DETAIL_BODY).unwrap();
        assert_eq!(detail.id, "tt1375666");
        assert_eq!(detail.title, "Inception");
        assert_eq!(detail.release_date, "16 Jul 2010");
        assert_eq!(detail.runtime_minutes, Some(148));
        assert_eq!(detail.external_rating, Some(8.8));
        assert_eq!(detail.director, "Christopher Nolan");
    }

    #[test]
    fn test_parse_detail_not_available_fields() {
        let body = r#"{"Title": "Obscure", "Year": "1931", "Runtime": "N/A", "imdbRating": "N/A", "Response": "True"}"#;
        let detail = parse_detail_response("tt0000001", body).unwrap();
        assert_eq!(detail.id, "tt0000001");
        assert_eq!(detail.runtime_minutes, None);
        assert_eq!(detail.external_rating, None);
        assert_eq!(detail.plot, "");
    }

    #[test]
    fn test_parse_detail_incorrect_id() {
        let body = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;
        let err = parse_detail_response("bogus", body).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn test_parse_runtime() {
        assert_eq!(parse_runtime("142 min"), Some(142));
        assert_eq!(parse_runtime("90"), Some(90));
        assert_eq!(parse_runtime("N/A"), None);
        assert_eq!(parse_runtime(""), None);
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("7.5"), Some(7.5));
        assert_eq!(parse_rating("N/A"), None);
        assert_eq!(parse_rating(""), None);
    }
}
