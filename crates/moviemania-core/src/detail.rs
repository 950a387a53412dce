use crate::watched;
use moviemania_models::{MovieDetail, WatchedEntry};
use moviemania_sources::{MovieProvider, SourceError};
use thiserror::Error;
use tracing::{debug, warn};

pub const DETAIL_FAILED_MESSAGE: &str = "Something went wrong while fetching movie details!";
pub const DEFAULT_TITLE: &str = "MovieMania";
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetailError {
    #[error("no movie is selected")]
    NothingSelected,

    #[error("movie details have not loaded yet")]
    NotLoaded,

    #[error("movie {0} is already in the watched list")]
    AlreadyWatched(String),

    #[error("choose a rating before adding the movie")]
    NoRating,

    #[error("rating {0} is out of range (1-10)")]
    InvalidRating(u8),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    pub selected_id: Option<String>,
    /// Last loaded record. Kept when a later fetch fails.
    pub detail: Option<MovieDetail>,
    pub loading: bool,
    /// Rating shown in the rating control
    pub rating: Option<u8>,
}

impl DetailState {
    pub fn is_open(&self) -> bool {
        self.selected_id.is_some()
    }

    /// Detail record for the current selection, if it has arrived
    pub fn current(&self) -> Option<&MovieDetail> {
        let selected = self.selected_id.as_deref()?;
        self.detail.as_ref().filter(|d| d.id == selected)
    }
}

/// Fetch for one selected id
#[derive(Debug)]
pub struct DetailRequest {
    id: String,
}

impl DetailRequest {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn execute<P: MovieProvider + ?Sized>(self, provider: &P) -> DetailResponse {
        let outcome = provider.get_details(&self.id).await;
        DetailResponse { id: self.id, outcome }
    }
}

#[derive(Debug)]
pub struct DetailResponse {
    pub id: String,
    pub outcome: Result<MovieDetail, SourceError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailUpdate {
    Loaded,
    /// Fetch failed; the message belongs in the shared error slot
    Failed(&'static str),
    /// Selection moved on before the response arrived
    Stale,
}

/// How a rating change must be handled by the owner of the watched list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingChange {
    /// Movie is already watched: write the rating to its entry now
    WriteThrough { id: String, rating: u8 },
    /// Held until the user confirms "add to list"
    Pending,
}

#[derive(Debug, Default)]
pub struct DetailLoader {
    state: DetailState,
}

impl DetailLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Toggle selection of `id`. Selecting the open movie closes it.
    ///
    /// Returns the fetch to run when a movie was opened. The rating control
    /// is pre-filled from the watched list.
    pub fn select_id(&mut self, id: &str, watched: &[WatchedEntry]) -> Option<DetailRequest> {
        if id.is_empty() || self.state.selected_id.as_deref() == Some(id) {
            self.close();
            return None;
        }

        debug!("Selecting {}", id);
        self.state.selected_id = Some(id.to_string());
        self.state.loading = true;
        self.state.rating = watched::find(watched, id).map(|entry| entry.user_rating);

        Some(DetailRequest { id: id.to_string() })
    }

    pub fn close(&mut self) {
        if let Some(id) = self.state.selected_id.take() {
            debug!("Closing details for {}", id);
        }
        self.state = DetailState::default();
    }

    pub fn apply(&mut self, response: DetailResponse) -> DetailUpdate {
        if self.state.selected_id.as_deref() != Some(response.id.as_str()) {
            debug!("Ignoring details for {}: no longer selected", response.id);
            return DetailUpdate::Stale;
        }

        self.state.loading = false;
        match response.outcome {
            Ok(detail) => {
                self.state.detail = Some(detail);
                DetailUpdate::Loaded
            }
            Err(e) => {
                warn!("Failed to load details for {}: {}", response.id, e);
                DetailUpdate::Failed(DETAIL_FAILED_MESSAGE)
            }
        }
    }

    pub fn is_watched(&self, watched: &[WatchedEntry]) -> bool {
        self.state
            .selected_id
            .as_deref()
            .map(|id| watched::contains(watched, id))
            .unwrap_or(false)
    }

    pub fn set_rating(&mut self, rating: u8, watched: &[WatchedEntry]) -> Result<RatingChange, DetailError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(DetailError::InvalidRating(rating));
        }
        let id = self.state.selected_id.clone().ok_or(DetailError::NothingSelected)?;

        self.state.rating = Some(rating);
        if watched::contains(watched, &id) {
            Ok(RatingChange::WriteThrough { id, rating })
        } else {
            Ok(RatingChange::Pending)
        }
    }

    /// Whether "add to list" is offered
    pub fn can_add(&self, watched: &[WatchedEntry]) -> bool {
        self.check_add(watched).is_ok()
    }

    /// Build the entry for the open movie and close the view
    pub fn take_entry(&mut self, watched: &[WatchedEntry]) -> Result<WatchedEntry, DetailError> {
        let (detail, rating) = self.check_add(watched)?;
        let entry = WatchedEntry::from_detail(detail, rating);
        self.close();
        Ok(entry)
    }

    fn check_add(&self, watched: &[WatchedEntry]) -> Result<(&MovieDetail, u8), DetailError> {
        let id = self.state.selected_id.as_deref().ok_or(DetailError::NothingSelected)?;
        if watched::contains(watched, id) {
            return Err(DetailError::AlreadyWatched(id.to_string()));
        }
        let rating = self.state.rating.ok_or(DetailError::NoRating)?;
        let detail = match self.state.current() {
            Some(detail) if !self.state.loading => detail,
            _ => return Err(DetailError::NotLoaded),
        };
        Ok((detail, rating))
    }

    pub fn window_title(&self) -> String {
        match self.state.current() {
            Some(detail) if !detail.title.is_empty() => format!("Movie | {}", detail.title),
            _ => DEFAULT_TITLE.to_string(),
        }
    }
}
