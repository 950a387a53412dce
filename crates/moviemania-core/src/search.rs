use moviemania_models::SearchResult;
use moviemania_sources::{MovieProvider, SourceError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const NOT_FOUND_MESSAGE: &str = "Movie not Found";
pub const SEARCH_FAILED_MESSAGE: &str = "Something went wrong while fetching movies!";

/// Query text plus whatever the latest lookup produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub loading: bool,
    /// Shared error slot; the detail loader reports its failures here too
    pub error: Option<String>,
}

/// What the results panel shows. Loading hides everything else, an error
/// hides the list.
#[derive(Debug, PartialEq)]
pub enum SearchView<'a> {
    Loading,
    Error(&'a str),
    /// Nothing typed yet
    Prompt,
    Results(&'a [SearchResult]),
}

impl SearchState {
    pub fn view(&self) -> SearchView<'_> {
        if self.loading {
            SearchView::Loading
        } else if let Some(error) = &self.error {
            SearchView::Error(error)
        } else if self.query.is_empty() {
            SearchView::Prompt
        } else {
            SearchView::Results(&self.results)
        }
    }
}

/// Identifies one lookup. A response is applied only while its generation is
/// still the controller's current one.
#[derive(Debug, Clone)]
pub struct RequestToken {
    generation: u64,
    cancel: CancellationToken,
}

impl RequestToken {
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// A lookup issued by [`SearchController::set_query`], not yet executed
#[derive(Debug)]
pub struct SearchRequest {
    token: RequestToken,
    query: String,
}

impl SearchRequest {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn token(&self) -> &RequestToken {
        &self.token
    }

    /// Run the lookup. Ends early with `SourceError::Cancelled` once a newer
    /// query supersedes this one.
    pub async fn execute<P: MovieProvider + ?Sized>(self, provider: &P) -> SearchResponse {
        let outcome = if self.token.is_cancelled() {
            Err(SourceError::Cancelled)
        } else {
            tokio::select! {
                biased;
                _ = self.token.cancel.cancelled() => Err(SourceError::Cancelled),
                result = provider.search(&self.query) => result,
            }
        };

        SearchResponse {
            token: self.token,
            query: self.query,
            outcome,
        }
    }
}

#[derive(Debug)]
pub struct SearchResponse {
    pub token: RequestToken,
    pub query: String,
    pub outcome: Result<Vec<SearchResult>, SourceError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Superseded or cancelled; state untouched
    Stale,
}

pub struct SearchController {
    state: SearchState,
    min_query_length: usize,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl SearchController {
    pub fn new(min_query_length: usize) -> Self {
        Self {
            state: SearchState::default(),
            min_query_length,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn min_query_length(&self) -> usize {
        self.min_query_length
    }

    /// Change the query. Cancels any lookup still in flight and returns the
    /// lookup to run for the new text, or `None` when it is too short.
    pub fn set_query(&mut self, text: impl Into<String>) -> Option<SearchRequest> {
        self.cancel_in_flight();
        self.generation += 1;
        self.state.query = text.into();

        let trimmed = self.state.query.trim();
        if trimmed.chars().count() < self.min_query_length {
            debug!("Query {:?} below {} characters, clearing results", trimmed, self.min_query_length);
            self.state.results.clear();
            self.state.error = None;
            self.state.loading = false;
            return None;
        }

        let token = RequestToken {
            generation: self.generation,
            cancel: CancellationToken::new(),
        };
        self.in_flight = Some(token.cancel.clone());
        self.state.loading = true;
        self.state.error = None;

        debug!("Issuing search {} for {:?}", token.generation, trimmed);
        Some(SearchRequest {
            query: trimmed.to_string(),
            token,
        })
    }

    pub fn apply(&mut self, response: SearchResponse) -> ApplyOutcome {
        if response.token.generation != self.generation || response.token.is_cancelled() {
            debug!(
                "Ignoring stale response {} for {:?} (current {})",
                response.token.generation, response.query, self.generation
            );
            return ApplyOutcome::Stale;
        }

        self.in_flight = None;
        self.state.loading = false;

        match response.outcome {
            Ok(results) => {
                debug!("Search {:?} produced {} results", response.query, results.len());
                self.state.results = results;
                self.state.error = None;
            }
            Err(SourceError::NotFound(message)) => {
                debug!("Search {:?} found nothing: {}", response.query, message);
                self.state.results.clear();
                self.state.error = Some(NOT_FOUND_MESSAGE.to_string());
            }
            Err(SourceError::Cancelled) => {}
            Err(e) => {
                warn!("Search {:?} failed: {}", response.query, e);
                self.state.results.clear();
                self.state.error = Some(SEARCH_FAILED_MESSAGE.to_string());
            }
        }

        ApplyOutcome::Applied
    }

    /// Drop the current lookup without issuing a new one
    pub fn cancel(&mut self) {
        if self.in_flight.is_some() {
            self.cancel_in_flight();
            self.generation += 1;
            self.state.loading = false;
        }
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.state.error = error;
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}
