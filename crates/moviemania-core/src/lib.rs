pub mod store;
pub mod watched;
pub mod keys;
pub mod search;
pub mod detail;
pub mod session;
pub mod shortcuts;

#[cfg(test)]
pub(crate) mod testing;

pub use store::{FileStore, KeyValueStore, MemoryStore, Persisted, StoreError, load_value, save_value};
pub use keys::{Binding, KeyBinder};
pub use search::{ApplyOutcome, RequestToken, SearchController, SearchRequest, SearchResponse, SearchState, SearchView};
pub use detail::{DetailError, DetailLoader, DetailRequest, DetailResponse, DetailState, DetailUpdate, RatingChange};
pub use session::{Session, SessionError, SessionOptions};
pub use shortcuts::Shortcuts;
