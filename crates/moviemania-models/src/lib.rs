pub mod search_result;
pub mod movie_detail;
pub mod watched_entry;
pub mod summary;

pub use search_result::SearchResult;
pub use movie_detail::MovieDetail;
pub use watched_entry::WatchedEntry;
pub use summary::{WatchedSummary, round_average};
