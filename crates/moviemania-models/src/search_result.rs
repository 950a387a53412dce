use serde::{Deserialize, Serialize};

/// One search hit returned by the provider's title lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub id: String, // External (IMDb) identifier, unique within a result set
    pub title: String,
    pub year: String, // Kept as text: series report ranges like "2008–2013"
    pub poster_url: String,
}
