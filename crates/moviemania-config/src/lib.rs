pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{is_valid_store_key, Config, OmdbConfig, SearchConfig, StorageConfig, DEFAULT_OMDB_BASE_URL};
pub use credentials::{CredentialStore, mask_secret};
pub use paths::{PathManager, base_path_override};
