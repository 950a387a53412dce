pub mod config;
pub mod context;
pub mod interactive;
pub mod movies;
pub mod progress;
pub mod prompts;
pub mod render;
pub mod watched;
