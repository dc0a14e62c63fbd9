pub mod client;
pub mod types;

pub use client::{ApiError, HttpSearchApi, SearchApi};
pub use types::{Genre, Movie, SearchResponse};
