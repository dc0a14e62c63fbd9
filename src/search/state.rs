use super::PAGE_SIZE;
use crate::api::{Genre, Movie};

/// Where a logical query is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing received yet for the current criteria.
    Unloaded,
    /// At least one page received and the last one was full.
    Loaded,
    /// The last page was short; there is nothing more to fetch.
    Exhausted,
}

#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// Any criterion other than the page changed.
    Reset,
    PageLoaded {
        page: u32,
        movies: Vec<Movie>,
        genres: Vec<Genre>,
    },
}

/// Accumulated results for the current criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultState {
    pub movies: Vec<Movie>,
    pub genres: Vec<Genre>,
    pub is_loaded: bool,
    pub has_more: bool,
}

impl Default for SearchResultState {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            genres: Vec::new(),
            is_loaded: false,
            has_more: true,
        }
    }
}

impl SearchResultState {
    pub fn apply(self, event: SearchEvent) -> SearchResultState {
        match event {
            SearchEvent::Reset => SearchResultState::default(),
            SearchEvent::PageLoaded {
                page,
                movies,
                genres,
            } => {
                let has_more = movies.len() == PAGE_SIZE;
                let movies = if page <= 1 {
                    movies
                } else {
                    let mut all = self.movies;
                    all.extend(movies);
                    all
                };
                SearchResultState {
                    movies,
                    genres,
                    is_loaded: true,
                    has_more,
                }
            }
        }
    }

    pub fn phase(&self) -> SearchPhase {
        match (self.is_loaded, self.has_more) {
            (false, _) => SearchPhase::Unloaded,
            (true, true) => SearchPhase::Loaded,
            (true, false) => SearchPhase::Exhausted,
        }
    }
}
