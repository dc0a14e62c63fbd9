use std::sync::Arc;

use tracing::{debug, error, info};

use super::criteria::SearchCriteria;
use super::genres::ClickedGenreSet;
use super::state::{SearchEvent, SearchPhase, SearchResultState};
use crate::api::{ApiError, Movie, SearchApi, SearchResponse};
use crate::cache::{CacheResult, RecommendationCache, RecommendationList};

/// Identifies one issued request. Only the most recent one may change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(u64);

#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub id: RequestId,
    pub criteria: SearchCriteria,
}

/// Drives one search view: criteria in, accumulated pages out.
pub struct SearchController {
    api: Arc<dyn SearchApi>,
    cache: Arc<dyn RecommendationCache>,
    criteria: SearchCriteria,
    state: SearchResultState,
    clicked_genres: ClickedGenreSet,
    last_issued: u64,
}

impl SearchController {
    pub async fn new(
        api: Arc<dyn SearchApi>,
        cache: Arc<dyn RecommendationCache>,
        criteria: SearchCriteria,
    ) -> Self {
        if let Err(e) = cache.ensure_initialized().await {
            error!("Failed to initialize recommendation cache: {}", e);
        }

        let mut clicked_genres = ClickedGenreSet::new();
        clicked_genres.sync_from_filter(criteria.genre_filter.as_deref());

        Self {
            api,
            cache,
            criteria: criteria.with_page(1),
            state: SearchResultState::default(),
            clicked_genres,
            last_issued: 0,
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn page(&self) -> u32 {
        self.criteria.page
    }

    pub fn state(&self) -> &SearchResultState {
        &self.state
    }

    pub fn phase(&self) -> SearchPhase {
        self.state.phase()
    }

    pub fn clicked_genres(&self) -> &ClickedGenreSet {
        &self.clicked_genres
    }

    /// Adopt new criteria from the URL. A change to anything but the page
    /// starts a new logical query at page 1 with an empty result list.
    /// Returns true when that happened.
    pub fn set_criteria(&mut self, criteria: SearchCriteria) -> bool {
        self.clicked_genres
            .sync_from_filter(criteria.genre_filter.as_deref());

        if criteria.same_query(&self.criteria) {
            self.criteria = criteria;
            return false;
        }

        info!(criteria = %criteria.to_query_string(), "new search");
        self.criteria = criteria.with_page(1);
        self.state = std::mem::take(&mut self.state).apply(SearchEvent::Reset);
        true
    }

    /// Adopt new criteria and fetch their first page.
    pub async fn navigate(&mut self, criteria: SearchCriteria) {
        self.set_criteria(criteria);
        self.fetch_page().await;
    }

    /// Issue a request for the current criteria and page. Any request issued
    /// earlier becomes stale.
    pub fn begin_fetch(&mut self) -> PendingRequest {
        self.last_issued += 1;
        let id = RequestId(self.last_issued);
        debug!(request = id.0, page = self.criteria.page, "issuing search request");
        PendingRequest {
            id,
            criteria: self.criteria.clone(),
        }
    }

    /// Apply the outcome of a request. Failures are logged and leave the state
    /// alone; responses to stale requests are dropped. Returns true when the
    /// response was applied.
    pub async fn complete(
        &mut self,
        request: &PendingRequest,
        result: Result<SearchResponse, ApiError>,
    ) -> bool {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!(page = request.criteria.page, "Search request failed: {}", e);
                return false;
            }
        };

        if request.id.0 != self.last_issued {
            debug!(
                request = request.id.0,
                latest = self.last_issued,
                "dropping stale search response"
            );
            return false;
        }

        self.store_recommendations(&response).await;

        debug!(
            page = request.criteria.page,
            received = response.movies.len(),
            "search page loaded"
        );
        let SearchResponse { movies, genre, .. } = response;
        self.state = std::mem::take(&mut self.state).apply(SearchEvent::PageLoaded {
            page: request.criteria.page,
            movies,
            genres: genre,
        });
        true
    }

    /// Fetch the current page and apply the result.
    pub async fn fetch_page(&mut self) -> bool {
        let request = self.begin_fetch();
        let result = self.api.search(&request.criteria).await;
        self.complete(&request, result).await
    }

    /// The bottom-of-list sensor. When it is in view, the first page has
    /// arrived and more pages exist, advance one page and fetch it. Returns
    /// true when a page was requested. The page counter moves before the
    /// fetch, so a page whose request fails is not retried.
    pub async fn on_sensor(&mut self, in_view: bool) -> bool {
        if !(in_view && self.state.is_loaded && self.state.has_more) {
            return false;
        }
        self.criteria.page += 1;
        self.fetch_page().await;
        true
    }

    /// Toggle a genre facet and return the criteria the view should
    /// navigate to.
    pub fn toggle_genre(&mut self, genre_id: &str) -> SearchCriteria {
        self.clicked_genres.toggle(genre_id);
        self.criteria
            .with_genre_filter(self.clicked_genres.to_filter())
    }

    /// A cached carousel list; empty when nothing has been stored yet.
    pub async fn recommendations(&self, list: RecommendationList) -> CacheResult<Vec<Movie>> {
        Ok(self.cache.get(list).await?.unwrap_or_default())
    }

    async fn store_recommendations(&self, response: &SearchResponse) {
        let snapshots = [
            (RecommendationList::RecentlyOpened, &response.top_open_movie),
            (RecommendationList::TopScored, &response.top_score_movie),
        ];
        for (list, movies) in snapshots {
            if let Err(e) = self.cache.set(list, movies).await {
                error!(list = %list, "Failed to store recommendations: {}", e);
            }
        }
    }
}
