use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::types::SearchResponse;
use crate::config::ApiConfig;
use crate::search::SearchCriteria;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server returned HTTP {0}")]
    Status(u16),
    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// The search backend. One call fetches one page for one set of criteria.
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResponse, ApiError>;
}

pub struct HttpSearchApi {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpSearchApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout))
    }

    fn search_url(&self) -> String {
        format!("{}/api/search", self.base_url)
    }
}

#[async_trait]
impl SearchApi for HttpSearchApi {
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResponse, ApiError> {
        let params = criteria.request_params();
        debug!(url = %self.search_url(), page = criteria.page, "GET search");

        let response = self
            .http_client
            .get(self.search_url())
            .query(&params)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(ApiError::Status(status));
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn echo_search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        // Echo the received parameters back as the single movie.
        Json(json!({
            "movies": [params],
            "genre": [{"id": 28, "name": "Action"}],
            "top_open_movie": [{"id": 1}],
            "top_score_movie": [{"id": 2}, {"id": 3}]
        }))
    }

    async fn broken_search() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_request_encodes_all_parameters() {
        let base = spawn_backend(Router::new().route("/api/search", get(echo_search))).await;
        let api = HttpSearchApi::new(&base, Duration::from_secs(5)).unwrap();

        let criteria =
            SearchCriteria::from_query_string("query=dark+knight&sort=score&genreFilter=28,12");
        let resp = api.search(&criteria.with_page(3)).await.unwrap();

        let echoed = &resp.movies[0].0;
        assert_eq!(echoed["query"], "dark knight");
        assert_eq!(echoed["page"], "3");
        assert_eq!(echoed["sort"], "score");
        assert_eq!(echoed["genreFilter"], "28,12");
        assert_eq!(echoed["nationFlag"], "null");
        assert_eq!(echoed["showTimeFilter"], "null");
        assert_eq!(echoed["openDateFilter"], "null");
        assert_eq!(echoed["size"], "5");
        assert_eq!(resp.top_score_movie.len(), 2);
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let base = spawn_backend(Router::new().route("/api/search", get(broken_search))).await;
        let api = HttpSearchApi::new(&base, Duration::from_secs(5)).unwrap();

        let err = api
            .search(&SearchCriteria::from_query_string("query=x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status(500)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpSearchApi::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
        let err = api
            .search(&SearchCriteria::from_query_string("query=x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
