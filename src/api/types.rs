use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A movie record as returned by the search endpoint. The fields are passed
/// through untouched; only display helpers peek inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Movie(pub Value);

impl Movie {
    pub fn id(&self) -> Option<String> {
        scalar_field(&self.0, "id")
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }
}

/// A genre facet offered alongside the results of a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genre(pub Value);

impl Genre {
    pub fn id(&self) -> Option<String> {
        scalar_field(&self.0, "id")
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }
}

fn scalar_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Body of `GET /api/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub genre: Vec<Genre>,
    #[serde(default)]
    pub top_open_movie: Vec<Movie>,
    #[serde(default)]
    pub top_score_movie: Vec<Movie>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_response() {
        let body = json!({
            "movies": [{"id": 1, "title": "Batman"}, {"id": "tt2", "title": "Batman Returns"}],
            "genre": [{"id": 28, "name": "Action"}],
            "top_open_movie": [{"id": 9}],
            "top_score_movie": []
        });
        let resp: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.movies.len(), 2);
        assert_eq!(resp.movies[0].id().as_deref(), Some("1"));
        assert_eq!(resp.movies[1].id().as_deref(), Some("tt2"));
        assert_eq!(resp.movies[1].title(), Some("Batman Returns"));
        assert_eq!(resp.genre[0].id().as_deref(), Some("28"));
        assert_eq!(resp.genre[0].name(), Some("Action"));
        assert_eq!(resp.top_open_movie.len(), 1);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let resp: SearchResponse = serde_json::from_str(r#"{"movies": []}"#).unwrap();
        assert!(resp.genre.is_empty());
        assert!(resp.top_open_movie.is_empty());
        assert!(resp.top_score_movie.is_empty());
    }

    #[test]
    fn test_movie_is_opaque() {
        let raw = json!({"id": 3, "poster": {"w500": "/a.jpg"}, "extra": [1, 2]});
        let movie: Movie = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&movie).unwrap(), raw);
        assert_eq!(movie.title(), None);
    }
}
