use super::PAGE_SIZE;
use crate::util::QueryParams;

/// Everything the user controls about one search, read from the URL.
///
/// Values are kept verbatim: nothing is validated here, and a missing value
/// is sent to the server as the literal string `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub query: Option<String>,
    pub sort: Option<String>,
    pub nation_flag: Option<String>,
    pub genre_filter: Option<String>,
    pub show_time_filter: Option<String>,
    pub open_date_filter: Option<String>,
    pub page: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            query: None,
            sort: None,
            nation_flag: None,
            genre_filter: None,
            show_time_filter: None,
            open_date_filter: None,
            page: 1,
        }
    }
}

impl SearchCriteria {
    /// Build criteria from a browser query string. The page counter is not
    /// part of the URL, so this always yields page 1.
    pub fn from_query_string(qs: &str) -> Self {
        Self::from_params(&QueryParams::parse(qs))
    }

    pub fn from_params(params: &QueryParams) -> Self {
        let get = |key: &str| params.get(key).map(str::to_string);
        Self {
            query: get("query"),
            sort: get("sort"),
            nation_flag: get("nationFlag"),
            genre_filter: get("genreFilter"),
            show_time_filter: get("showTimeFilter"),
            open_date_filter: get("openDateFilter"),
            page: 1,
        }
    }

    /// The browser-side query string for these criteria (page excluded).
    pub fn to_query_string(&self) -> String {
        self.url_fields()
            .into_iter()
            .filter_map(|(key, value)| {
                value.map(|v| format!("{}={}", key, urlencoding::encode(v)))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parameters for `GET /api/search`, in the order the server documents.
    pub fn request_params(&self) -> Vec<(&'static str, String)> {
        let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "null".to_string());
        vec![
            ("query", text(&self.query)),
            ("page", self.page.to_string()),
            ("nationFlag", text(&self.nation_flag)),
            ("sort", text(&self.sort)),
            ("genreFilter", text(&self.genre_filter)),
            ("showTimeFilter", text(&self.show_time_filter)),
            ("openDateFilter", text(&self.open_date_filter)),
            ("size", PAGE_SIZE.to_string()),
        ]
    }

    /// True when both describe the same logical query, whatever the page.
    pub fn same_query(&self, other: &SearchCriteria) -> bool {
        self.url_fields() == other.url_fields()
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort: Option<String>) -> Self {
        Self {
            sort,
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_genre_filter(&self, genre_filter: Option<String>) -> Self {
        Self {
            genre_filter,
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_show_time_filter(&self, show_time_filter: Option<String>) -> Self {
        Self {
            show_time_filter,
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_open_date_filter(&self, open_date_filter: Option<String>) -> Self {
        Self {
            open_date_filter,
            page: 1,
            ..self.clone()
        }
    }

    fn url_fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("query", self.query.as_deref()),
            ("sort", self.sort.as_deref()),
            ("nationFlag", self.nation_flag.as_deref()),
            ("genreFilter", self.genre_filter.as_deref()),
            ("showTimeFilter", self.show_time_filter.as_deref()),
            ("openDateFilter", self.open_date_filter.as_deref()),
        ]
    }
}
