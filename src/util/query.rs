use std::collections::HashMap;

/// Decoded query-string parameters, as a browser location would expose them.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    map: HashMap<String, String>,
}

impl QueryParams {
    /// Parse `a=1&b=two%20words` with form-urlencoded rules. A leading `?` is
    /// ignored and the first occurrence of a repeated key wins.
    pub fn parse(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        let mut map = HashMap::new();

        for (key, value) in url::form_urlencoded::parse(input.as_bytes()) {
            if key.is_empty() {
                continue;
            }
            map.entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        QueryParams { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|v| v.as_str())
    }
}
