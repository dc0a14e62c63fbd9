/// Genre ids currently toggled on in the facet selector.
///
/// Ordered by when they were switched on; no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickedGenreSet {
    ids: Vec<String>,
}

impl ClickedGenreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `genreFilter` value: comma separated, literal `null` and empty
    /// tokens dropped.
    pub fn from_filter(filter: &str) -> Self {
        let mut set = Self::new();
        for token in filter.split(',').map(str::trim) {
            if token.is_empty() || token == "null" {
                continue;
            }
            set.insert(token);
        }
        set
    }

    /// Follow the URL: recompute when `genreFilter` is present, otherwise
    /// keep the current selection.
    pub fn sync_from_filter(&mut self, filter: Option<&str>) {
        if let Some(filter) = filter {
            *self = Self::from_filter(filter);
        }
    }

    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Flip one genre. Returns whether it is on afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|g| g == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|g| g == id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(|s| s.as_str())
    }

    /// Value for the `genreFilter` URL parameter; `None` when nothing is on.
    pub fn to_filter(&self) -> Option<String> {
        if self.ids.is_empty() {
            None
        } else {
            Some(self.ids.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(set: &ClickedGenreSet) -> Vec<&str> {
        set.iter().collect()
    }

    #[test]
    fn test_from_filter() {
        assert_eq!(ids(&ClickedGenreSet::from_filter("28,12")), vec!["28", "12"]);
        assert_eq!(ids(&ClickedGenreSet::from_filter("28,null,12")), vec!["28", "12"]);
        assert_eq!(ids(&ClickedGenreSet::from_filter("null")), Vec::<&str>::new());
        assert_eq!(ids(&ClickedGenreSet::from_filter("28,,28")), vec!["28"]);
    }

    #[test]
    fn test_absent_filter_is_sticky() {
        let mut set = ClickedGenreSet::from_filter("28");
        set.sync_from_filter(None);
        assert_eq!(ids(&set), vec!["28"]);

        set.sync_from_filter(Some("12,null"));
        assert_eq!(ids(&set), vec!["12"]);
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut set = ClickedGenreSet::new();
        assert!(set.toggle("28"));
        assert!(set.toggle("12"));
        assert_eq!(set.to_filter().as_deref(), Some("28,12"));

        assert!(!set.toggle("28"));
        assert_eq!(set.to_filter().as_deref(), Some("12"));

        set.toggle("12");
        assert!(set.is_empty());
        assert_eq!(set.to_filter(), None);
    }
}
