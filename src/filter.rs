use crate::models::DataRepository;
use std::collections::BTreeSet;

/// Selected topic keys (`topic#<id>`). A repository passes when it carries
/// every selected topic; an empty selection passes everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicFilter {
    selected: BTreeSet<String>,
}

impl TopicFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the comma-separated `topics` query value.
    pub fn from_query(value: Option<&str>) -> Self {
        let selected = value
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect();
        Self { selected }
    }

    pub fn to_query(&self) -> String {
        self.selected.iter().cloned().collect::<Vec<_>>().join(",")
    }

    pub fn toggle(&mut self, key: &str) {
        if !self.selected.remove(key) {
            self.selected.insert(key.to_string());
        }
    }

    /// A copy with `key` toggled, used to build chip links.
    pub fn toggled(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.toggle(key);
        next
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn matches(&self, repo: &DataRepository) -> bool {
        self.selected.iter().all(|key| repo.has_topic_key(key))
    }

    pub fn apply<'a>(&self, repositories: &'a [DataRepository]) -> Vec<&'a DataRepository> {
        repositories.iter().filter(|repo| self.matches(repo)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut filter = TopicFilter::new();
        filter.toggle("topic#rust");
        assert!(filter.is_selected("topic#rust"));
        filter.toggle("topic#rust");
        assert_eq!(filter, TopicFilter::new());
    }

    #[test]
    fn test_query_round_trip_drops_blanks() {
        let filter = TopicFilter::from_query(Some("topic#b, ,topic#a,"));
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.to_query(), "topic#a,topic#b");
        assert!(TopicFilter::from_query(None).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut filter = TopicFilter::from_query(Some("topic#a,topic#b"));
        filter.clear();
        assert!(filter.is_empty());
    }
}
