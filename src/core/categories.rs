use crate::core::note::ALL_CATEGORY;
use crate::core::store::DataStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTab {
    pub label: String,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct CategorySelector {
    active: String,
    tabs: Vec<CategoryTab>,
}

impl CategorySelector {
    pub fn new(store: &DataStore) -> Self {
        let mut selector = Self {
            active: ALL_CATEGORY.to_string(),
            tabs: Vec::new(),
        };
        selector.refresh_counts(store);
        selector
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn tabs(&self) -> &[CategoryTab] {
        &self.tabs
    }

    /// Returns `false` when `category` is already active.
    pub fn select(&mut self, category: &str) -> bool {
        if self.active == category {
            return false;
        }
        self.active = category.to_string();
        for tab in &mut self.tabs {
            tab.active = tab.label == self.active;
        }
        tracing::debug!(category, "active category changed");
        true
    }

    pub fn select_next(&mut self) -> bool {
        self.select_offset(1)
    }

    pub fn select_prev(&mut self) -> bool {
        self.select_offset(-1)
    }

    fn select_offset(&mut self, direction: isize) -> bool {
        if self.tabs.is_empty() {
            return false;
        }
        let len = self.tabs.len();
        let next = match self.tabs.iter().position(|t| t.active) {
            Some(idx) if direction < 0 => (idx + len - 1) % len,
            Some(idx) => (idx + 1) % len,
            None => 0,
        };
        let label = self.tabs[next].label.clone();
        self.select(&label)
    }

    pub fn refresh_counts(&mut self, store: &DataStore) {
        self.tabs = store
            .counts_by_category()
            .into_iter()
            .map(|entry| CategoryTab {
                active: entry.category == self.active,
                label: entry.category,
                count: entry.count,
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::CategorySelector;
    use crate::core::store::tests::sample_store;

    #[test]
    fn defaults_to_all_with_counts() {
        let selector = CategorySelector::new(&sample_store());
        assert_eq!(selector.active(), "all");
        let summary: Vec<(&str, usize, bool)> = selector
            .tabs()
            .iter()
            .map(|t| (t.label.as_str(), t.count, t.active))
            .collect();
        assert_eq!(
            summary,
            vec![("all", 2, true), ("A", 1, false), ("B", 1, false)]
        );
    }

    #[test]
    fn reselecting_active_category_is_a_noop() {
        let mut selector = CategorySelector::new(&sample_store());
        assert!(selector.select("A"));
        assert!(!selector.select("A"));
        assert_eq!(selector.active(), "A");
        assert_eq!(selector.tabs().iter().filter(|t| t.active).count(), 1);
    }

    #[test]
    fn cycling_wraps_around_tabs() {
        let mut selector = CategorySelector::new(&sample_store());
        assert!(selector.select_prev());
        assert_eq!(selector.active(), "B");
        assert!(selector.select_next());
        assert_eq!(selector.active(), "all");
    }

    #[test]
    fn refresh_keeps_active_category() {
        let store = sample_store();
        let mut selector = CategorySelector::new(&store);
        selector.select("B");
        selector.refresh_counts(&store);
        assert_eq!(selector.active(), "B");
        assert!(selector.tabs().iter().any(|t| t.label == "B" && t.active));
    }
}
