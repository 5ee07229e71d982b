use crate::core::note::{ALL_CATEGORY, Note};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DataStore {
    notes: Vec<Note>,
    categories: Vec<String>,
}

impl DataStore {
    pub fn new(notes: Vec<Note>, mut categories: Vec<String>) -> Self {
        if !categories.iter().any(|c| c == ALL_CATEGORY) {
            categories.insert(0, ALL_CATEGORY.to_string());
        }
        Self { notes, categories }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn filtered_notes(&self, category: &str) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| n.matches_category(category))
            .collect()
    }

    pub fn count_for(&self, category: &str) -> usize {
        self.notes
            .iter()
            .filter(|n| n.matches_category(category))
            .count()
    }

    pub fn counts_by_category(&self) -> Vec<CategoryCount> {
        self.categories
            .iter()
            .map(|category| CategoryCount {
                category: category.clone(),
                count: self.count_for(category),
            })
            .collect()
    }

    /// Looks a note up by id. With duplicate ids the last one in source
    /// order wins.
    pub fn note_by_id(&self, id: &str) -> Option<&Note> {
        self.notes.iter().rev().find(|n| n.note_id == id)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{CategoryCount, DataStore};
    use crate::core::note::{ALL_CATEGORY, Note};

    pub(crate) fn sample_store() -> DataStore {
        let n1 = Note::new("1", "A");
        let n2 = Note::new("2", "B");
        let mut n3 = Note::new("3", "A");
        n3.is_archived = true;
        DataStore::new(
            vec![n1, n2, n3],
            vec!["all".into(), "A".into(), "B".into()],
        )
    }

    fn ids(notes: &[&Note]) -> Vec<String> {
        notes.iter().map(|n| n.note_id.clone()).collect()
    }

    #[test]
    fn filter_by_category_skips_archived() {
        let store = sample_store();
        assert_eq!(ids(&store.filtered_notes("A")), vec!["1"]);
        assert_eq!(ids(&store.filtered_notes("B")), vec!["2"]);
        assert_eq!(ids(&store.filtered_notes(ALL_CATEGORY)), vec!["1", "2"]);
        assert!(store.filtered_notes("missing").is_empty());
    }

    #[test]
    fn counts_follow_filter_rule() {
        let store = sample_store();
        let counts = store.counts_by_category();
        assert_eq!(
            counts,
            vec![
                CategoryCount {
                    category: "all".into(),
                    count: 2
                },
                CategoryCount {
                    category: "A".into(),
                    count: 1
                },
                CategoryCount {
                    category: "B".into(),
                    count: 1
                },
            ]
        );
        for entry in &counts {
            assert_eq!(entry.count, store.filtered_notes(&entry.category).len());
        }
    }

    #[test]
    fn filter_preserves_source_order() {
        let notes = ["c", "a", "b"]
            .iter()
            .map(|id| Note::new(*id, "X"))
            .collect();
        let store = DataStore::new(notes, vec!["X".into()]);
        assert_eq!(ids(&store.filtered_notes("X")), vec!["c", "a", "b"]);
    }

    #[test]
    fn all_is_synthesized_when_missing() {
        let store = DataStore::new(vec![Note::new("1", "A")], vec!["A".into()]);
        assert_eq!(store.categories(), &["all".to_string(), "A".to_string()]);
        assert_eq!(store.count_for(ALL_CATEGORY), 1);
    }

    #[test]
    fn duplicate_ids_resolve_to_last() {
        let mut first = Note::new("dup", "A");
        first.title = "first".into();
        let mut second = Note::new("dup", "B");
        second.title = "second".into();
        let store = DataStore::new(vec![first, second], Vec::new());
        assert_eq!(
            store.note_by_id("dup").map(|n| n.title.as_str()),
            Some("second")
        );
        assert!(store.note_by_id("nope").is_none());
    }
}
