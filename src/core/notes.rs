use std::collections::HashSet;

use crate::core::commands::Notice;
use crate::core::store::DataStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub note_id: String,
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub content: String,
    pub expanded: bool,
    pub selected: bool,
    pub has_code: bool,
    pub has_images: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteListView {
    Empty,
    Cards(Vec<NoteCard>),
}

impl NoteListView {
    pub fn len(&self) -> usize {
        match self {
            NoteListView::Empty => 0,
            NoteListView::Cards(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn card(&self, idx: usize) -> Option<&NoteCard> {
        match self {
            NoteListView::Empty => None,
            NoteListView::Cards(cards) => cards.get(idx),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoteList {
    expanded: HashSet<String>,
    selected: Option<String>,
    cursor: usize,
}

impl NoteList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, store: &DataStore, category: &str) -> NoteListView {
        let notes = store.filtered_notes(category);
        if notes.is_empty() {
            return NoteListView::Empty;
        }
        let cards = notes
            .into_iter()
            .map(|note| NoteCard {
                note_id: note.note_id.clone(),
                title: note.title.clone(),
                category: note.category.clone(),
                tags: note.tags.clone(),
                content: note.content.clone(),
                expanded: self.is_expanded(&note.note_id),
                selected: self.selected.as_deref() == Some(note.note_id.as_str()),
                has_code: note.has_code(),
                has_images: note.has_images(),
            })
            .collect();
        NoteListView::Cards(cards)
    }

    pub fn toggle_expansion(&mut self, note_id: &str) -> bool {
        if self.expanded.remove(note_id) {
            false
        } else {
            self.expanded.insert(note_id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, note_id: &str) -> bool {
        self.expanded.contains(note_id)
    }

    pub fn select(&mut self, note_id: &str) {
        self.selected = Some(note_id.to_string());
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn edit(&self, note_id: &str) -> Notice {
        tracing::info!(note_id, "edit requested");
        Notice::not_implemented("Editing")
    }

    pub fn delete(&self, note_id: &str) -> Notice {
        tracing::info!(note_id, "delete requested");
        Notice::not_implemented("Deleting")
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, delta: isize, visible: usize) {
        if visible == 0 {
            self.cursor = 0;
            return;
        }
        let last = visible - 1;
        self.cursor = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta as usize).min(last)
        };
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    pub fn clamp_cursor(&mut self, visible: usize) {
        self.cursor = self.cursor.min(visible.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteList, NoteListView};
    use crate::core::note::{CodeBlock, Note};
    use crate::core::store::DataStore;
    use crate::core::store::tests::sample_store;

    #[test]
    fn empty_category_renders_placeholder() {
        let list = NoteList::new();
        assert_eq!(list.render(&sample_store(), "missing"), NoteListView::Empty);
        let store = DataStore::new(Vec::new(), Vec::new());
        assert_eq!(list.render(&store, "all"), NoteListView::Empty);
    }

    #[test]
    fn double_toggle_restores_membership() {
        let mut list = NoteList::new();
        assert!(list.toggle_expansion("1"));
        assert!(list.is_expanded("1"));
        assert!(!list.toggle_expansion("1"));
        assert!(!list.is_expanded("1"));
    }

    #[test]
    fn expansion_is_independent_of_selection() {
        let store = sample_store();
        let mut list = NoteList::new();
        list.toggle_expansion("1");
        list.select("2");
        let view = list.render(&store, "all");
        let first = view.card(0).expect("card 1");
        let second = view.card(1).expect("card 2");
        assert!(first.expanded && !first.selected);
        assert!(!second.expanded && second.selected);
    }

    #[test]
    fn selecting_b_deselects_a() {
        let store = sample_store();
        let mut list = NoteList::new();
        list.select("1");
        list.select("2");
        let view = list.render(&store, "all");
        let selected: Vec<&str> = match &view {
            NoteListView::Cards(cards) => cards
                .iter()
                .filter(|c| c.selected)
                .map(|c| c.note_id.as_str())
                .collect(),
            NoteListView::Empty => Vec::new(),
        };
        assert_eq!(selected, vec!["2"]);
    }

    #[test]
    fn render_is_idempotent() {
        let store = sample_store();
        let mut list = NoteList::new();
        list.toggle_expansion("2");
        assert_eq!(list.render(&store, "B"), list.render(&store, "B"));
    }

    #[test]
    fn cards_report_previewable_content() {
        let mut note = Note::new("x", "A");
        note.code_blocks.push(CodeBlock {
            language: "Rust".into(),
            content: "fn main() {}".into(),
        });
        let store = DataStore::new(vec![note], vec!["A".into()]);
        let view = NoteList::new().render(&store, "A");
        let card = view.card(0).expect("card");
        assert!(card.has_code);
        assert!(!card.has_images);
    }

    #[test]
    fn stub_actions_leave_state_alone() {
        let mut list = NoteList::new();
        list.select("1");
        let notice = list.edit("1");
        assert!(notice.message.contains("not implemented"));
        list.delete("1");
        assert_eq!(list.selected(), Some("1"));
        assert!(!list.is_expanded("1"));
    }

    #[test]
    fn cursor_stays_within_visible_cards() {
        let mut list = NoteList::new();
        list.move_cursor(5, 3);
        assert_eq!(list.cursor(), 2);
        list.move_cursor(-10, 3);
        assert_eq!(list.cursor(), 0);
        list.move_cursor(2, 3);
        list.clamp_cursor(1);
        assert_eq!(list.cursor(), 0);
    }
}
