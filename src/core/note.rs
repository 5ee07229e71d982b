use serde::{Deserialize, Deserializer};

pub const ALL_CATEGORY: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodeBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl CodeBlock {
    pub fn language_label(&self) -> &str {
        let trimmed = self.language.trim();
        if trimmed.is_empty() { "Other" } else { trimmed }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Path(String),
    Stored {
        #[serde(default)]
        filename: Option<String>,
        #[serde(default)]
        filepath: Option<String>,
    },
}

impl ImageRef {
    pub fn display_name(&self) -> String {
        match self {
            ImageRef::Path(path) => path.clone(),
            ImageRef::Stored { filename, filepath } => filename
                .as_deref()
                .filter(|f| !f.is_empty())
                .or(filepath.as_deref().filter(|p| !p.is_empty()))
                .unwrap_or("unknown file")
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Note {
    pub note_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code_blocks: Vec<CodeBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ImageRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_archived: bool,
}

impl Note {
    pub fn new(note_id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            note_id: note_id.into(),
            title: String::new(),
            content: String::new(),
            category: category.into(),
            tags: Vec::new(),
            code_blocks: Vec::new(),
            images: Vec::new(),
            is_archived: false,
        }
    }

    pub fn has_code(&self) -> bool {
        !self.code_blocks.is_empty()
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    pub fn matches_category(&self, category: &str) -> bool {
        !self.is_archived && (category == ALL_CATEGORY || self.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::{ALL_CATEGORY, ImageRef, Note};

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let note: Note =
            serde_json::from_str(r#"{"note_id":"7","title":"t","category":"A"}"#).expect("parse");
        assert!(note.tags.is_empty());
        assert!(note.code_blocks.is_empty());
        assert!(note.images.is_empty());
        assert!(!note.is_archived);
    }

    #[test]
    fn null_fields_default_to_empty() {
        let note: Note = serde_json::from_str(
            r#"{"note_id":"8","title":null,"content":null,"category":null,
                "tags":null,"code_blocks":[{"language":null,"content":"x"}],
                "images":null,"is_archived":null}"#,
        )
        .expect("parse");
        assert_eq!(note.title, "");
        assert!(note.tags.is_empty());
        assert!(note.images.is_empty());
        assert_eq!(note.code_blocks[0].language_label(), "Other");
        assert!(!note.is_archived);
    }

    #[test]
    fn images_accept_strings_and_records() {
        let note: Note = serde_json::from_str(
            r#"{
                "note_id": "1",
                "images": [
                    "pics/a.png",
                    {"filename": "b.png", "filepath": "C:\\notes\\b.png"},
                    {"filepath": "/home/me/c.png"}
                ],
                "created_at": "2024-01-01"
            }"#,
        )
        .expect("parse");
        assert_eq!(note.images[0], ImageRef::Path("pics/a.png".into()));
        assert_eq!(note.images[1].display_name(), "b.png");
        assert_eq!(note.images[2].display_name(), "/home/me/c.png");
    }

    #[test]
    fn archived_notes_match_nothing() {
        let mut note = Note::new("1", "A");
        assert!(note.matches_category(ALL_CATEGORY));
        assert!(note.matches_category("A"));
        assert!(!note.matches_category("B"));
        note.is_archived = true;
        assert!(!note.matches_category(ALL_CATEGORY));
        assert!(!note.matches_category("A"));
    }
}
