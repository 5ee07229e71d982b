mod categories;
mod code_view;
mod commands;
mod note;
mod notes;
mod preview;
mod store;

pub use categories::{CategorySelector, CategoryTab};
pub use code_view::{CodeView, LineKind};
pub use commands::{Command, NoteAction, Notice};
pub use note::{CodeBlock, ImageRef, Note};
pub use notes::{NoteCard, NoteList, NoteListView};
pub use preview::{
    ImageSource, PreviewKind, PreviewModal, PreviewState, resolve_image_source,
};
pub use store::DataStore;
