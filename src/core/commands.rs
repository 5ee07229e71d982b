#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    Toggle,
    Edit,
    Code,
    Image,
    Delete,
}

impl NoteAction {
    pub const ALL: [NoteAction; 5] = [
        NoteAction::Edit,
        NoteAction::Code,
        NoteAction::Image,
        NoteAction::Delete,
        NoteAction::Toggle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NoteAction::Toggle => "toggle",
            NoteAction::Edit => "edit",
            NoteAction::Code => "code",
            NoteAction::Image => "image",
            NoteAction::Delete => "delete",
        }
    }

    pub fn label(self, expanded: bool) -> &'static str {
        match self {
            NoteAction::Toggle if expanded => "Collapse",
            NoteAction::Toggle => "Expand",
            NoteAction::Edit => "Edit",
            NoteAction::Code => "Code",
            NoteAction::Image => "Images",
            NoteAction::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    OpenHelp,
    CloseOverlay,
    NextCategory,
    PrevCategory,
    CursorUp,
    CursorDown,
    SelectNote,
    Note(NoteAction),
    AddNote,
    Search,
    Settings,
    PrevImage,
    NextImage,
    ZoomIn,
    ZoomOut,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn not_implemented(feature: &str) -> Self {
        Self::info(format!("{feature} is not implemented yet"))
    }
}
