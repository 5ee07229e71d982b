use crate::core::code_view::CodeView;
use crate::core::commands::Notice;
use crate::core::note::ImageRef;
use crate::core::store::DataStore;

pub const ZOOM_MIN: u16 = 25;
pub const ZOOM_MAX: u16 = 200;
pub const ZOOM_STEP: u16 = 25;
pub const ZOOM_DEFAULT: u16 = 100;

pub const IMAGES_DIR: &str = "images";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Code,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    images: Vec<ImageRef>,
    index: usize,
    zoom: u16,
}

impl PreviewState {
    fn new(images: Vec<ImageRef>) -> Self {
        Self {
            images,
            index: 0,
            zoom: ZOOM_DEFAULT,
        }
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn zoom(&self) -> u16 {
        self.zoom
    }

    pub fn current(&self) -> Option<&ImageRef> {
        self.images.get(self.index)
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.images.len()
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.index += 1;
            self.zoom = ZOOM_DEFAULT;
        }
    }

    pub fn prev(&mut self) {
        if self.has_prev() {
            self.index -= 1;
            self.zoom = ZOOM_DEFAULT;
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(ZOOM_STEP).max(ZOOM_MIN);
    }
}

#[derive(Debug, Clone, Default)]
pub enum PreviewModal {
    #[default]
    Closed,
    Code {
        note_id: String,
        title: String,
        view: CodeView,
    },
    Image {
        note_id: String,
        title: String,
        state: PreviewState,
    },
}

impl PreviewModal {
    pub fn kind(&self) -> Option<PreviewKind> {
        match self {
            PreviewModal::Closed => None,
            PreviewModal::Code { .. } => Some(PreviewKind::Code),
            PreviewModal::Image { .. } => Some(PreviewKind::Image),
        }
    }

    pub fn is_open(&self) -> bool {
        self.kind().is_some()
    }

    pub fn open_code(&mut self, store: &DataStore, note_id: &str) -> Result<(), Notice> {
        let note = match store.note_by_id(note_id) {
            Some(note) if note.has_code() => note,
            _ => return Err(Notice::info("This note has no code")),
        };
        tracing::debug!(note_id, blocks = note.code_blocks.len(), "code preview opened");
        *self = PreviewModal::Code {
            note_id: note.note_id.clone(),
            title: note.title.clone(),
            view: CodeView::new(&note.code_blocks),
        };
        Ok(())
    }

    pub fn open_image(&mut self, store: &DataStore, note_id: &str) -> Result<(), Notice> {
        let note = match store.note_by_id(note_id) {
            Some(note) if note.has_images() => note,
            _ => return Err(Notice::info("This note has no images")),
        };
        tracing::debug!(note_id, images = note.images.len(), "image preview opened");
        *self = PreviewModal::Image {
            note_id: note.note_id.clone(),
            title: note.title.clone(),
            state: PreviewState::new(note.images.clone()),
        };
        Ok(())
    }

    pub fn image_state_mut(&mut self) -> Option<&mut PreviewState> {
        match self {
            PreviewModal::Image { state, .. } => Some(state),
            _ => None,
        }
    }

    pub fn code_view_mut(&mut self) -> Option<&mut CodeView> {
        match self {
            PreviewModal::Code { view, .. } => Some(view),
            _ => None,
        }
    }

    pub fn next(&mut self) {
        if let Some(state) = self.image_state_mut() {
            state.next();
        }
    }

    pub fn prev(&mut self) {
        if let Some(state) = self.image_state_mut() {
            state.prev();
        }
    }

    pub fn zoom_in(&mut self) {
        if let Some(state) = self.image_state_mut() {
            state.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if let Some(state) = self.image_state_mut() {
            state.zoom_out();
        }
    }

    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        if was_open {
            tracing::debug!("preview closed");
        }
        *self = PreviewModal::Closed;
        was_open
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Resolved(String),
    Invalid,
}

fn is_absolute_path(path: &str) -> bool {
    path.starts_with('/') || path.contains(':')
}

fn stored_image_path(filename: &str) -> String {
    format!("{IMAGES_DIR}/{filename}")
}

/// Absolute stored paths are remapped into the images directory.
pub fn resolve_image_source(image: &ImageRef) -> ImageSource {
    let resolved = match image {
        ImageRef::Path(path) => Some(path.clone()).filter(|p| !p.is_empty()),
        ImageRef::Stored { filename, filepath } => {
            let filename = filename.as_deref().filter(|f| !f.is_empty());
            match filepath.as_deref().filter(|p| !p.is_empty()) {
                Some(path) if !is_absolute_path(path) => Some(path.to_string()),
                Some(path) => match filename {
                    Some(name) => Some(stored_image_path(name)),
                    None => path
                        .rsplit(|c: char| c == '/' || c == '\\')
                        .next()
                        .filter(|segment| !segment.is_empty())
                        .map(stored_image_path),
                },
                None => filename.map(stored_image_path),
            }
        }
    };
    match resolved {
        Some(path) => ImageSource::Resolved(path),
        None => ImageSource::Invalid,
    }
}
