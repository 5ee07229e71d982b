use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::{Command, NoteAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputScope {
    List,
    CodePreview,
    ImagePreview,
    Message,
}

pub fn map_key_event(key: KeyEvent, scope: InputScope) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return Some(Command::Quit);
    }

    match scope {
        InputScope::List => map_list_key(key),
        InputScope::CodePreview => map_code_key(key),
        InputScope::ImagePreview => map_image_key(key),
        InputScope::Message => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char(' ') => {
                Some(Command::CloseOverlay)
            }
            _ => None,
        },
    }
}

fn map_list_key(key: KeyEvent) -> Option<Command> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => Some(Command::Quit),
        (KeyCode::F(1), _) | (KeyCode::Char('?'), _) => Some(Command::OpenHelp),
        (KeyCode::Esc, _) => Some(Command::CloseOverlay),
        (KeyCode::Tab, _) | (KeyCode::Right, _) | (KeyCode::Char('l'), _) => {
            Some(Command::NextCategory)
        }
        (KeyCode::BackTab, _) | (KeyCode::Left, _) | (KeyCode::Char('h'), _) => {
            Some(Command::PrevCategory)
        }
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Some(Command::CursorUp),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Some(Command::CursorDown),
        (KeyCode::Enter, _) => Some(Command::SelectNote),
        (KeyCode::Char(' '), _) => Some(Command::Note(NoteAction::Toggle)),
        (KeyCode::Char('e'), _) => Some(Command::Note(NoteAction::Edit)),
        (KeyCode::Char('c'), _) => Some(Command::Note(NoteAction::Code)),
        (KeyCode::Char('i'), _) => Some(Command::Note(NoteAction::Image)),
        (KeyCode::Char('d'), _) | (KeyCode::Delete, _) => Some(Command::Note(NoteAction::Delete)),
        (KeyCode::Char('a'), _) => Some(Command::AddNote),
        (KeyCode::Char('/'), _) => Some(Command::Search),
        (KeyCode::Char('s'), _) => Some(Command::Settings),
        _ => None,
    }
}

fn map_code_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::CloseOverlay),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::ScrollDown),
        KeyCode::PageUp => Some(Command::PageUp),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Command::PageDown),
        _ => None,
    }
}

fn map_image_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::CloseOverlay),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::PrevImage),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::NextImage),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::ZoomIn),
        KeyCode::Char('-') => Some(Command::ZoomOut),
        _ => None,
    }
}
