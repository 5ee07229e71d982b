use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};
use tracing_subscriber::EnvFilter;

use crate::core::{
    CategorySelector, Command, DataStore, NoteAction, NoteList, NoteListView, Notice,
    PreviewKind, PreviewModal,
};
use crate::input::{InputScope, map_key_event};
use crate::io::{ImageProbe, load_store, probe_image};
use crate::ui::html::render_page;
use crate::ui::{UiModel, code_view_height, draw, modal_rect};

#[derive(Parser, Debug)]
#[command(author, version, about = "Notee - terminal note viewer")]
struct Cli {
    /// Directory holding notes.json, categories.json and images/
    #[arg(value_name = "DATA_DIR")]
    data_dir: Option<PathBuf>,
    /// Category shown first
    #[arg(long)]
    category: Option<String>,
    /// Print the card list as HTML and exit
    #[arg(long)]
    html: bool,
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    Notice(Notice),
}

pub struct App {
    pub store: DataStore,
    pub categories: CategorySelector,
    pub notes: NoteList,
    pub view: NoteListView,
    pub preview: PreviewModal,
    pub image_probe: Option<ImageProbe>,
    pub overlay: Overlay,
    pub data_dir: PathBuf,
    pub running: bool,
    pub needs_redraw: bool,
    pub screen: Rect,
}

impl App {
    pub fn new(store: DataStore, data_dir: PathBuf) -> Self {
        let categories = CategorySelector::new(&store);
        let notes = NoteList::new();
        let view = notes.render(&store, categories.active());
        Self {
            store,
            categories,
            notes,
            view,
            preview: PreviewModal::Closed,
            image_probe: None,
            overlay: Overlay::None,
            data_dir,
            running: true,
            needs_redraw: true,
            screen: Rect::new(0, 0, 80, 24),
        }
    }

    fn show_notice(&mut self, notice: Notice) {
        self.overlay = Overlay::Notice(notice);
        self.needs_redraw = true;
    }

    pub fn render_notes(&mut self) {
        self.view = self.notes.render(&self.store, self.categories.active());
        self.notes.clamp_cursor(self.view.len());
        self.categories.refresh_counts(&self.store);
        self.needs_redraw = true;
    }

    pub fn select_category(&mut self, category: &str) {
        if self.categories.select(category) {
            self.notes.reset_cursor();
            self.render_notes();
        }
    }

    fn cycle_category(&mut self, forward: bool) {
        let changed = if forward {
            self.categories.select_next()
        } else {
            self.categories.select_prev()
        };
        if changed {
            self.notes.reset_cursor();
            self.render_notes();
        }
    }

    fn cursor_note_id(&self) -> Option<String> {
        self.view
            .card(self.notes.cursor())
            .map(|card| card.note_id.clone())
    }

    pub fn input_scope(&self) -> InputScope {
        if !matches!(self.overlay, Overlay::None) {
            return InputScope::Message;
        }
        match self.preview.kind() {
            None => InputScope::List,
            Some(PreviewKind::Code) => InputScope::CodePreview,
            Some(PreviewKind::Image) => InputScope::ImagePreview,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(cmd) = map_key_event(key, self.input_scope()) {
            self.apply_command(cmd);
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        if !matches!(self.overlay, Overlay::None) {
            self.overlay = Overlay::None;
            self.needs_redraw = true;
            return;
        }
        if self.preview.is_open() {
            let inside = modal_rect(self.screen).contains(Position::new(mouse.column, mouse.row));
            if !inside {
                self.close_preview();
            }
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
        let code_height = code_view_height(self.screen);
        if let Some(view) = self.preview.code_view_mut() {
            view.set_height(code_height);
        }
        self.needs_redraw = true;
    }

    fn close_preview(&mut self) {
        self.preview.close();
        self.image_probe = None;
        self.needs_redraw = true;
    }

    fn refresh_image_probe(&mut self) {
        self.image_probe = match &self.preview {
            PreviewModal::Image { state, .. } => state
                .current()
                .map(|image| probe_image(&self.data_dir, image)),
            _ => None,
        };
    }

    pub fn dispatch_note_action(&mut self, action: NoteAction, note_id: &str) {
        match action {
            NoteAction::Toggle => {
                self.notes.toggle_expansion(note_id);
                self.render_notes();
            }
            NoteAction::Edit => {
                let notice = self.notes.edit(note_id);
                self.show_notice(notice);
            }
            NoteAction::Delete => {
                let notice = self.notes.delete(note_id);
                self.show_notice(notice);
            }
            NoteAction::Code => match self.preview.open_code(&self.store, note_id) {
                Ok(()) => {
                    let code_height = code_view_height(self.screen);
                    if let Some(view) = self.preview.code_view_mut() {
                        view.set_height(code_height);
                    }
                }
                Err(notice) => self.show_notice(notice),
            },
            NoteAction::Image => match self.preview.open_image(&self.store, note_id) {
                Ok(()) => self.refresh_image_probe(),
                Err(notice) => self.show_notice(notice),
            },
        }
        self.needs_redraw = true;
    }

    pub fn apply_command(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => self.running = false,
            Command::OpenHelp => self.overlay = Overlay::Help,
            Command::CloseOverlay => {
                if !matches!(self.overlay, Overlay::None) {
                    self.overlay = Overlay::None;
                } else if self.preview.is_open() {
                    self.close_preview();
                }
            }
            Command::NextCategory => self.cycle_category(true),
            Command::PrevCategory => self.cycle_category(false),
            Command::CursorUp => self.notes.move_cursor(-1, self.view.len()),
            Command::CursorDown => self.notes.move_cursor(1, self.view.len()),
            Command::SelectNote => {
                if let Some(id) = self.cursor_note_id() {
                    self.notes.select(&id);
                    self.render_notes();
                }
            }
            Command::Note(action) => {
                if let Some(id) = self.cursor_note_id() {
                    self.dispatch_note_action(action, &id);
                }
            }
            Command::AddNote => {
                tracing::info!("add note requested");
                self.show_notice(Notice::not_implemented("Creating notes"));
            }
            Command::Search => {
                tracing::info!("search requested");
                self.show_notice(Notice::not_implemented("Search"));
            }
            Command::Settings => {
                tracing::info!("settings requested");
                self.show_notice(Notice::not_implemented("Settings"));
            }
            Command::PrevImage => {
                self.preview.prev();
                self.refresh_image_probe();
            }
            Command::NextImage => {
                self.preview.next();
                self.refresh_image_probe();
            }
            Command::ZoomIn => self.preview.zoom_in(),
            Command::ZoomOut => self.preview.zoom_out(),
            Command::ScrollUp => {
                if let Some(view) = self.preview.code_view_mut() {
                    view.scroll_up(1);
                }
            }
            Command::ScrollDown => {
                if let Some(view) = self.preview.code_view_mut() {
                    view.scroll_down(1);
                }
            }
            Command::PageUp => {
                if let Some(view) = self.preview.code_view_mut() {
                    view.page_up();
                }
            }
            Command::PageDown => {
                if let Some(view) = self.preview.code_view_mut() {
                    view.page_down();
                }
            }
        }
        self.needs_redraw = true;
    }

    pub fn status_line(&self) -> String {
        let selected = self
            .notes
            .selected()
            .and_then(|id| self.store.note_by_id(id))
            .map(|note| note.title.as_str())
            .unwrap_or("-");
        format!(
            "{} notes | {} categories | {} | selected: {}",
            self.store.notes().len(),
            self.store.categories().len(),
            self.categories.active(),
            selected
        )
    }

    fn status_hint(&self) -> &'static str {
        match self.input_scope() {
            InputScope::List => "Tab category | Space expand | c code | i images | ? help | q quit",
            InputScope::CodePreview => "Up/Down scroll | Esc close",
            InputScope::ImagePreview => "Left/Right image | +/- zoom | Esc close",
            InputScope::Message => "Esc/Enter dismiss",
        }
    }
}

fn write_html(out: &mut impl Write, page: &str) -> Result<()> {
    out.write_all(page.as_bytes())
        .and_then(|()| out.flush())
        .context("writing HTML page")
}

fn default_data_dir() -> Result<PathBuf> {
    let home = env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("notee")
        .join("data"))
}

fn default_log_file() -> PathBuf {
    env::temp_dir().join("notee.log")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("notee=info"))
}

fn init_logging(log_file: Option<&Path>, to_stderr: bool) -> Result<()> {
    if to_stderr && log_file.is_none() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("initializing logging: {e}"))?;
        return Ok(());
    }

    let path = log_file.map(Path::to_path_buf).unwrap_or_else(default_log_file);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("initializing logging: {e}"))?;
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.html)?;

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    let store = load_store(&data_dir);
    let mut app = App::new(store, data_dir);
    if let Some(category) = cli.category.as_deref() {
        if !app.store.has_category(category) {
            tracing::warn!(category, "unknown category requested");
        }
        app.select_category(category);
    }

    if cli.html {
        let page = render_page(&app.store, app.categories.tabs(), &app.view);
        write_html(&mut io::stdout().lock(), &page)?;
        return Ok(());
    }

    let (_guard, mut terminal) = setup_terminal()?;
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    tracing::info!("viewer started");

    while app.running {
        if app.needs_redraw {
            terminal.draw(|f| {
                draw(
                    f,
                    UiModel {
                        tabs: app.categories.tabs(),
                        view: &app.view,
                        cursor: app.notes.cursor(),
                        preview: &app.preview,
                        image_probe: app.image_probe.as_ref(),
                        overlay: &app.overlay,
                        status: app.status_line(),
                        hint: app.status_hint(),
                    },
                );
            })?;
            app.needs_redraw = false;
        }

        if event::poll(Duration::from_millis(120))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                    app.needs_redraw = true;
                }
                Event::Resize(w, h) => app.resize(w, h),
                _ => {}
            }
        }
    }

    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
    }
}

fn setup_terminal() -> Result<(TerminalGuard, Terminal<CrosstermBackend<io::Stdout>>)> {
    enable_raw_mode().context("enabling raw mode")?;
    execute!(
        io::stdout(),
        EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )
    .context("enter alternate screen")?;

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        hook(panic_info);
    }));

    let guard = TerminalGuard;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend).context("creating terminal")?;
    Ok((guard, terminal))
}
