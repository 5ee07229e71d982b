pub mod html;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthChar;

use crate::app::Overlay;
use crate::core::{
    CategoryTab, CodeView, LineKind, NoteCard, NoteListView, PreviewModal, PreviewState,
};
use crate::io::ImageProbe;

pub struct UiModel<'a> {
    pub tabs: &'a [CategoryTab],
    pub view: &'a NoteListView,
    pub cursor: usize,
    pub preview: &'a PreviewModal,
    pub image_probe: Option<&'a ImageProbe>,
    pub overlay: &'a Overlay,
    pub status: String,
    pub hint: &'a str,
}

pub fn draw(frame: &mut Frame<'_>, model: UiModel<'_>) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_tabs(frame, chunks[0], model.tabs);
    draw_notes(frame, chunks[1], model.view, model.cursor);
    draw_status(frame, chunks[2], &model);

    match model.preview {
        PreviewModal::Closed => {}
        PreviewModal::Code { title, view, .. } => draw_code_modal(frame, area, title, view),
        PreviewModal::Image { title, state, .. } => {
            draw_image_modal(frame, area, title, state, model.image_probe)
        }
    }
    draw_overlay(frame, area, model.overlay);
}

pub fn modal_rect(area: Rect) -> Rect {
    centered_rect(80, 80, area)
}

pub fn code_view_height(area: Rect) -> usize {
    modal_rect(area).height.saturating_sub(3).max(1) as usize
}

fn draw_tabs(frame: &mut Frame<'_>, area: Rect, tabs: &[CategoryTab]) {
    let mut spans = Vec::new();
    for tab in tabs {
        let style = if tab.active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {} ({}) ", tab.label, tab.count), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(Block::default().title("Categories").borders(Borders::ALL)),
        area,
    );
}

fn card_lines(card: &NoteCard, is_cursor: bool, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let marker = if is_cursor { ">" } else { " " };
    let mut title_style = Style::default().add_modifier(Modifier::BOLD);
    if card.selected {
        title_style = title_style.fg(Color::Yellow);
    }
    let select_mark = if card.selected { "* " } else { "" };
    let title_width = width.saturating_sub(2 + select_mark.len());
    lines.push(Line::from(vec![
        Span::raw(format!("{marker} {select_mark}")),
        Span::styled(truncate_to_width(&card.title, title_width), title_style),
    ]));

    let mut meta = vec![Span::styled(
        format!("  [{}]", card.category),
        Style::default().fg(Color::Cyan),
    )];
    for tag in &card.tags {
        meta.push(Span::styled(
            format!(" #{tag}"),
            Style::default().fg(Color::Magenta),
        ));
    }
    lines.push(Line::from(meta));

    let body_width = width.saturating_sub(4).max(1);
    if card.expanded {
        for source in card.content.lines() {
            for piece in wrap_to_width(source, body_width) {
                lines.push(Line::from(format!("    {piece}")));
            }
        }
    } else {
        let first = card.content.lines().next().unwrap_or("");
        let more = card.content.lines().nth(1).is_some();
        let mut preview = truncate_to_width(first, body_width);
        if more && !preview.ends_with('…') {
            preview = truncate_to_width(&format!("{preview} …"), body_width);
        }
        lines.push(Line::from(Span::styled(
            format!("    {preview}"),
            Style::default().fg(Color::Gray),
        )));
    }

    let mut actions = vec!["space expand".to_string()];
    if card.expanded {
        actions[0] = "space collapse".to_string();
    }
    if card.has_code {
        actions.push("c code".to_string());
    }
    if card.has_images {
        actions.push("i images".to_string());
    }
    lines.push(Line::from(Span::styled(
        format!("    {}", actions.join(" | ")),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    lines
}

fn draw_notes(frame: &mut Frame<'_>, area: Rect, view: &NoteListView, cursor: usize) {
    let block = Block::default().title("Notes").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cards = match view {
        NoteListView::Empty => {
            let text = vec![
                Line::from(Span::styled(
                    "No notes",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from("This category has no notes yet."),
            ];
            frame.render_widget(
                Paragraph::new(text).alignment(Alignment::Center),
                inner,
            );
            return;
        }
        NoteListView::Cards(cards) => cards,
    };

    let width = inner.width as usize;
    let mut lines = Vec::new();
    let mut cursor_start = 0usize;
    let mut cursor_end = 0usize;
    for (idx, card) in cards.iter().enumerate() {
        if idx == cursor {
            cursor_start = lines.len();
        }
        lines.extend(card_lines(card, idx == cursor, width));
        if idx == cursor {
            cursor_end = lines.len();
        }
    }

    let height = inner.height as usize;
    let scroll = cursor_end.saturating_sub(height).min(cursor_start);
    frame.render_widget(
        Paragraph::new(lines).scroll((scroll.min(u16::MAX as usize) as u16, 0)),
        inner,
    );
}

fn draw_status(frame: &mut Frame<'_>, area: Rect, model: &UiModel<'_>) {
    let text = format!(" {} | {}", model.status, model.hint);
    frame.render_widget(
        Paragraph::new(truncate_to_width(&text, area.width as usize)),
        area,
    );
}

fn draw_code_modal(frame: &mut Frame<'_>, area: Rect, title: &str, view: &CodeView) {
    let rect = modal_rect(area);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .title(format!("Code - {title}"))
        .borders(Borders::ALL);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let height = chunks[0].height as usize;
    let mut lines = Vec::with_capacity(height);
    for line_idx in view.top_line..(view.top_line + height).min(view.line_count()) {
        let text = view.line_text(line_idx).replace('\t', "    ");
        let line = match view.line_kind(line_idx) {
            Some(LineKind::Header) => Line::from(Span::styled(
                text,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            _ => Line::from(text),
        };
        lines.push(line);
    }
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let footer = format!(
        "Lines {}-{} of {} | Up/Down scroll | Esc close",
        (view.top_line + 1).min(view.line_count()),
        (view.top_line + height).min(view.line_count()),
        view.line_count()
    );
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

fn draw_image_modal(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    state: &PreviewState,
    probe: Option<&ImageProbe>,
) {
    let rect = modal_rect(area);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .title(format!("Images - {title}"))
        .borders(Borders::ALL);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let name = state
        .current()
        .map(|image| image.display_name())
        .unwrap_or_default();
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}/{} - {name}", state.index() + 1, state.images().len()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    match probe {
        Some(ImageProbe::Loaded {
            path,
            width,
            height,
        }) => {
            let zoom = u64::from(state.zoom());
            let scale = |v: u32| u64::from(v) * zoom / 100;
            lines.push(Line::from(format!("Path: {path}")));
            lines.push(Line::from(format!("Original: {width}x{height} px")));
            lines.push(Line::from(Span::styled(
                format!("At {zoom}%: {}x{} px", scale(*width), scale(*height)),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        Some(ImageProbe::LoadFailed { path, reason }) => {
            lines.push(Line::from(Span::styled(
                "Image failed to load",
                Style::default().fg(Color::Red),
            )));
            lines.push(Line::from(format!("Path: {path}")));
            lines.push(Line::from(Span::styled(
                reason.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        Some(ImageProbe::InvalidPath) | None => {
            lines.push(Line::from(Span::styled(
                "Invalid image path",
                Style::default().fg(Color::Red),
            )));
        }
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        chunks[0],
    );

    let enabled = Style::default();
    let disabled = Style::default().fg(Color::DarkGray);
    let footer = Line::from(vec![
        Span::styled(
            "< prev",
            if state.has_prev() { enabled } else { disabled },
        ),
        Span::raw(format!("  | zoom {}% (-/+) |  ", state.zoom())),
        Span::styled(
            "next >",
            if state.has_next() { enabled } else { disabled },
        ),
        Span::raw("  | Esc close"),
    ]);
    frame.render_widget(
        Paragraph::new(footer).alignment(Alignment::Center),
        chunks[1],
    );
}

fn draw_overlay(frame: &mut Frame<'_>, area: Rect, overlay: &Overlay) {
    match overlay {
        Overlay::None => {}
        Overlay::Help => {
            let rect = centered_rect(70, 70, area);
            frame.render_widget(Clear, rect);
            let text = vec![
                Line::from("Tab/Right next category | Shift+Tab/Left previous category"),
                Line::from("Up/Down move | Enter select | Space expand/collapse"),
                Line::from("c code preview | i image preview | e edit | d delete"),
                Line::from("a new note | / search | s settings | ? help | q quit"),
                Line::from("Image preview: Left/Right navigate | +/- zoom"),
                Line::from("Esc, q or a click outside closes a preview"),
            ];
            let widget = Paragraph::new(text)
                .alignment(Alignment::Left)
                .block(Block::default().title("Help").borders(Borders::ALL));
            frame.render_widget(widget, rect);
        }
        Overlay::Notice(notice) => {
            let rect = centered_rect(60, 20, area);
            frame.render_widget(Clear, rect);
            let widget = Paragraph::new(notice.message.as_str())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false })
                .block(Block::default().title("Info").borders(Borders::ALL));
            frame.render_widget(widget, rect);
        }
    }
}

pub fn truncate_to_width(text: &str, max_cols: usize) -> String {
    let total: usize = text
        .chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
        .sum();
    if total <= max_cols {
        return text.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_cols - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

pub fn wrap_to_width(text: &str, max_cols: usize) -> Vec<String> {
    let max_cols = max_cols.max(1);
    let mut out = Vec::new();
    let mut current = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch = if ch == '\t' { ' ' } else { ch };
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_cols && !current.is_empty() {
            out.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(ch);
        used += w;
    }
    out.push(current);
    out
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use super::{UiModel, draw, modal_rect, truncate_to_width, wrap_to_width};
    use crate::app::Overlay;
    use crate::core::{CategorySelector, DataStore, Note, NoteList, PreviewModal};
    use crate::io::ImageProbe;

    #[test]
    fn truncation_counts_wide_characters() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        assert_eq!(truncate_to_width("笔记笔记", 5), "笔记…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn wrapping_respects_column_width() {
        assert_eq!(wrap_to_width("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_to_width("笔记笔", 4), vec!["笔记", "笔"]);
        assert_eq!(wrap_to_width("", 4), vec![""]);
    }

    #[test]
    fn modal_sits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = modal_rect(area);
        assert!(rect.x > 0 && rect.y > 0);
        assert!(rect.right() < area.right() && rect.bottom() < area.bottom());
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn draws_tabs_cards_and_image_placeholder() {
        let mut note = Note::new("1", "Work");
        note.title = "Standup".into();
        note.images.push(crate::core::ImageRef::Path(String::new()));
        let store = DataStore::new(vec![note], vec!["Work".into()]);
        let selector = CategorySelector::new(&store);
        let view = NoteList::new().render(&store, selector.active());
        let mut preview = PreviewModal::Closed;
        preview.open_image(&store, "1").expect("open");

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal
            .draw(|f| {
                draw(
                    f,
                    UiModel {
                        tabs: selector.tabs(),
                        view: &view,
                        cursor: 0,
                        preview: &preview,
                        image_probe: None,
                        overlay: &Overlay::None,
                        status: "1 notes".into(),
                        hint: "q quit",
                    },
                )
            })
            .expect("draw");
        let text = buffer_text(&terminal);
        assert!(text.contains("Work (1)"));
        assert!(text.contains("Invalid image path"));
        assert!(text.contains("zoom 100%"));
    }

    #[test]
    fn loaded_image_size_follows_zoom() {
        let mut note = Note::new("1", "Work");
        note.images.push(crate::core::ImageRef::Path("images/a.png".into()));
        let store = DataStore::new(vec![note], Vec::new());
        let selector = CategorySelector::new(&store);
        let view = NoteList::new().render(&store, selector.active());
        let mut preview = PreviewModal::Closed;
        preview.open_image(&store, "1").expect("open");
        preview.zoom_in();
        preview.zoom_in();
        let probe = ImageProbe::Loaded {
            path: "images/a.png".into(),
            width: 40,
            height: 20,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal
            .draw(|f| {
                draw(
                    f,
                    UiModel {
                        tabs: selector.tabs(),
                        view: &view,
                        cursor: 0,
                        preview: &preview,
                        image_probe: Some(&probe),
                        overlay: &Overlay::None,
                        status: String::new(),
                        hint: "",
                    },
                )
            })
            .expect("draw");
        let text = buffer_text(&terminal);
        assert!(text.contains("Original: 40x20 px"));
        assert!(text.contains("At 150%: 60x30 px"));
    }

    #[test]
    fn draws_empty_state() {
        let store = DataStore::new(Vec::new(), Vec::new());
        let selector = CategorySelector::new(&store);
        let view = NoteList::new().render(&store, selector.active());
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
        terminal
            .draw(|f| {
                draw(
                    f,
                    UiModel {
                        tabs: selector.tabs(),
                        view: &view,
                        cursor: 0,
                        preview: &PreviewModal::Closed,
                        image_probe: None,
                        overlay: &Overlay::None,
                        status: String::new(),
                        hint: "",
                    },
                )
            })
            .expect("draw");
        assert!(buffer_text(&terminal).contains("No notes"));
    }
}
