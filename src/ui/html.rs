use crate::core::{CategoryTab, CodeBlock, DataStore, NoteAction, NoteCard, NoteListView};

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

pub fn render_category_buttons(tabs: &[CategoryTab]) -> String {
    tabs.iter()
        .map(|tab| {
            let label = html_escape(&tab.label);
            format!(
                "<button class=\"category-item{}\" data-category=\"{label}\">\
                 <span class=\"category-name\">{label}</span>\
                 <span class=\"category-count\">{}</span>\
                 </button>",
                if tab.active { " active" } else { "" },
                tab.count
            )
        })
        .collect()
}

fn render_action(action: NoteAction, card: &NoteCard) -> String {
    let hidden = match action {
        NoteAction::Code => !card.has_code,
        NoteAction::Image => !card.has_images,
        _ => false,
    };
    let class = if action == NoteAction::Toggle {
        "toggle-btn"
    } else if hidden {
        "action-btn hidden"
    } else {
        "action-btn"
    };
    format!(
        "<button class=\"{class}\" data-action=\"{}\" data-note-id=\"{}\">{}</button>",
        action.as_str(),
        html_escape(&card.note_id),
        action.label(card.expanded)
    )
}

pub fn render_card(card: &NoteCard) -> String {
    let tags: String = card
        .tags
        .iter()
        .map(|tag| format!("<span class=\"note-tag\">{}</span>", html_escape(tag)))
        .collect();
    let actions: String = NoteAction::ALL
        .iter()
        .filter(|a| **a != NoteAction::Toggle)
        .map(|a| render_action(*a, card))
        .collect();
    format!(
        "<div class=\"note-card{selected}\" data-note-id=\"{id}\">\
         <div class=\"note-header\">\
         <div class=\"note-title\">{title}</div>\
         <div class=\"note-meta\"><span class=\"note-category\">{category}</span>\
         <div class=\"note-tags\">{tags}</div></div>\
         </div>\
         <div class=\"note-content{expanded}\"><div class=\"note-text\">{content}</div></div>\
         <div class=\"note-footer\"><div class=\"note-actions\">{actions}</div>{toggle}</div>\
         </div>",
        selected = if card.selected { " selected" } else { "" },
        id = html_escape(&card.note_id),
        title = html_escape(&card.title),
        category = html_escape(&card.category),
        expanded = if card.expanded { " expanded" } else { "" },
        content = html_escape(&card.content),
        toggle = render_action(NoteAction::Toggle, card),
    )
}

pub fn render_note_list(view: &NoteListView) -> String {
    match view {
        NoteListView::Empty => "<div class=\"empty-state\"><h3>No notes</h3>\
             <p>This category has no notes yet.</p></div>"
            .to_string(),
        NoteListView::Cards(cards) => cards.iter().map(render_card).collect(),
    }
}

pub fn render_code_blocks(blocks: &[CodeBlock]) -> String {
    let items: String = blocks
        .iter()
        .map(|block| {
            format!(
                "<div class=\"code-block-item\">\
                 <div class=\"code-language-header\"><span>{}</span></div>\
                 <div class=\"code-content\"><pre class=\"code-text\">{}</pre></div>\
                 </div>",
                html_escape(block.language_label()),
                html_escape(&block.content)
            )
        })
        .collect();
    format!("<div class=\"code-blocks-container\">{items}</div>")
}

pub fn render_page(store: &DataStore, tabs: &[CategoryTab], view: &NoteListView) -> String {
    let previews: String = match view {
        NoteListView::Empty => String::new(),
        NoteListView::Cards(cards) => cards
            .iter()
            .filter(|card| card.has_code)
            .filter_map(|card| store.note_by_id(&card.note_id))
            .map(|note| {
                format!(
                    "<template class=\"code-preview\" data-note-id=\"{}\">{}</template>\n",
                    html_escape(&note.note_id),
                    render_code_blocks(&note.code_blocks)
                )
            })
            .collect(),
    };
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Notee</title></head>\n\
         <body>\n<nav id=\"categories\">{}</nav>\n<main id=\"notesGrid\">{}</main>\n{}</body>\n</html>\n",
        render_category_buttons(tabs),
        render_note_list(view),
        previews
    )
}
