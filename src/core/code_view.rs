use ropey::Rope;

use crate::core::note::CodeBlock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Code,
    Blank,
}

#[derive(Debug, Clone)]
pub struct CodeView {
    rope: Rope,
    kinds: Vec<LineKind>,
    pub top_line: usize,
    pub height: usize,
}

// Every break ropey splits lines on. CRLF is folded to `\n` before this runs.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

impl CodeView {
    pub fn new(blocks: &[CodeBlock]) -> Self {
        let mut text = String::new();
        let mut kinds = Vec::new();
        for (idx, block) in blocks.iter().enumerate() {
            if idx > 0 {
                text.push('\n');
                kinds.push(LineKind::Blank);
            }
            let label = block.language_label().replace(is_line_break, " ");
            text.push_str(&format!("[{label}]\n"));
            kinds.push(LineKind::Header);
            let body = block
                .content
                .replace("\r\n", "\n")
                .replace(is_line_break, "\n");
            let body = body.strip_suffix('\n').unwrap_or(&body);
            for line in body.split('\n') {
                text.push_str(line);
                text.push('\n');
                kinds.push(LineKind::Code);
            }
        }
        Self {
            rope: Rope::from_str(&text),
            kinds,
            top_line: 0,
            height: 20,
        }
    }

    pub fn line_count(&self) -> usize {
        self.kinds.len()
    }

    pub fn line_text(&self, line: usize) -> String {
        if line >= self.line_count() {
            return String::new();
        }
        let mut s = self.rope.line(line).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        s
    }

    pub fn line_kind(&self, line: usize) -> Option<LineKind> {
        self.kinds.get(line).copied()
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.clamp();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.top_line = self.top_line.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.top_line = self.top_line.saturating_add(lines);
        self.clamp();
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.height);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height);
    }

    fn max_top(&self) -> usize {
        self.line_count().saturating_sub(self.height)
    }

    fn clamp(&mut self) {
        self.top_line = self.top_line.min(self.max_top());
    }
}
