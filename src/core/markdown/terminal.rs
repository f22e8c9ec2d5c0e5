use super::inline::parse_inline;
use crate::domain::model::{Block, Document, Span};

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const ITALIC: &str = "\x1b[3m";
const REVERSE: &str = "\x1b[7m";
const STRIKE: &str = "\x1b[9m";
const RESET: &str = "\x1b[0m";

const RULE_WIDTH: usize = 40;

/// Writes a [`Document`] as terminal text, one blank line between blocks.
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    ansi: bool,
}

impl TerminalRenderer {
    pub fn new(ansi: bool) -> Self {
        Self { ansi }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn render(&self, doc: &Document) -> String {
        doc.iter()
            .map(|block| self.render_block(block))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn render_block(&self, block: &Block) -> String {
        match block {
            Block::Paragraph(text) => self.spans(&parse_inline(text)),
            Block::Header { level, text } => {
                let text = self.spans(&parse_inline(text));
                if self.ansi {
                    format!("{}{}{}", BOLD, text, RESET)
                } else {
                    format!("{} {}", "#".repeat(usize::from(*level)), text)
                }
            }
            Block::BulletList(items) => items
                .iter()
                .map(|item| format!("  • {}", self.spans(&parse_inline(item))))
                .collect::<Vec<_>>()
                .join("\n"),
            // 編號依位置重新產生，不沿用原文數字
            Block::NumberedList(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    format!("  {}. {}", index + 1, self.spans(&parse_inline(item)))
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Block::CodeBlock { code, language } => {
                let mut out = Vec::new();
                if let Some(language) = language {
                    out.push(self.dim(&format!("    [{}]", language)));
                }
                out.extend(code.split('\n').map(|line| format!("    {}", line)));
                out.join("\n")
            }
            Block::Quote(text) => {
                let text = self.spans(&parse_inline(text));
                if self.ansi {
                    format!("  │ {}{}{}", ITALIC, text, RESET)
                } else {
                    format!("  │ {}", text)
                }
            }
            Block::HorizontalRule => self.dim(&"─".repeat(RULE_WIDTH)),
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.ansi {
            format!("{}{}{}", DIM, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn spans(&self, spans: &[Span]) -> String {
        let mut out = String::new();
        for span in spans {
            if !self.ansi || span.style.is_plain() {
                out.push_str(&span.text);
                continue;
            }
            if span.style.bold {
                out.push_str(BOLD);
            }
            if span.style.italic {
                out.push_str(ITALIC);
            }
            if span.style.strikethrough {
                out.push_str(STRIKE);
            }
            if span.style.code {
                out.push_str(REVERSE);
            }
            out.push_str(&span.text);
            out.push_str(RESET);
        }
        out
    }
}
