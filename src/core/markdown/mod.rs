pub mod block;
pub mod inline;
pub mod terminal;

pub use block::parse_blocks;
pub use inline::{parse_inline, plain_text};
pub use terminal::TerminalRenderer;

use crate::domain::model::{Block, Document, Span};

/// Parses model output into a document. Never fails; unknown syntax is kept
/// as paragraph text.
pub fn render(text: &str) -> Document {
    Document {
        blocks: parse_blocks(text),
    }
}

impl Block {
    /// Inline runs for every text field of the block, one entry per line
    /// item. Code blocks and rules carry no inline markup.
    pub fn inline_spans(&self) -> Vec<Vec<Span>> {
        match self {
            Block::Paragraph(text) | Block::Quote(text) | Block::Header { text, .. } => {
                vec![parse_inline(text)]
            }
            Block::BulletList(items) | Block::NumberedList(items) => {
                items.iter().map(|item| parse_inline(item)).collect()
            }
            Block::CodeBlock { .. } | Block::HorizontalRule => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Style;

    #[test]
    fn test_render_wraps_blocks() {
        let doc = render("# Plan\n- **Learn** Rust\n- Ship");
        assert_eq!(doc.len(), 2);
        let spans = doc.blocks[1].inline_spans();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0][0], Span::new("Learn", Style::BOLD));
        assert_eq!(spans[1], vec![Span::plain("Ship")]);
    }

    #[test]
    fn test_code_block_has_no_inline_spans() {
        let doc = render("```\n**not bold**\n```");
        assert!(doc.blocks[0].inline_spans().is_empty());
    }

    #[test]
    fn test_render_is_deterministic() {
        let text = "Intro *a*\n\n1. one\n2. two\n\n> quote";
        assert_eq!(render(text), render(text));
    }
}
