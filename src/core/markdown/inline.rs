use crate::domain::model::{Span, Style};

/// Collects spans, merging consecutive unstyled characters into one run.
#[derive(Default)]
struct SpanBuilder {
    spans: Vec<Span>,
    pending: String,
}

impl SpanBuilder {
    fn push_char(&mut self, c: char) {
        self.pending.push(c);
    }

    /// Emits a delimiter that had no closer as its own unstyled run.
    fn push_literal(&mut self, literal: &str) {
        self.flush();
        self.spans.push(Span::plain(literal));
    }

    fn push_styled(&mut self, text: impl Into<String>, style: Style) {
        self.flush();
        self.spans.push(Span::new(text, style));
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.spans.push(Span::plain(std::mem::take(&mut self.pending)));
        }
    }

    fn finish(mut self) -> Vec<Span> {
        self.flush();
        self.spans
    }
}

/// Finds the closing delimiter of a paired run starting at the front of
/// `rest`. Returns the enclosed content and the byte length consumed, or
/// `None` when there is no closer or the content would be empty.
fn paired<'a>(rest: &'a str, delimiter: &str) -> Option<(&'a str, usize)> {
    let open = delimiter.len();
    let end = rest[open..].find(delimiter)? + open;
    (end > open).then(|| (&rest[open..end], end + delimiter.len()))
}

/// Like [`paired`] for single-character delimiters, where the content must
/// not contain the delimiter itself.
fn single(rest: &str, delimiter: char) -> Option<(&str, usize)> {
    let end = rest[1..].find(delimiter)? + 1;
    let content = &rest[1..end];
    (end > 1 && !content.contains(delimiter)).then(|| (content, end + 1))
}

/// Splits a line of text into styled runs with a flat left-to-right scan.
///
/// Text inside a styled run is not scanned again, so `**bold _x_**` yields a
/// single bold run containing the underscores. Delimiters without a closer
/// are kept as literal text.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut builder = SpanBuilder::default();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        let (style, delimiter) = if rest.starts_with("***") {
            (Style::BOLD_ITALIC, "***")
        } else if rest.starts_with("**") {
            (Style::BOLD, "**")
        } else if rest.starts_with("__") {
            (Style::BOLD, "__")
        } else if rest.starts_with("~~") {
            (Style::STRIKETHROUGH, "~~")
        } else if c == '*' {
            (Style::ITALIC, "*")
        } else if c == '_' {
            (Style::ITALIC, "_")
        } else if c == '`' {
            (Style::CODE, "`")
        } else {
            builder.push_char(c);
            rest = &rest[c.len_utf8()..];
            continue;
        };

        let matched = if delimiter.len() == 1 {
            single(rest, c)
        } else {
            paired(rest, delimiter)
        };

        match matched {
            Some((content, consumed)) if style.code => {
                builder.push_styled(format!(" {} ", content), style);
                rest = &rest[consumed..];
            }
            Some((content, consumed)) => {
                builder.push_styled(content, style);
                rest = &rest[consumed..];
            }
            None => {
                builder.push_literal(delimiter);
                rest = &rest[delimiter.len()..];
            }
        }
    }

    builder.finish()
}

/// Concatenated text of all runs, styles dropped.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|span| span.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_italic_with_plain_between() {
        assert_eq!(
            parse_inline("**bold** and *italic*"),
            vec![
                Span::new("bold", Style::BOLD),
                Span::plain(" and "),
                Span::new("italic", Style::ITALIC),
            ]
        );
    }

    #[test]
    fn test_unmatched_bold_is_literal() {
        assert_eq!(
            parse_inline("**oops"),
            vec![Span::plain("**"), Span::plain("oops")]
        );
    }

    #[test]
    fn test_bold_italic() {
        assert_eq!(
            parse_inline("***key*** point"),
            vec![
                Span::new("key", Style::BOLD_ITALIC),
                Span::plain(" point")
            ]
        );
    }

    #[test]
    fn test_empty_triple_star_is_literal() {
        assert_eq!(
            parse_inline("******"),
            vec![Span::plain("***"), Span::plain("***")]
        );
    }

    #[test]
    fn test_alternate_delimiters() {
        assert_eq!(
            parse_inline("__strong__ _soft_ ~~gone~~"),
            vec![
                Span::new("strong", Style::BOLD),
                Span::plain(" "),
                Span::new("soft", Style::ITALIC),
                Span::plain(" "),
                Span::new("gone", Style::STRIKETHROUGH),
            ]
        );
    }

    #[test]
    fn test_inline_code_is_padded() {
        assert_eq!(
            parse_inline("run `cargo test` now"),
            vec![
                Span::plain("run "),
                Span::new(" cargo test ", Style::CODE),
                Span::plain(" now"),
            ]
        );
    }

    #[test]
    fn test_unmatched_single_delimiters() {
        assert_eq!(
            parse_inline("a*b"),
            vec![Span::plain("a"), Span::plain("*"), Span::plain("b")]
        );
        assert_eq!(
            parse_inline("snake_case"),
            vec![Span::plain("snake"), Span::plain("_"), Span::plain("case")]
        );
        assert_eq!(parse_inline("`"), vec![Span::plain("`")]);
        assert_eq!(
            parse_inline("~~x"),
            vec![Span::plain("~~"), Span::plain("x")]
        );
    }

    #[test]
    fn test_styled_content_is_not_rescanned() {
        assert_eq!(
            parse_inline("**bold _x_**"),
            vec![Span::new("bold _x_", Style::BOLD)]
        );
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            parse_inline("職涯 **建議** ✓"),
            vec![
                Span::plain("職涯 "),
                Span::new("建議", Style::BOLD),
                Span::plain(" ✓"),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_plain_text_drops_styles() {
        let spans = parse_inline("**Tip:** use `git`");
        assert_eq!(plain_text(&spans), "Tip: use  git ");
    }
}
