use crate::domain::model::Block;
use regex::Regex;
use std::sync::OnceLock;

const BULLET_PREFIXES: [&str; 3] = ["- ", "* ", "• "];

fn numbered_item_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+\.\s").expect("numbered item pattern is valid"))
}

fn is_numbered_item(line: &str) -> bool {
    numbered_item_pattern().is_match(line)
}

fn is_bullet_item(line: &str) -> bool {
    BULLET_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

fn is_quote_line(line: &str) -> bool {
    line.starts_with("> ")
}

fn is_fence(line: &str) -> bool {
    line.starts_with("```")
}

fn header(line: &str) -> Option<Block> {
    [("### ", 3u8), ("## ", 2), ("# ", 1)]
        .into_iter()
        .find_map(|(prefix, level)| {
            line.strip_prefix(prefix).map(|rest| Block::Header {
                level,
                text: rest.trim().to_string(),
            })
        })
}

fn is_horizontal_rule(line: &str) -> bool {
    matches!(line, "---" | "***" | "___")
}

/// Lines that close a running paragraph. Broader than the list prefixes:
/// a bare `-` or `*` is enough.
fn interrupts_paragraph(line: &str) -> bool {
    line.is_empty()
        || line.starts_with('#')
        || line.starts_with('-')
        || line.starts_with('*')
        || line.starts_with('>')
        || is_fence(line)
        || is_numbered_item(line)
}

fn strip_bullet(line: &str) -> &str {
    BULLET_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
        .unwrap_or(line)
        .trim()
}

fn numbered_item_text(line: &str) -> &str {
    line.split_once(". ")
        .map(|(_, rest)| rest)
        .unwrap_or(line)
        .trim()
}

/// Splits text into blocks with a single forward scan over its lines.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        if let Some(block) = header(line) {
            blocks.push(block);
            i += 1;
        } else if is_horizontal_rule(line) {
            blocks.push(Block::HorizontalRule);
            i += 1;
        } else if is_quote_line(line) {
            let mut quote_lines = Vec::new();
            while i < lines.len() && is_quote_line(lines[i].trim()) {
                quote_lines.push(lines[i].trim()["> ".len()..].trim());
                i += 1;
            }
            blocks.push(Block::Quote(quote_lines.join(" ")));
        } else if is_fence(line) {
            let language = line["```".len()..].trim();
            let language = (!language.is_empty()).then(|| language.to_string());
            let mut code_lines = Vec::new();
            i += 1;
            while i < lines.len() && !is_fence(lines[i].trim()) {
                code_lines.push(lines[i]);
                i += 1;
            }
            blocks.push(Block::CodeBlock {
                code: code_lines.join("\n"),
                language,
            });
            // 跳過結尾的 ```
            i += 1;
        } else if is_bullet_item(line) {
            let mut items = Vec::new();
            while i < lines.len() && is_bullet_item(lines[i].trim()) {
                items.push(strip_bullet(lines[i].trim()).to_string());
                i += 1;
            }
            blocks.push(Block::BulletList(items));
        } else if is_numbered_item(line) {
            let mut items = Vec::new();
            while i < lines.len() && is_numbered_item(lines[i].trim()) {
                items.push(numbered_item_text(lines[i].trim()).to_string());
                i += 1;
            }
            blocks.push(Block::NumberedList(items));
        } else if line.is_empty() {
            i += 1;
        } else {
            // The opening line always belongs to the paragraph, even when it
            // looks like an interrupting line (`#tag`, `**Bold** text`).
            let mut paragraph_lines = vec![line];
            i += 1;
            while i < lines.len() && !interrupts_paragraph(lines[i].trim()) {
                paragraph_lines.push(lines[i].trim());
                i += 1;
            }
            blocks.push(Block::Paragraph(paragraph_lines.join(" ")));
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> Block {
        Block::Paragraph(text.to_string())
    }

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_plain_text_joins_into_one_paragraph() {
        let blocks = parse_blocks("Start networking early.\n  Keep a journal  \nof wins");
        assert_eq!(
            blocks,
            vec![paragraph("Start networking early. Keep a journal of wins")]
        );
    }

    #[test]
    fn test_header_then_paragraph() {
        let blocks = parse_blocks("# Title\n\nBody");
        assert_eq!(
            blocks,
            vec![
                Block::Header {
                    level: 1,
                    text: "Title".to_string()
                },
                paragraph("Body")
            ]
        );
    }

    #[test]
    fn test_header_levels() {
        let blocks = parse_blocks("### Three\n## Two\n#### Four");
        assert_eq!(
            blocks,
            vec![
                Block::Header {
                    level: 3,
                    text: "Three".to_string()
                },
                Block::Header {
                    level: 2,
                    text: "Two".to_string()
                },
                paragraph("#### Four"),
            ]
        );
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(
            parse_blocks("- a\n- b\n- c"),
            vec![Block::BulletList(items(&["a", "b", "c"]))]
        );
    }

    #[test]
    fn test_bullet_list_mixed_markers_strip_only_first_prefix() {
        assert_eq!(
            parse_blocks("* one\n•  two\n- * three"),
            vec![Block::BulletList(items(&["one", "two", "* three"]))]
        );
    }

    #[test]
    fn test_numbered_list_ignores_source_numerals() {
        let blocks = parse_blocks("1. Update resume\n7. Apply\n3.\tFollow up");
        assert_eq!(
            blocks,
            vec![Block::NumberedList(items(&[
                "Update resume",
                "Apply",
                "3.\tFollow up"
            ]))]
        );
    }

    #[test]
    fn test_code_block_with_language() {
        assert_eq!(
            parse_blocks("```py\nprint(1)\n```"),
            vec![Block::CodeBlock {
                code: "print(1)".to_string(),
                language: Some("py".to_string())
            }]
        );
    }

    #[test]
    fn test_code_block_keeps_raw_lines() {
        let blocks = parse_blocks("```\n  indented\n# not a header\n```\nafter");
        assert_eq!(
            blocks,
            vec![
                Block::CodeBlock {
                    code: "  indented\n# not a header".to_string(),
                    language: None
                },
                paragraph("after")
            ]
        );
    }

    #[test]
    fn test_unclosed_code_fence_runs_to_end() {
        assert_eq!(
            parse_blocks("```\nline1\nline2"),
            vec![Block::CodeBlock {
                code: "line1\nline2".to_string(),
                language: None
            }]
        );
    }

    #[test]
    fn test_quote_lines_are_joined() {
        let blocks = parse_blocks("> Be curious.\n  > Stay humble.\nNext");
        assert_eq!(
            blocks,
            vec![
                Block::Quote("Be curious. Stay humble.".to_string()),
                paragraph("Next")
            ]
        );
    }

    #[test]
    fn test_horizontal_rules() {
        assert_eq!(
            parse_blocks("---\n***\n___"),
            vec![
                Block::HorizontalRule,
                Block::HorizontalRule,
                Block::HorizontalRule
            ]
        );
    }

    #[test]
    fn test_paragraph_stops_at_bare_dash_or_star() {
        let blocks = parse_blocks("Intro line\n-no space\n*also");
        assert_eq!(
            blocks,
            vec![paragraph("Intro line"), paragraph("-no space"), paragraph("*also")]
        );
    }

    #[test]
    fn test_paragraph_stops_at_quote_fence_and_numbered_item() {
        let blocks = parse_blocks("Intro\n> q\nMore\n```\nc\n```\nTail\n1. one");
        assert_eq!(
            blocks,
            vec![
                paragraph("Intro"),
                Block::Quote("q".to_string()),
                paragraph("More"),
                Block::CodeBlock {
                    code: "c".to_string(),
                    language: None
                },
                paragraph("Tail"),
                Block::NumberedList(items(&["one"]))
            ]
        );
    }

    #[test]
    fn test_bold_opening_line_does_not_stall() {
        let blocks = parse_blocks("**Tip:** network\nwith peers\n#hashtag");
        assert_eq!(
            blocks,
            vec![paragraph("**Tip:** network with peers"), paragraph("#hashtag")]
        );
    }

    #[test]
    fn test_paragraph_absorbs_unmarked_lines() {
        // `•` without a space and `___` inside a paragraph are plain text
        let blocks = parse_blocks("Start\n___\n•dot");
        assert_eq!(blocks, vec![paragraph("Start ___ •dot")]);
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(
            parse_blocks("# Title\r\n\r\n- a\r\n- b\r\n"),
            vec![
                Block::Header {
                    level: 1,
                    text: "Title".to_string()
                },
                Block::BulletList(items(&["a", "b"]))
            ]
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(parse_blocks("").is_empty());
        assert!(parse_blocks("\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_mixed_answer() {
        let text = "## Next steps\n\n1. Polish your resume\n2. Practice interviews\n\n> Consistency wins.\n\n---\nGood luck!";
        let blocks = parse_blocks(text);
        assert_eq!(blocks.len(), 5);
        assert_eq!(
            blocks[1],
            Block::NumberedList(items(&["Polish your resume", "Practice interviews"]))
        );
        assert_eq!(blocks[2], Block::Quote("Consistency wins.".to_string()));
        assert_eq!(blocks[3], Block::HorizontalRule);
        assert_eq!(blocks[4], paragraph("Good luck!"));
    }

    #[test]
    fn test_deterministic() {
        let text = "# A\n- b\n```rs\nfn x() {}\n```\n> q";
        assert_eq!(parse_blocks(text), parse_blocks(text));
    }
}
