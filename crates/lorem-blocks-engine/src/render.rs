//! Output for processed documents: plain source text or HTML.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::{Block, BlockKind, Document};

// Constrained emphasis: `_text_` at the start of the text or after whitespace.
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<pre>^|\s)_(?P<body>[^\s_](?:[^_]*[^\s_])?)_")
        .expect("emphasis pattern is valid")
});

/// Top-level blocks as source text, separated by blank lines.
pub fn to_text(doc: &Document) -> String {
    let mut out = doc
        .children(doc.root())
        .map(|block| block.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Top-level blocks as HTML fragments, one per line group.
pub fn to_html(doc: &Document) -> String {
    doc.children(doc.root())
        .filter_map(block_html)
        .collect::<Vec<_>>()
        .join("\n")
}

fn block_html(block: &Block) -> Option<String> {
    match block.kind {
        BlockKind::Paragraph => Some(format!(
            "<div class=\"paragraph\">\n<p>{}</p>\n</div>",
            inline_html(&block.content)
        )),
        BlockKind::Document => None,
    }
}

fn inline_html(text: &str) -> String {
    let escaped = html_escape::encode_text(text);
    EMPHASIS
        .replace_all(&escaped, "${pre}<em>${body}</em>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn doc_with(paragraphs: &[&str]) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        for text in paragraphs {
            doc.append(root, BlockKind::Paragraph, text.to_string());
        }
        doc
    }

    #[test]
    fn test_text_joins_with_blank_lines() {
        let doc = doc_with(&["one", "two\nlines"]);
        assert_eq!(to_text(&doc), "one\n\ntwo\nlines\n");
    }

    #[test]
    fn test_empty_document_renders_nothing() {
        let doc = Document::new();
        assert_eq!(to_text(&doc), "");
        assert_eq!(to_html(&doc), "");
    }

    #[test]
    fn test_html_paragraphs() {
        let doc = doc_with(&["_Lorem ipsum dolor sit amet._", "a < b & c"]);
        insta::assert_snapshot!(to_html(&doc), @r#"
        <div class="paragraph">
        <p><em>Lorem ipsum dolor sit amet.</em></p>
        </div>
        <div class="paragraph">
        <p>a &lt; b &amp; c</p>
        </div>
        "#);
    }

    #[rstest]
    #[case("_a_ and _b_", "<em>a</em> and <em>b</em>")]
    #[case("snake_case_name", "snake_case_name")]
    #[case("__", "__")]
    #[case("_ spaced _", "_ spaced _")]
    #[case("x _y_", "x <em>y</em>")]
    fn test_inline_emphasis(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(inline_html(input), expected);
    }
}
