//! The Markdown compiler and title extractor. This is deliberately not a
//! CommonMark implementation: post bodies use a small dialect (headings,
//! fenced code blocks, paragraphs, and bare URLs), and the compiler is a
//! fixed sequence of regex-driven text transforms. No lists, tables,
//! emphasis, inline code spans, images, or reference links.
//!
//! Processing order matters. Fenced code blocks are compiled first and
//! become finished fragments that no later step touches, so `#` characters,
//! blank lines, and URLs inside a fence survive byte-for-byte (modulo HTML
//! escaping). The text between fences then goes through heading
//! replacement, autolinking, blank-line block splitting, and paragraph
//! wrapping.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a fenced code block: three backticks, an optional language tag,
/// the enclosed text, and the first closing fence (non-greedy).
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(\w*)\n(.*?)\n```").unwrap());

/// Heading lines, matched per line and left-anchored. Output levels are
/// offset by one from Markdown convention so post headings nest under a
/// level-1 page title and level-2 post titles.
static H3: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^###\s*(.+)$").unwrap());
static H2: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##\s*(.+)$").unwrap());
static H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s*(.+)$").unwrap());

/// A bare URL: `http://` or `https://` up to the next whitespace or `<`.
static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<]+").unwrap());

/// One or more blank lines, allowing stray whitespace on the blank lines.
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// A block that already starts with a recognized block-level tag and must
/// pass through without a paragraph wrapper.
static BLOCK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^<(h\d|pre|ul|ol|blockquote|p|div)").unwrap());

/// Title headings require whitespace between the hashes and the text,
/// unlike heading compilation.
static TITLE_H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());
static TITLE_H2: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##\s+(.+)$").unwrap());

/// Escapes `&`, angle brackets, and both quote characters for embedding in
/// HTML text or attribute values. The ampersand goes first so escapes are
/// not themselves re-escaped.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Compiles raw Markdown into an HTML fragment. Empty or blank input
/// yields an empty string, not an empty paragraph.
pub fn to_html(markdown: &str) -> String {
    let source = markdown.replace("\r\n", "\n").replace('\r', "\n");

    let mut blocks: Vec<String> = Vec::new();
    let mut tail = 0;
    for caps in CODE_FENCE.captures_iter(&source) {
        let whole = caps.get(0).unwrap(); // group 0 always exists
        push_text_blocks(&source[tail..whole.start()], &mut blocks);
        blocks.push(code_block(&caps[1], &caps[2]));
        tail = whole.end();
    }
    push_text_blocks(&source[tail..], &mut blocks);

    blocks.join("\n\n")
}

/// Compiles a single fenced code block into its finished fragment. A fence
/// with no language tag omits the class attribute entirely.
fn code_block(lang: &str, code: &str) -> String {
    let lang = lang.trim();
    let code = escape(code);
    if lang.is_empty() {
        format!("<pre><code>{}</code></pre>", code)
    } else {
        format!(
            "<pre><code class='language-{}'>{}</code></pre>",
            escape(lang),
            code
        )
    }
}

/// Runs the line-oriented steps over a stretch of text between code fences
/// and appends the surviving blocks: heading replacement, autolinking,
/// blank-line splitting, then paragraph wrapping for anything that does not
/// already start with a block-level tag.
fn push_text_blocks(text: &str, blocks: &mut Vec<String>) {
    if text.is_empty() {
        return;
    }
    let text = H3.replace_all(text, "<h4>$1</h4>");
    let text = H2.replace_all(&text, "<h3>$1</h3>");
    let text = H1.replace_all(&text, "<h2>$1</h2>");
    let text = BARE_URL.replace_all(&text, "<a href='$0'>$0</a>");

    for block in BLANK_LINES.split(&text) {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        if BLOCK_TAG.is_match(block) {
            blocks.push(block.to_owned());
        } else {
            blocks.push(format!("<p>{}</p>", block.replace('\n', "<br>")));
        }
    }
}

/// Finds a title in raw Markdown: the first level-1 heading anywhere in the
/// text wins, then the first level-2 heading anywhere, then `fallback`.
pub fn extract_title<'a>(markdown: &'a str, fallback: &'a str) -> &'a str {
    for pattern in [&TITLE_H1, &TITLE_H2] {
        if let Some(m) = pattern.captures(markdown).and_then(|caps| caps.get(1)) {
            return m.as_str().trim();
        }
    }
    fallback
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_heading_levels_offset_by_one() {
        assert_eq!(to_html("# One"), "<h2>One</h2>");
        assert_eq!(to_html("## Two"), "<h3>Two</h3>");
        assert_eq!(to_html("### Three"), "<h4>Three</h4>");
    }

    #[test]
    fn test_paragraph_with_line_breaks() {
        assert_eq!(to_html("first\nsecond\n\nthird"), "<p>first<br>second</p>\n\n<p>third</p>");
    }

    #[test]
    fn test_blank_input_yields_empty_output() {
        assert_eq!(to_html(""), "");
        assert_eq!(to_html("  \n\n  \n"), "");
    }

    #[test]
    fn test_crlf_normalization() {
        assert_eq!(to_html("first\r\nsecond\r\rthird"), "<p>first<br>second</p>\n\n<p>third</p>");
    }

    #[test]
    fn test_autolink_bare_urls() {
        assert_eq!(
            to_html("see https://example.com/x for more"),
            "<p>see <a href='https://example.com/x'>https://example.com/x</a> for more</p>"
        );
    }

    #[test]
    fn test_autolink_stops_at_angle_bracket() {
        assert_eq!(
            to_html("http://a.example<b>"),
            "<p><a href='http://a.example'>http://a.example</a><b></p>"
        );
    }

    #[test]
    fn test_code_fence_with_language() {
        assert_eq!(
            to_html("```python\nprint(1)\n```"),
            "<pre><code class='language-python'>print(1)</code></pre>"
        );
    }

    #[test]
    fn test_code_fence_without_language_has_no_class() {
        assert_eq!(
            to_html("```\nx < y && y > z\n```"),
            "<pre><code>x &lt; y &amp;&amp; y &gt; z</code></pre>"
        );
    }

    #[test]
    fn test_code_fence_content_is_not_reprocessed() {
        assert_eq!(
            to_html("```\n# not a heading\n\nhttps://example.com\n```"),
            "<pre><code># not a heading\n\nhttps://example.com</code></pre>"
        );
    }

    #[test]
    fn test_code_fence_between_paragraphs() {
        assert_eq!(
            to_html("intro\n\n```rust\nlet x = 1;\n```\n\noutro"),
            "<p>intro</p>\n\n<pre><code class='language-rust'>let x = 1;</code></pre>\n\n<p>outro</p>"
        );
    }

    #[test]
    fn test_code_escaping_round_trips() {
        let code = "if a < b && c > \"d\" { '&' }";
        let html = to_html(&format!("```\n{}\n```", code));
        let inner = html
            .strip_prefix("<pre><code>")
            .and_then(|rest| rest.strip_suffix("</code></pre>"))
            .unwrap();
        let unescaped = inner
            .replace("&#x27;", "'")
            .replace("&quot;", "\"")
            .replace("&gt;", ">")
            .replace("&lt;", "<")
            .replace("&amp;", "&");
        assert_eq!(unescaped, code);
    }

    #[test]
    fn test_block_level_html_passes_through() {
        assert_eq!(to_html("<blockquote>said</blockquote>"), "<blockquote>said</blockquote>");
        assert_eq!(to_html("<UL><li>a</li></UL>"), "<UL><li>a</li></UL>");
    }

    #[test]
    fn test_title_level_1_anywhere_beats_earlier_level_2() {
        let markdown = "## Subheading\n\nintro text\n\n# Main Title\n";
        assert_eq!(extract_title(markdown, "fallback"), "Main Title");
    }

    #[test]
    fn test_title_level_2_fallback() {
        assert_eq!(extract_title("## Only Sub\ntext", "fallback"), "Only Sub");
    }

    #[test]
    fn test_title_fallback_without_headings() {
        assert_eq!(extract_title("no headings here", "stem-name"), "stem-name");
    }

    #[test]
    fn test_title_is_trimmed() {
        assert_eq!(extract_title("#   Spaced Out   ", "fallback"), "Spaced Out");
    }
}
