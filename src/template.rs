//! The template merger. Inserts the compiled feed and the contents list
//! into an HTML template, each at the first matching location in a fixed
//! priority order: a literal marker token, then structural fallbacks. No
//! other template byte is altered, and the result is not validated as
//! well-formed HTML.

use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// Literal insertion point for the post feed.
pub const FEED_MARKER: &str = "###BLOGS###";

/// Literal insertion point for the contents list.
pub const CONTENTS_MARKER: &str = "###BLOG-CONTENTS###";

/// A paired feed region delimited by start/end comment markers, non-greedy
/// so only the first region is replaced.
static FEED_REGION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!-- BLOGS-START -->[\s\S]*?<!-- BLOGS-END -->").unwrap()
});

/// The first `<nav>` element: opening tag, interior, closing tag.
static NAV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(<nav\b[^>]*>)(.*?)(</nav>)").unwrap());

const MAIN_CLOSE: &str = "</main>";

/// Applies feed insertion then contents insertion.
pub fn merge(template: &str, feed: &str, contents: &str) -> String {
    insert_contents(&insert_feed(template, feed), contents)
}

/// Inserts the feed into the template at the first matching strategy:
///
/// 1. the first occurrence of [`FEED_MARKER`];
/// 2. the first paired `<!-- BLOGS-START -->`/`<!-- BLOGS-END -->` region,
///    replaced inclusive of the markers, which are regenerated around the
///    new feed;
/// 3. immediately before the first closing `</main>` tag;
/// 4. appended to the end of the template after a blank line.
pub fn insert_feed(template: &str, feed: &str) -> String {
    if template.contains(FEED_MARKER) {
        return template.replacen(FEED_MARKER, feed, 1);
    }
    if FEED_REGION.is_match(template) {
        let region = format!("<!-- BLOGS-START -->\n{}\n<!-- BLOGS-END -->", feed);
        return FEED_REGION.replace(template, NoExpand(&region)).into_owned();
    }
    if template.contains(MAIN_CLOSE) {
        return template.replacen(MAIN_CLOSE, &format!("{}\n{}", feed, MAIN_CLOSE), 1);
    }
    format!("{}\n\n{}", template, feed)
}

/// Inserts the contents list into the document at the first matching
/// strategy:
///
/// 1. the first occurrence of [`CONTENTS_MARKER`];
/// 2. as the first content of the first `<nav>` element, immediately after
///    its opening tag, with the rest of the element untouched;
/// 3. prepended to the front of the document before a blank line.
pub fn insert_contents(document: &str, contents: &str) -> String {
    if document.contains(CONTENTS_MARKER) {
        return document.replacen(CONTENTS_MARKER, contents, 1);
    }
    if let Some(caps) = NAV.captures(document) {
        let whole = caps.get(0).unwrap(); // group 0 always exists
        let mut merged = String::with_capacity(document.len() + contents.len() + 2);
        merged.push_str(&document[..whole.start()]);
        merged.push_str(&caps[1]);
        merged.push('\n');
        merged.push_str(contents);
        merged.push('\n');
        merged.push_str(&caps[2]);
        merged.push_str(&caps[3]);
        merged.push_str(&document[whole.end()..]);
        return merged;
    }
    format!("{}\n\n{}", contents, document)
}
