//! Defines [`slugify`], which derives URL-safe anchor ids from file name
//! stems.

use regex::Regex;
use std::sync::LazyLock;

/// Matches runs of characters that may not appear in an anchor id.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\-]+").unwrap());

/// Derives a lowercase anchor id from `name`: every run of characters other
/// than word characters and hyphens collapses to a single hyphen, and
/// leading and trailing hyphens are stripped. Returns `"post"` when nothing
/// survives.
///
/// Two distinct names can slugify identically; callers must tolerate
/// duplicate anchors.
pub fn slugify(name: &str) -> String {
    let slug = NON_WORD.replace_all(name, "-");
    let slug = slug.trim_matches('-').to_lowercase();
    if slug.is_empty() {
        String::from("post")
    } else {
        slug
    }
}
