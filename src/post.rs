//! Defines the [`Post`] type and the logic for collecting posts from a
//! source directory. Collection is two-phase: [`discover`] enumerates and
//! orders the eligible source files, and [`Source::into_post`] reads and
//! compiles each one. The [`feed`] and [`contents`] functions assemble the
//! per-post fragments into the two strings the template merger inserts.

use crate::markdown;
use crate::slug;
use crate::util::read_text_lossy;
use std::fs::read_dir;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const MARKDOWN_EXTENSION: &str = "md";

/// Feed content for a run with no posts. The parallel English/German text
/// rides along as data attributes for client-side language toggling.
pub const EMPTY_FEED_PLACEHOLDER: &str = "<p class=\"translatable\" data-en=\"No posts yet.\" data-de=\"Noch keine Beiträge.\">No posts yet.</p>";

/// A single compiled blog post. Created once per source file and never
/// mutated afterwards.
pub struct Post {
    /// URL-safe anchor id derived from the source file stem. Not guaranteed
    /// unique: two stems can slugify identically.
    pub anchor: String,

    /// Title from the first `#` or `##` heading, or the file stem.
    pub title: String,

    /// The compiled HTML body.
    pub body: String,
}

impl Post {
    /// Renders the post's feed fragment: an anchor element followed by an
    /// article carrying the anchor as its id.
    pub fn fragment(&self) -> String {
        format!(
            "<a id='{anchor}'></a>\n<article class='post' id='{anchor}'>\n{body}\n</article>",
            anchor = self.anchor,
            body = self.body,
        )
    }

    /// Renders the post's contents-list entry, an anchor link whose visible
    /// text is the HTML-escaped title.
    pub fn contents_entry(&self) -> String {
        format!(
            "<a href='#{}'>- {}</a>",
            self.anchor,
            markdown::escape(&self.title)
        )
    }
}

/// A discovered source file, not yet read.
pub struct Source {
    /// Full path to the file.
    pub path: PathBuf,

    /// The file name, for progress reporting.
    pub file_name: String,

    /// The file name without its extension; becomes the title fallback and
    /// the anchor.
    pub stem: String,

    modified: SystemTime,
}

impl Source {
    /// Reads and compiles the source into a [`Post`]. Decoding is best
    /// effort: byte sequences that are not valid UTF-8 are replaced with
    /// U+FFFD rather than failing the run.
    pub fn into_post(self) -> io::Result<Post> {
        let raw = read_text_lossy(&self.path)?;
        let title = markdown::extract_title(&raw, &self.stem).to_owned();
        Ok(Post {
            anchor: slug::slugify(&self.stem),
            title,
            body: markdown::to_html(&raw),
        })
    }
}

/// Enumerates the eligible source files in `dir`: regular files with a
/// case-insensitive `.md` extension whose name does not begin with an
/// underscore. Results are ordered by modification time, most recent
/// first; ties break by file name so runs are deterministic across
/// platforms.
pub fn discover(dir: &Path) -> io::Result<Vec<Source>> {
    let mut sources = Vec::new();
    for result in read_dir(dir)? {
        let entry = result?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('_') {
            continue;
        }
        let path = entry.path();
        let eligible = path.extension().map_or(false, |extension| {
            extension
                .to_string_lossy()
                .eq_ignore_ascii_case(MARKDOWN_EXTENSION)
        });
        if !eligible {
            continue;
        }
        let stem = path
            .file_stem()
            .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned());
        sources.push(Source {
            modified: entry.metadata()?.modified()?,
            file_name,
            stem,
            path,
        });
    }

    sources.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });
    Ok(sources)
}

/// Joins the post fragments into the feed string, separated by horizontal
/// rules. An empty post set yields [`EMPTY_FEED_PLACEHOLDER`].
pub fn feed(posts: &[Post]) -> String {
    if posts.is_empty() {
        return EMPTY_FEED_PLACEHOLDER.to_owned();
    }
    posts
        .iter()
        .map(Post::fragment)
        .collect::<Vec<_>>()
        .join("\n<hr>\n")
}

/// Joins the contents-list entries with explicit line breaks, in feed
/// order.
pub fn contents(posts: &[Post]) -> String {
    posts
        .iter()
        .map(Post::contents_entry)
        .collect::<Vec<_>>()
        .join("<br>")
}
