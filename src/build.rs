//! Exports the [`build_site`] function which stitches together the
//! high-level steps of generating the output page: collecting and compiling
//! posts ([`crate::post`]), merging the feed and the contents list into the
//! template ([`crate::template`]), and writing the output document.

use crate::config::Config;
use crate::post;
use crate::template;
use crate::util::read_text_lossy;
use std::fmt;
use std::path::PathBuf;

/// Builds the output page from a [`Config`] object. This calls into
/// [`post::discover`], [`post::Source::into_post`], and [`template::merge`]
/// which do the heavy lifting, and reports progress on stdout along the
/// way.
///
/// The two fatal configuration errors (missing posts directory, missing
/// template file) abort the run before the output file is opened, so a
/// failed run leaves any previous output untouched.
pub fn build_site(config: &Config) -> Result<()> {
    if !config.posts_directory.is_dir() {
        return Err(Error::MissingPostsDirectory(config.posts_directory.clone()));
    }

    let sources = post::discover(&config.posts_directory)?;
    if sources.is_empty() {
        println!(
            "No markdown files found in {} — will write template with no posts.",
            config.posts_directory.display()
        );
    } else {
        println!("Found markdown files:");
        let mut names: Vec<&str> = sources.iter().map(|s| s.file_name.as_str()).collect();
        names.sort_unstable();
        for name in names {
            println!(" - {}", name);
        }
    }

    // Compile every post before touching the template or the output file.
    let mut posts = Vec::with_capacity(sources.len());
    for source in sources {
        let file_name = source.file_name.clone();
        let post = source.into_post()?;
        println!("Added: {} -> anchor #{}", file_name, post.anchor);
        posts.push(post);
    }

    let feed = post::feed(&posts);
    let contents = post::contents(&posts);

    if !config.template_path.is_file() {
        return Err(Error::MissingTemplate(config.template_path.clone()));
    }
    let template = read_text_lossy(&config.template_path)?;

    let document = template::merge(&template, &feed, &contents);
    std::fs::write(&config.output_path, document)?;

    println!(
        "Wrote {} with {} posts.",
        config.output_path.display(),
        posts.len()
    );
    if !posts.is_empty() {
        let anchors: Vec<&str> = posts.iter().map(|p| p.anchor.as_str()).collect();
        println!("Generated anchors: {}", anchors.join(", "));
    }

    Ok(())
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building the output page. The fatal configuration
/// errors get their own variants so the operator sees which input is
/// missing; everything else is I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned when the posts source directory does not exist.
    MissingPostsDirectory(PathBuf),

    /// Returned when the template file does not exist.
    MissingTemplate(PathBuf),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingPostsDirectory(path) => {
                write!(f, "blogs directory not found: {}", path.display())
            }
            Error::MissingTemplate(path) => {
                write!(f, "Template file not found: {}", path.display())
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingPostsDirectory(_) => None,
            Error::MissingTemplate(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator for fallible I/O operations.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn test_config(root: &Path) -> Config {
        Config {
            posts_directory: root.join("blogs"),
            template_path: root.join("blog_template.html"),
            output_path: root.join("blogs.html"),
        }
    }

    #[test]
    fn test_build_site_end_to_end() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("blogs"))?;
        fs::write(dir.path().join("blogs/hello.md"), "# Hello\n\nWorld\n")?;
        fs::write(
            dir.path().join("blog_template.html"),
            "<html>\n<nav>###BLOG-CONTENTS###</nav>\n<main>\n###BLOGS###\n</main>\n</html>",
        )?;

        build_site(&test_config(dir.path()))?;

        let out = fs::read_to_string(dir.path().join("blogs.html"))?;
        assert!(out.contains("<nav><a href='#hello'>- Hello</a></nav>"));
        assert!(out.contains(
            "<a id='hello'></a>\n<article class='post' id='hello'>\n\
             <h2>Hello</h2>\n\n<p>World</p>\n</article>"
        ));
        assert!(!out.contains("###BLOGS###"));
        assert!(!out.contains("###BLOG-CONTENTS###"));
        Ok(())
    }

    #[test]
    fn test_missing_posts_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blog_template.html"), "###BLOGS###").unwrap();

        let err = build_site(&test_config(dir.path())).unwrap_err();
        assert!(matches!(err, Error::MissingPostsDirectory(_)));
        assert!(!dir.path().join("blogs.html").exists());
    }

    #[test]
    fn test_missing_template_is_fatal_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("blogs")).unwrap();
        fs::write(dir.path().join("blogs/a.md"), "# A").unwrap();

        let err = build_site(&test_config(dir.path())).unwrap_err();
        assert!(matches!(err, Error::MissingTemplate(_)));
        assert!(!dir.path().join("blogs.html").exists());
    }

    #[test]
    fn test_empty_post_set_writes_placeholder() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("blogs"))?;
        fs::write(dir.path().join("blogs/_draft.md"), "# Draft")?;
        fs::write(
            dir.path().join("blog_template.html"),
            "<main>\n###BLOGS###\n</main>",
        )?;

        build_site(&test_config(dir.path()))?;

        let out = fs::read_to_string(dir.path().join("blogs.html"))?;
        assert!(out.contains(post::EMPTY_FEED_PLACEHOLDER));
        assert!(!out.contains("Draft"));
        Ok(())
    }

    #[test]
    fn test_posts_ordered_newest_first_in_feed() -> Result<()> {
        use std::time::{Duration, SystemTime};

        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("blogs"))?;
        let base = SystemTime::now() - Duration::from_secs(3600);
        for (name, age) in &[("older.md", 600u64), ("newer.md", 0)] {
            let path = dir.path().join("blogs").join(name);
            fs::write(&path, "body")?;
            let file = fs::OpenOptions::new().write(true).open(&path)?;
            file.set_modified(base - Duration::from_secs(*age))?;
        }
        fs::write(dir.path().join("blog_template.html"), "###BLOGS###")?;

        build_site(&test_config(dir.path()))?;

        let out = fs::read_to_string(dir.path().join("blogs.html"))?;
        let newer = out.find("id='newer'").unwrap();
        let older = out.find("id='older'").unwrap();
        assert!(newer < older);
        Ok(())
    }
}
