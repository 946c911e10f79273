//! The library code for the `blogstitch` blog page generator. The
//! architecture can be generally broken down into two distinct steps:
//!
//! 1. Collecting posts from Markdown source files on disk ([`crate::post`]),
//!    compiling each body into an HTML fragment ([`crate::markdown`])
//! 2. Merging the compiled feed and the contents list into an HTML template
//!    and writing the result to disk ([`crate::template`], [`crate::build`])
//!
//! Of the two, the first step carries the interesting logic: the Markdown
//! compiler is a fixed sequence of regex-driven transforms over a small
//! dialect (headings, fenced code blocks, paragraphs, and bare URLs) rather
//! than a full Markdown implementation. The second step is a prioritized
//! marker-matching strategy: the feed and the contents list are each
//! inserted at the first matching location in the template (a literal
//! marker token, then structural fallbacks), leaving every other template
//! byte untouched.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod markdown;
pub mod post;
pub mod slug;
pub mod template;
pub mod util;
