//! Configuration for a blogstitch project: where the Markdown sources
//! live, which HTML template to merge into, and where the output document
//! goes. Paths are resolved from defaults, an optional `blogstitch.yaml`
//! project file in the project root, and command-line overrides; relative
//! paths resolve against the root.

use crate::util::open;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The project file name looked up in the project root.
pub const PROJECT_FILE: &str = "blogstitch.yaml";

fn default_posts_directory() -> PathBuf {
    PathBuf::from("blogs")
}

fn default_template() -> PathBuf {
    PathBuf::from("blog_template.html")
}

fn default_output() -> PathBuf {
    PathBuf::from("blogs.html")
}

/// The on-disk project file. Every field is optional; omitted fields take
/// their defaults.
#[derive(Deserialize)]
struct Project {
    #[serde(default = "default_posts_directory")]
    posts_directory: PathBuf,

    #[serde(default = "default_template")]
    template: PathBuf,

    #[serde(default = "default_output")]
    output: PathBuf,
}

impl Default for Project {
    fn default() -> Self {
        Project {
            posts_directory: default_posts_directory(),
            template: default_template(),
            output: default_output(),
        }
    }
}

/// Resolved configuration handed to [`crate::build::build_site`].
pub struct Config {
    /// Directory of Markdown post sources.
    pub posts_directory: PathBuf,

    /// The HTML template the generated feed and contents list are merged
    /// into.
    pub template_path: PathBuf,

    /// The output document, overwritten in full on a successful run.
    pub output_path: PathBuf,
}

impl Config {
    /// Loads the configuration for the project rooted at `root`, reading
    /// `blogstitch.yaml` if present and falling back to the defaults
    /// otherwise.
    pub fn from_directory(root: &Path) -> Result<Config> {
        let path = root.join(PROJECT_FILE);
        let project = if path.exists() {
            match serde_yaml::from_reader(open(&path, "project")?) {
                Ok(project) => project,
                Err(e) => {
                    return Err(anyhow!(
                        "Loading configuration from `{}`: {}",
                        path.display(),
                        e
                    ))
                }
            }
        } else {
            Project::default()
        };
        Ok(Config {
            posts_directory: root.join(project.posts_directory),
            template_path: root.join(project.template),
            output_path: root.join(project.output),
        })
    }
}
