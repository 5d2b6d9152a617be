//! # Content Provider
//!
//! Loads everything the viewer displays: blog posts, featured projects and
//! the static Home/About/Contact pages.
//!
//! ```text
//! content/
//! ├── blog/          *.md posts with a `---` header block
//! ├── pages/         home.md, about.md, contact.md (optional overrides)
//! └── projects.toml  [[project]] entries (optional)
//! ```
//!
//! Every public loader is total. I/O and parse errors are logged and replaced
//! by the built-in dataset in [`fallback`], so callers never see an error and
//! never get an empty post list.

pub mod fallback;
pub mod frontmatter;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use serde::Deserialize;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// File stem of the source file; unique within a blog directory.
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Raw markdown body (everything after the header block).
    pub body: String,
    pub date: NaiveDate,
    pub published: bool,
    pub tags: Vec<String>,
    pub read_time: String,
    pub author: String,
    /// Source file, or `None` for built-in posts.
    pub path: Option<PathBuf>,
}

impl Post {
    pub fn date_label(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectsFile {
    #[serde(default, rename = "project")]
    projects: Vec<Project>,
}

/// Markdown sources for the pages that aren't generated from data.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticPages {
    pub home: String,
    pub about: String,
    pub contact: String,
}

/// Everything a session reads. Loaded once, then shared read-only.
#[derive(Debug, Clone)]
pub struct Library {
    pub posts: Vec<Post>,
    pub projects: Vec<Project>,
    pub pages: StaticPages,
}

impl Library {
    /// The built-in dataset, with no filesystem access.
    pub fn builtin() -> Self {
        Self {
            posts: fallback::posts(),
            projects: fallback::projects(),
            pages: fallback::pages(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContentProvider {
    blog_dir: PathBuf,
    pages_dir: PathBuf,
    projects_file: PathBuf,
}

impl ContentProvider {
    /// A provider rooted at `root`, using the standard sub-layout.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            blog_dir: root.join("blog"),
            pages_dir: root.join("pages"),
            projects_file: root.join("projects.toml"),
        }
    }

    pub fn with_blog_dir(mut self, blog_dir: impl Into<PathBuf>) -> Self {
        self.blog_dir = blog_dir.into();
        self
    }

    pub fn load(&self) -> Library {
        let library = Library {
            posts: self.list_posts(),
            projects: self.list_projects(),
            pages: self.load_pages(),
        };
        info!(
            "Content loaded: {} posts, {} projects",
            library.posts.len(),
            library.projects.len()
        );
        library
    }

    /// Published posts, newest first. Ties keep file-name order.
    pub fn list_posts(&self) -> Vec<Post> {
        let paths = match markdown_files(&self.blog_dir) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(
                    "Blog directory {} unavailable ({}), using built-in posts",
                    self.blog_dir.display(),
                    e
                );
                return fallback::posts();
            }
        };

        let mut posts: Vec<Post> = paths
            .iter()
            .filter_map(|path| match read_post(path) {
                Ok(post) => Some(post),
                Err(e) => {
                    warn!("Skipping post {}: {}", path.display(), e);
                    None
                }
            })
            .filter(|post| {
                if !post.published {
                    debug!("Post {} is unpublished", post.id);
                }
                post.published
            })
            .collect();

        // sort_by is stable, so equal dates keep their directory order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        if posts.is_empty() {
            warn!(
                "No published posts in {}, using built-in posts",
                self.blog_dir.display()
            );
            return fallback::posts();
        }
        posts
    }

    pub fn list_projects(&self) -> Vec<Project> {
        let contents = match fs::read_to_string(&self.projects_file) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(
                    "No projects file at {} ({}), using built-in projects",
                    self.projects_file.display(),
                    e
                );
                return fallback::projects();
            }
        };

        match toml::from_str::<ProjectsFile>(&contents) {
            Ok(file) if !file.projects.is_empty() => file.projects,
            Ok(_) => {
                warn!(
                    "{} lists no projects, using built-in projects",
                    self.projects_file.display()
                );
                fallback::projects()
            }
            Err(e) => {
                warn!(
                    "Failed to parse {}: {}, using built-in projects",
                    self.projects_file.display(),
                    e
                );
                fallback::projects()
            }
        }
    }

    pub fn load_pages(&self) -> StaticPages {
        StaticPages {
            home: self.page_or("home.md", fallback::HOME),
            about: self.page_or("about.md", fallback::ABOUT),
            contact: self.page_or("contact.md", fallback::CONTACT),
        }
    }

    fn page_or(&self, name: &str, default: &str) -> String {
        let path = self.pages_dir.join(name);
        match fs::read_to_string(&path) {
            Ok(contents) if !contents.trim().is_empty() => contents,
            Ok(_) => {
                warn!("Page {} is empty, using built-in page", path.display());
                default.to_string()
            }
            Err(_) => default.to_string(),
        }
    }
}

/// `.md` files directly inside `dir`, sorted by file name.
fn markdown_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[derive(Debug)]
pub enum PostError {
    Io(std::io::Error),
    FrontMatter(frontmatter::FrontMatterError),
}

impl std::fmt::Display for PostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostError::Io(e) => write!(f, "read error: {e}"),
            PostError::FrontMatter(e) => write!(f, "header error: {e}"),
        }
    }
}

impl std::error::Error for PostError {}

/// Read and parse one post file.
pub fn read_post(path: &Path) -> Result<Post, PostError> {
    let source = fs::read_to_string(path).map_err(PostError::Io)?;
    let (fm, body) = frontmatter::parse(&source).map_err(PostError::FrontMatter)?;

    let date = NaiveDate::parse_from_str(fm.date.trim(), DATE_FORMAT).unwrap_or_else(|_| {
        debug!("Post {} has no valid date, using today", path.display());
        Local::now().date_naive()
    });
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Post {
        id,
        title: fm.title,
        summary: fm.summary,
        body,
        date,
        published: fm.published,
        tags: fm.tags,
        read_time: fm.read_time,
        author: fm.author,
        path: Some(path.to_path_buf()),
    })
}
