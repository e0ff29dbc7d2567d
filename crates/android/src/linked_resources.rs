//! Eclipse linked-resource discovery
//!
//! Checkouts made without symlink support store each link as a plain file.
//! Folder links end up as extension-less files, and links to Java sources
//! keep their `.java` name but start with the `!<symlink>` marker. This
//! module finds both kinds under a source tree and renders the
//! `<linkedResources>` block Eclipse expects in its `.project` file.

use droidres_core::config::LinksConfig;
use droidres_core::error::{Error, Result, ResultExt};
use droidres_core::xml::escape_text;
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Eclipse link type, as written in `<type>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Link to a single file
    File = 1,
    /// Link to a folder
    Folder = 2,
}

impl LinkType {
    /// Numeric value used by Eclipse
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A discovered link stand-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedResource {
    /// Path relative to the project root, `/`-separated
    pub name: String,
    /// Kind of link
    pub link_type: LinkType,
    /// Absolute path on disk
    pub location: PathBuf,
}

/// Scanner settings
#[derive(Debug, Clone)]
pub struct LinkOptions {
    /// Directory under the root to walk
    pub source_dir: PathBuf,
    /// Leading bytes that mark a `.java` file as a link
    pub marker: String,
    /// Glob patterns (matched against the relative name) to skip
    pub exclude: Vec<String>,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self::from(&LinksConfig::default())
    }
}

impl From<&LinksConfig> for LinkOptions {
    fn from(config: &LinksConfig) -> Self {
        Self {
            source_dir: droidres_core::config::expand_path(&config.source_dir),
            marker: config.marker.clone(),
            exclude: config.exclude.clone(),
        }
    }
}

/// Walks a source tree looking for link stand-ins
pub struct LinkScanner {
    root: PathBuf,
    source_dir: PathBuf,
    marker: Vec<u8>,
    exclude_patterns: Vec<String>,
}

impl LinkScanner {
    /// Create a scanner for the project at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let defaults = LinkOptions::default();
        Self {
            root: root.into(),
            source_dir: defaults.source_dir,
            marker: defaults.marker.into_bytes(),
            exclude_patterns: defaults.exclude,
        }
    }

    /// Apply every setting from `options`
    pub fn with_options(self, options: &LinkOptions) -> Self {
        self.source_dir(&options.source_dir)
            .marker(&options.marker)
            .exclude(&options.exclude)
    }

    /// Directory to walk, relative to the root
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Marker identifying `.java` link stand-ins
    pub fn marker(mut self, marker: &str) -> Self {
        self.marker = marker.as_bytes().to_vec();
        self
    }

    /// Add glob patterns to exclude
    pub fn exclude<S: AsRef<str>>(mut self, patterns: &[S]) -> Self {
        self.exclude_patterns
            .extend(patterns.iter().map(|p| p.as_ref().to_string()));
        self
    }

    /// Walk the tree and return links in file-name order
    pub fn scan(&self) -> Result<Vec<LinkedResource>> {
        let root = std::path::absolute(&self.root)
            .map_err(Error::from)
            .context(format!("Resolving {}", self.root.display()))?;
        let start = root.join(&self.source_dir);
        if !start.starts_with(&root)
            || self.source_dir.components().any(|c| c == Component::ParentDir)
        {
            return Err(Error::config_invalid(
                "links.source_dir",
                format!("{} is outside the project root", self.source_dir.display()),
            ));
        }
        if !start.is_dir() {
            return Err(Error::directory_not_found(&start));
        }

        let excludes = self
            .exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(start = %start.display(), "scanning for linked resources");

        let mut links = Vec::new();
        let walker = WalkDir::new(&start)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_excluded(e, &root, &excludes));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let Some(path) = dangling_link(&err) else {
                        return Err(err.into());
                    };
                    let name = relative_name(path, &root);
                    if excludes.iter().any(|p| p.matches(&name)) {
                        continue;
                    }
                    if let Some(link) = classify_dangling(path, name) {
                        links.push(link);
                    }
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(link_type) = classify(path, &self.marker)? else {
                trace!(path = %path.display(), "not a link");
                continue;
            };

            let name = relative_name(path, &root);
            debug!(%name, %link_type, "found linked resource");
            links.push(LinkedResource {
                name,
                link_type,
                location: path.to_path_buf(),
            });
        }

        Ok(links)
    }
}

fn is_excluded(entry: &DirEntry, root: &Path, excludes: &[glob::Pattern]) -> bool {
    if excludes.is_empty() {
        return false;
    }
    let name = relative_name(entry.path(), root);
    excludes.iter().any(|p| p.matches(&name))
}

/// Path of a symlink whose target is missing, if that is what `err` reports
fn dangling_link(err: &walkdir::Error) -> Option<&Path> {
    let path = err.path()?;
    if err.io_error()?.kind() != io::ErrorKind::NotFound {
        return None;
    }
    fs::symlink_metadata(path)
        .ok()
        .filter(|m| m.file_type().is_symlink())
        .map(|_| path)
}

/// Classify a dangling symlink by name alone.
///
/// Extension-less links become folder links. A `.java` link can't be read
/// for its marker, so it is skipped with a warning.
fn classify_dangling(path: &Path, name: String) -> Option<LinkedResource> {
    match path.extension() {
        None => {
            debug!(%name, "found dangling folder link");
            Some(LinkedResource {
                name,
                link_type: LinkType::Folder,
                location: path.to_path_buf(),
            })
        }
        Some(ext) if ext == "java" => {
            warn!(%name, "skipping dangling .java symlink");
            None
        }
        Some(_) => {
            trace!(%name, "dangling symlink is not a link stand-in");
            None
        }
    }
}

/// Decide whether a regular file is a link stand-in
pub fn classify(path: &Path, marker: &[u8]) -> Result<Option<LinkType>> {
    match path.extension() {
        None => Ok(Some(LinkType::Folder)),
        Some(ext) if ext == "java" => {
            if starts_with_marker(path, marker)? {
                Ok(Some(LinkType::File))
            } else {
                Ok(None)
            }
        }
        Some(_) => Ok(None),
    }
}

fn starts_with_marker(path: &Path, marker: &[u8]) -> Result<bool> {
    let mut head = Vec::with_capacity(marker.len());
    File::open(path)
        .and_then(|f| f.take(marker.len() as u64).read_to_end(&mut head))
        .map_err(Error::from)
        .context(format!("Reading {}", path.display()))?;
    Ok(head == marker)
}

fn relative_name(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Render the `<linkedResources>` block
pub fn render_linked_resources(links: &[LinkedResource]) -> String {
    let mut out = String::from("<linkedResources>\n");
    for link in links {
        let location = link.location.to_string_lossy();
        let _ = write!(
            out,
            "\t<link>\n\t\t<name>{}</name>\n\t\t<type>{}</type>\n\t\t<location>{}</location>\n\t</link>\n",
            escape_text(&link.name),
            link.link_type,
            escape_text(&location),
        );
    }
    out.push_str("</linkedResources>\n");
    out
}

/// Outcome of a descriptor generation
#[derive(Debug, Clone, Serialize)]
pub struct LinkSummary {
    /// Descriptor written
    pub output: PathBuf,
    /// Links to single files
    pub files: usize,
    /// Links to folders
    pub folders: usize,
    /// Every link found
    pub links: Vec<LinkedResource>,
}

impl LinkSummary {
    fn new(output: &Path, links: Vec<LinkedResource>) -> Self {
        let files = links.iter().filter(|l| l.link_type == LinkType::File).count();
        Self {
            output: output.to_path_buf(),
            files,
            folders: links.len() - files,
            links,
        }
    }

    /// Total number of links
    pub fn total(&self) -> usize {
        self.links.len()
    }
}

/// Scan `root` and write the descriptor to `output`
pub fn generate(root: &Path, output: &Path, options: &LinkOptions) -> Result<LinkSummary> {
    let links = LinkScanner::new(root).with_options(options).scan()?;
    let xml = render_linked_resources(&links);

    fs::write(output, xml)
        .map_err(Error::from)
        .context(format!("Writing {}", output.display()))?;

    let summary = LinkSummary::new(output, links);
    info!(
        output = %output.display(),
        files = summary.files,
        folders = summary.folders,
        "wrote linked resources"
    );
    Ok(summary)
}
