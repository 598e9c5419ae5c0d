//! Blueprint Library - Discovery and caching of templates
//!
//! Manages the collection of blueprint templates stored in `blueprints/`.
//! Each `<name>.xml` becomes a template named `<name>`; an optional
//! `<name>.png` next to it is its preview image.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::GenericImageView;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use super::blueprint::Blueprint;
use super::template::{load_template, TemplateError};

/// Default directory where templates are stored
pub const BLUEPRINTS_DIR: &str = "blueprints";

/// Template file extension
pub const TEMPLATE_EXT: &str = "xml";

/// Preview image extension
pub const PREVIEW_EXT: &str = "png";

/// Decoded preview image metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Preview {
    /// Decode an image file and record its size
    pub fn load(path: &Path) -> Result<Self, image::ImageError> {
        let img = image::open(path)?;
        let (width, height) = img.dimensions();
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
        })
    }
}

/// A library of blueprint templates
///
/// Templates are never modified once loaded; placing one works on a copy.
#[derive(Debug, Default)]
pub struct BlueprintLibrary {
    /// Loaded templates keyed by name (file stem)
    blueprints: HashMap<String, Blueprint>,
    /// Template names in discovery order
    names: Vec<String>,
    /// Preview images keyed by template name
    previews: HashMap<String, Preview>,
    /// Directory templates are read from
    base_dir: PathBuf,
}

impl BlueprintLibrary {
    /// Create a new empty library rooted at `blueprints/`
    pub fn new() -> Self {
        Self::with_dir(BLUEPRINTS_DIR)
    }

    /// Create a library with a custom base directory
    pub fn with_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            blueprints: HashMap::new(),
            names: Vec::new(),
            previews: HashMap::new(),
            base_dir: base_dir.into(),
        }
    }

    /// Discover and load all templates from the base directory.
    ///
    /// Files are visited in filename order. A template that fails to parse is
    /// logged and skipped. Returns the number of templates loaded.
    pub fn discover(&mut self) -> Result<usize, TemplateError> {
        self.blueprints.clear();
        self.names.clear();
        self.previews.clear();

        if !self.base_dir.exists() {
            warn!("Blueprint directory {} does not exist, creating it", self.base_dir.display());
            std::fs::create_dir_all(&self.base_dir)?;
            return Ok(0);
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.base_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| has_extension(p, TEMPLATE_EXT))
            .collect();

        // Sort by filename for consistent ordering
        paths.sort();

        let pb = ProgressBar::new(paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("Loading blueprints [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        for path in paths {
            match load_template(&path) {
                Ok(blueprint) => {
                    pb.set_message(format!("{} ({} items)", blueprint.name, blueprint.len()));
                    self.load_preview(&blueprint.name);
                    self.add(blueprint);
                }
                Err(e) => {
                    warn!("Failed to load blueprint {}: {}", path.display(), e);
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!("Loaded {} blueprints from {}", self.len(), self.base_dir.display());
        Ok(self.len())
    }

    fn load_preview(&mut self, name: &str) {
        let path = self.base_dir.join(format!("{}.{}", name, PREVIEW_EXT));
        if !path.exists() {
            return;
        }
        match Preview::load(&path) {
            Ok(preview) => {
                debug!("Preview for {}: {}x{}", name, preview.width, preview.height);
                self.previews.insert(name.to_string(), preview);
            }
            Err(e) => warn!("Failed to load preview {}: {}", path.display(), e),
        }
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&Blueprint> {
        self.blueprints.get(name)
    }

    /// Preview image for a template, if one was found
    pub fn preview(&self, name: &str) -> Option<&Preview> {
        self.previews.get(name)
    }

    /// Check if a template with the given name exists
    pub fn contains(&self, name: &str) -> bool {
        self.blueprints.contains_key(name)
    }

    /// Add a template to the library
    ///
    /// If a template with the same name exists, it will be replaced.
    pub fn add(&mut self, blueprint: Blueprint) {
        let name = blueprint.name.clone();
        if !self.blueprints.contains_key(&name) {
            self.names.push(name.clone());
        }
        self.blueprints.insert(name, blueprint);
    }

    /// Get the number of templates in the library
    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    /// Check if the library is empty
    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// Iterate over template names in discovery order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    /// Iterate over all templates in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Blueprint)> {
        self.names
            .iter()
            .filter_map(|name| self.blueprints.get(name).map(|bp| (name.as_str(), bp)))
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
