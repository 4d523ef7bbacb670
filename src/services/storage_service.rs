use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SlideError};
use crate::models::Slide;

/// File name of the persisted slide collection inside the data directory.
pub const SLIDES_FILE: &str = "slides.json";

const APP_DIR_NAME: &str = "HeroReel";

/// Read/replace-all access to the persisted slide collection.
///
/// The collection is always loaded and written as a whole; there is no
/// incremental update primitive.
pub trait SlideStorage {
    fn load_all(&self) -> Result<Vec<Slide>>;
    fn replace_all(&mut self, slides: &[Slide]) -> Result<()>;
}

/// Resolves the data directory, creating it if needed. An explicit directory
/// wins over the platform default.
pub fn get_app_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    let data_dir = match explicit {
        Some(dir) => dir.to_path_buf(),
        None => dirs::data_dir()
            .ok_or(SlideError::DataDirUnavailable)?
            .join(APP_DIR_NAME),
    };

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir).map_err(|e| SlideError::io(&data_dir, e))?;
    }

    Ok(data_dir)
}

/// JSON file backend: one file holding the full slide array in display order.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SLIDES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SlideStorage for FileStorage {
    fn load_all(&self) -> Result<Vec<Slide>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No slide file yet, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| SlideError::io(&self.path, e))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|source| SlideError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn replace_all(&mut self, slides: &[Slide]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| SlideError::io(dir, e))?;
            }
        }

        let content = serde_json::to_string_pretty(slides)?;

        // Write next to the target and rename so readers never see a torn file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| SlideError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| SlideError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), count = slides.len(), "Slides written");
        Ok(())
    }
}

/// In-process backend, used by tests and by callers that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slides: Vec<Slide>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slides(slides: Vec<Slide>) -> Self {
        Self { slides, writes: 0 }
    }

    /// Number of `replace_all` calls seen so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SlideStorage for MemoryStorage {
    fn load_all(&self) -> Result<Vec<Slide>> {
        Ok(self.slides.clone())
    }

    fn replace_all(&mut self, slides: &[Slide]) -> Result<()> {
        self.slides = slides.to_vec();
        self.writes += 1;
        Ok(())
    }
}
