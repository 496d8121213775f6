use crate::error::{ThingError, ThingResult};
use crate::loader::interface::TemplateLoader;
use log::debug;
use std::path::{Path, PathBuf};

/// Loader for templates from the local filesystem.
pub struct LocalLoader<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    /// Creates a new LocalLoader instance.
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

impl<P: AsRef<Path>> TemplateLoader for LocalLoader<P> {
    /// Returns the template path unchanged. No copy, no cache.
    ///
    /// # Errors
    /// * `ThingError::InvalidReference` if the path is not a directory
    fn load(&self) -> ThingResult<PathBuf> {
        let path = self.path.as_ref();
        if !path.is_dir() {
            return Err(ThingError::InvalidReference {
                reference: path.display().to_string(),
            });
        }

        debug!("Using local template '{}'", path.display());
        Ok(path.to_path_buf())
    }
}
