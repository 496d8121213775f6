use crate::error::ThingResult;
use std::path::PathBuf;

/// Trait for loading templates from different sources.
pub trait TemplateLoader {
    /// Makes the template available locally.
    ///
    /// # Returns
    /// * `ThingResult<PathBuf>` - Directory holding the template files
    fn load(&self) -> ThingResult<PathBuf>;
}
