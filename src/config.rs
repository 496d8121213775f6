//! Template descriptor handling.
//! Every template carries a `thing.template.yaml` at its root listing the
//! post-creation hooks and a short description.

use crate::constants::DESCRIPTOR_FILE;
use crate::error::{ThingError, ThingResult};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Parsed contents of the template descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateDescriptor {
    /// Shell commands, run in declared order after rendering
    pub hooks: Vec<String>,
    pub description: String,
}

/// Loads the descriptor from the root of a template directory.
///
/// # Errors
/// * `ThingError::MalformedDescriptor` if the file is missing, unreadable or
///   does not match the schema
pub fn load_descriptor<P: AsRef<Path>>(template_root: P) -> ThingResult<TemplateDescriptor> {
    let path = template_root.as_ref().join(DESCRIPTOR_FILE);
    debug!("Loading template descriptor from {}", path.display());

    let content = fs::read_to_string(&path).map_err(|e| malformed(&path, e))?;
    serde_yaml::from_str(&content)
        .map_err(|e| malformed(&path, e))
}

fn malformed(path: &Path, reason: impl ToString) -> ThingError {
    ThingError::MalformedDescriptor {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
