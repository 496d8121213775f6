//! Checks performed before the pipeline writes anything.

use crate::error::{Precondition, ThingResult};
use log::debug;
use std::path::Path;

/// Ensures the project directory is free and the template directory exists.
///
/// # Arguments
/// * `project_dir` - Directory the new project will be created in
/// * `template_root` - Resolved template directory
///
/// # Errors
/// * `ThingError::PreconditionFailed` if either condition does not hold. Nothing is
///   written in that case.
pub fn check_preconditions<P: AsRef<Path>, T: AsRef<Path>>(
    project_dir: P,
    template_root: T,
) -> ThingResult<()> {
    let project_dir = project_dir.as_ref();
    let template_root = template_root.as_ref();

    if project_dir.exists() {
        return Err(Precondition::ProjectExists(project_dir.into()).into());
    }
    if !template_root.is_dir() {
        return Err(Precondition::TemplateMissing(template_root.into()).into());
    }

    debug!(
        "Preconditions hold for '{}' from '{}'",
        project_dir.display(),
        template_root.display()
    );
    Ok(())
}
