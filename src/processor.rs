//! Template file processing.
//! Walks a resolved template, substitutes the project name into every file
//! and writes the results into the new project directory.

use log::{debug, info};
use std::fs;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};
use walkdir::WalkDir;

use crate::{
    constants::{DESCRIPTOR_FILE, NAME_VARIABLE},
    error::{ThingError, ThingResult},
    renderer::TemplateRenderer,
};

/// What has to happen to produce one file of the new project.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOperation {
    /// Binary content, copied as is
    Copy { target: PathBuf },
    /// Rendered text content
    Write { target: PathBuf, content: String },
}

impl FileOperation {
    pub fn target(&self) -> &Path {
        match self {
            FileOperation::Copy { target } | FileOperation::Write { target, .. } => target,
        }
    }
}

/// Value bound to `name` inside template files: the last path segment of
/// the project name, ignoring trailing separators.
pub fn substitution_name(project_name: &str) -> String {
    let trimmed = project_name.trim_end_matches(['/', MAIN_SEPARATOR]);
    Path::new(trimmed)
        .file_name()
        .map(|segment| segment.to_string_lossy().into_owned())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Lists every file of the template, sorted by path, without the descriptor.
///
/// # Errors
/// * `ThingError::UnsupportedEntry` if the template contains a symbolic link
/// * `ThingError::WalkDirError` if the tree cannot be read
pub fn collect_template_files<P: AsRef<Path>>(template_root: P) -> ThingResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(template_root.as_ref()).sort_by_file_name() {
        let entry = entry?;
        if entry.depth() > 0 && entry.path_is_symlink() {
            return Err(ThingError::UnsupportedEntry {
                path: entry.into_path(),
            });
        }
        if !entry.file_type().is_file() || entry.file_name() == DESCRIPTOR_FILE {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

/// Maps a template file onto the project directory, keeping its relative location.
pub fn resolve_target_path(
    template_root: &Path,
    template_file: &Path,
    project_dir: &Path,
) -> PathBuf {
    let relative: PathBuf = template_file
        .strip_prefix(template_root)
        .unwrap_or(template_file)
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    project_dir.join(relative)
}

fn write_file(path: &Path, content: &[u8]) -> ThingResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn copy_file(source: &Path, dest: &Path) -> ThingResult<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)?;
    Ok(())
}

/// Renders the files of one template into one project directory.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    template_root: &'a Path,
    project_dir: &'a Path,
    context: serde_json::Value,
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        template_root: &'a Path,
        project_dir: &'a Path,
        project_name: &str,
    ) -> Self {
        let context = serde_json::json!({ NAME_VARIABLE: substitution_name(project_name) });
        Self {
            engine,
            template_root,
            project_dir,
            context,
        }
    }

    /// Works out the operation for a single template file without touching the output.
    ///
    /// # Errors
    /// * `ThingError::UnresolvedTemplate` if the file content does not fully render
    pub fn process(&self, template_file: &Path) -> ThingResult<FileOperation> {
        let target = resolve_target_path(self.template_root, template_file, self.project_dir);
        let raw = fs::read(template_file)?;

        match String::from_utf8(raw) {
            Ok(text) => match self.engine.render(&text, &self.context) {
                Ok(content) => Ok(FileOperation::Write { target, content }),
                Err(source) => Err(ThingError::UnresolvedTemplate {
                    path: template_file.to_path_buf(),
                    source,
                }),
            },
            Err(_) => {
                debug!("Copying binary file {} verbatim", template_file.display());
                Ok(FileOperation::Copy { target })
            }
        }
    }

    /// Executes an operation produced by [`Processor::process`].
    pub fn apply(&self, template_file: &Path, operation: &FileOperation) -> ThingResult<()> {
        match operation {
            FileOperation::Copy { target } => copy_file(template_file, target),
            FileOperation::Write { target, content } => write_file(target, content.as_bytes()),
        }
    }

    /// Renders every template file into the project directory.
    ///
    /// Stops at the first failure. Files written before it are left in place.
    pub fn render_all(&self) -> ThingResult<Vec<PathBuf>> {
        let files = collect_template_files(self.template_root)?;
        let listing = files
            .iter()
            .map(|f| f.display().to_string())
            .collect::<Vec<_>>();
        info!("Template files: {}", listing.join(", "));

        let mut written = Vec::with_capacity(files.len());
        for file in &files {
            let operation = self.process(file)?;
            self.apply(file, &operation)?;
            println!("Created: '{}'", operation.target().display());
            written.push(operation.target().to_path_buf());
        }
        Ok(written)
    }
}
