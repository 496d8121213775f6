//! Error handling for thing.
//! Defines the error type and result alias used by every pipeline stage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reason the pipeline refused to touch the filesystem.
#[derive(Error, Debug)]
pub enum Precondition {
    #[error("project directory '{}' already exists", .0.display())]
    ProjectExists(PathBuf),

    #[error("template directory '{}' does not exist", .0.display())]
    TemplateMissing(PathBuf),
}

/// Custom error types for thing operations.
///
/// Every variant is terminal for the current invocation; nothing is retried.
#[derive(Error, Debug)]
pub enum ThingError {
    /// The template reference is neither a local directory nor `owner/repo`
    #[error("Invalid template reference '{reference}': expected a local directory or 'owner/repo'.")]
    InvalidReference { reference: String },

    /// The remote repository could not be queried or downloaded
    #[error("Repository '{repository}' not found: {reason}.")]
    RepositoryNotFound { repository: String, reason: String },

    #[error("Precondition failed: {0}.")]
    PreconditionFailed(#[from] Precondition),

    /// A template file still contains tokens that could not be substituted
    #[error("Unresolved template '{}': {source}.", path.display())]
    UnresolvedTemplate {
        path: PathBuf,
        source: minijinja::Error,
    },

    #[error("Malformed template descriptor '{}': {reason}.", path.display())]
    MalformedDescriptor { path: PathBuf, reason: String },

    /// The shell for a hook could not be started
    #[error("Failed to launch hook '{command}': {source}.")]
    HookLaunchFailure { command: String, source: io::Error },

    /// Symlinks are not followed inside templates
    #[error("Unsupported template entry '{}': symbolic links are not allowed.", path.display())]
    UnsupportedEntry { path: PathBuf },

    /// Unusable settings such as a malformed GitHub base URL
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("Failed to extract template archive: {0}.")]
    ArchiveError(#[from] zip::result::ZipError),

    #[error("Failed to read template directory: {0}.")]
    WalkDirError(#[from] walkdir::Error),

    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),
}

/// Convenience type alias for Results with [`ThingError`] as the error type.
pub type ThingResult<T> = Result<T, ThingError>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to report
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: ThingError) {
    eprintln!("{err}");
    std::process::exit(1);
}
