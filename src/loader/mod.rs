use crate::constants::{
    CACHE_SUBDIR, DEFAULT_GITHUB_API, DEFAULT_GITHUB_URL, ENV_CACHE_DIR, ENV_GITHUB_API,
    ENV_GITHUB_URL,
};
use crate::error::ThingResult;
use crate::loader::github::{GitHubLoader, RepoRef, RepositoryHost};
use crate::loader::interface::TemplateLoader;
use crate::loader::local::LocalLoader;
use std::path::{Path, PathBuf};

pub mod github;
pub mod interface;
pub mod local;

/// Represents the source location of a template.
#[derive(Debug, PartialEq, Eq)]
pub enum TemplateSource {
    /// Local filesystem template path
    FileSystem(PathBuf),
    /// GitHub repository
    GitHub(RepoRef),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => write!(f, "local path: '{}'", path.display()),
            TemplateSource::GitHub(repo) => write!(f, "GitHub repository: '{repo}'"),
        }
    }
}

impl TemplateSource {
    /// Classifies a raw template reference.
    ///
    /// An existing directory always wins; anything else has to be `owner/repo`.
    ///
    /// # Errors
    /// * `ThingError::InvalidReference` if the reference is neither
    pub fn from_reference(reference: &str) -> ThingResult<Self> {
        let path = PathBuf::from(reference);
        if path.is_dir() {
            return Ok(Self::FileSystem(path));
        }
        RepoRef::parse(reference).map(Self::GitHub)
    }
}

/// Environment-dependent resolver settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root of the template cache, `<home>/.local/thing/templates` by default
    pub cache_root: PathBuf,
    pub api_base: String,
    pub archive_base: String,
}

impl Settings {
    /// Settings with GitHub defaults and the given cache root.
    pub fn with_cache_root<P: Into<PathBuf>>(cache_root: P) -> Self {
        Self {
            cache_root: cache_root.into(),
            api_base: DEFAULT_GITHUB_API.to_string(),
            archive_base: DEFAULT_GITHUB_URL.to_string(),
        }
    }

    /// Reads overrides from the environment, falling back to the defaults.
    ///
    /// # Errors
    /// * `ThingError::IoError` if no cache directory is configured and the home
    ///   directory cannot be determined
    pub fn from_env() -> ThingResult<Self> {
        let cache_root = match std::env::var_os(ENV_CACHE_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .ok_or_else(|| {
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "cannot determine the home directory for the template cache",
                    )
                })?
                .join(CACHE_SUBDIR),
        };

        let mut settings = Self::with_cache_root(cache_root);
        if let Ok(api) = std::env::var(ENV_GITHUB_API) {
            settings.api_base = api;
        }
        if let Ok(url) = std::env::var(ENV_GITHUB_URL) {
            settings.archive_base = url;
        }
        Ok(settings)
    }
}

/// Turns template references into local template directories.
pub struct TemplateResolver<'a> {
    host: &'a dyn RepositoryHost,
    cache_root: PathBuf,
}

impl<'a> TemplateResolver<'a> {
    pub fn new<P: Into<PathBuf>>(host: &'a dyn RepositoryHost, cache_root: P) -> Self {
        Self {
            host,
            cache_root: cache_root.into(),
        }
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Resolves `reference` into a directory holding the template files.
    ///
    /// Local directories are returned unchanged. GitHub references are
    /// downloaded into the cache on every call.
    pub fn resolve(&self, reference: &str) -> ThingResult<PathBuf> {
        let source = TemplateSource::from_reference(reference)?;
        println!("Using template from the {source}");

        let loader: Box<dyn TemplateLoader + '_> = match source {
            TemplateSource::FileSystem(path) => Box::new(LocalLoader::new(path)),
            TemplateSource::GitHub(repo) => {
                Box::new(GitHubLoader::new(self.host, repo, &self.cache_root))
            }
        };

        loader.load()
    }
}
