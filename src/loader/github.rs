//! Templates hosted on GitHub.
//! The default branch is downloaded as a zip archive and extracted into a
//! per-repository cache directory, replacing whatever was cached before.

use crate::constants::USER_AGENT;
use crate::error::{ThingError, ThingResult};
use crate::loader::interface::TemplateLoader;
use crate::loader::Settings;
use log::debug;
use regex::Regex;
use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static REPO_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("valid segment pattern"));

/// A GitHub repository named as `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl RepoRef {
    /// Parses `owner/repo`. Any other shape is an `ThingError::InvalidReference`.
    pub fn parse(reference: &str) -> ThingResult<Self> {
        let invalid = || ThingError::InvalidReference {
            reference: reference.to_string(),
        };

        let (owner, repo) = reference.split_once('/').ok_or_else(invalid)?;
        let valid_segment = |s: &str| REPO_SEGMENT.is_match(s) && s != "." && s != "..";
        if !valid_segment(owner) || !valid_segment(repo) {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Name of the top-level folder inside a GitHub branch archive.
    pub fn archive_folder(&self, branch: &str) -> String {
        format!("{}-{}", self.repo, branch.replace('/', "-"))
    }
}

/// Repository metadata as returned by the GitHub API. Only the part we read.
#[derive(Debug, Deserialize)]
pub struct RepositoryMetadata {
    pub default_branch: Option<String>,
}

/// Remote side of the resolver: branch lookup and archive download.
pub trait RepositoryHost {
    /// Name of the repository's default branch.
    ///
    /// # Errors
    /// * `ThingError::RepositoryNotFound` if the lookup fails or there is no default branch
    fn default_branch(&self, repo: &RepoRef) -> ThingResult<String>;

    /// Raw zip archive of `branch`.
    fn download_archive(&self, repo: &RepoRef, branch: &str) -> ThingResult<Vec<u8>>;
}

/// [`RepositoryHost`] talking to GitHub over HTTPS.
pub struct GitHubHost {
    client: reqwest::blocking::Client,
    api_base: Url,
    archive_base: Url,
}

fn not_found(repo: &RepoRef, reason: impl ToString) -> ThingError {
    ThingError::RepositoryNotFound {
        repository: repo.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_base(base: &str) -> ThingResult<Url> {
    let url = Url::parse(base)
        .map_err(|e| ThingError::ConfigError(format!("invalid base URL '{base}': {e}")))?;
    if url.cannot_be_a_base() {
        let message = format!("base URL '{base}' cannot hold a path");
        return Err(ThingError::ConfigError(message));
    }
    Ok(url)
}

/// Appends escaped path segments to `base`.
fn join_segments<'s>(base: &Url, segments: impl IntoIterator<Item = &'s str>) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

impl GitHubHost {
    /// # Errors
    /// * `ThingError::ConfigError` if a base URL in `settings` is not a usable URL
    pub fn new(settings: &Settings) -> ThingResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ThingError::ConfigError(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: parse_base(&settings.api_base)?,
            archive_base: parse_base(&settings.archive_base)?,
        })
    }

    /// `<api>/repos/<owner>/<repo>`
    pub fn repository_url(&self, repo: &RepoRef) -> Url {
        join_segments(
            &self.api_base,
            ["repos", repo.owner.as_str(), repo.repo.as_str()],
        )
    }

    /// `<base>/<owner>/<repo>/archive/<branch>.zip`, every part escaped.
    /// Slashes in the branch name stay path separators.
    pub fn archive_url(&self, repo: &RepoRef, branch: &str) -> Url {
        let file = format!("{branch}.zip");
        let segments = [repo.owner.as_str(), repo.repo.as_str(), "archive"]
            .into_iter()
            .chain(file.split('/'));
        join_segments(&self.archive_base, segments)
    }
}

impl RepositoryHost for GitHubHost {
    fn default_branch(&self, repo: &RepoRef) -> ThingResult<String> {
        let url = self.repository_url(repo);
        debug!("Querying {url}");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .map_err(|e| not_found(repo, e))?;
        if !response.status().is_success() {
            let reason = format!("GitHub API returned {}", response.status());
            return Err(not_found(repo, reason));
        }

        let metadata: RepositoryMetadata = response.json().map_err(|e| not_found(repo, e))?;
        match metadata.default_branch {
            Some(branch) if !branch.is_empty() => Ok(branch),
            _ => Err(not_found(repo, "repository has no default branch")),
        }
    }

    fn download_archive(&self, repo: &RepoRef, branch: &str) -> ThingResult<Vec<u8>> {
        let url = self.archive_url(repo, branch);
        debug!("Downloading {url}");

        let response = self.client.get(url).send().map_err(|e| not_found(repo, e))?;
        if !response.status().is_success() {
            let reason = format!("archive download returned {}", response.status());
            return Err(not_found(repo, reason));
        }

        let bytes = response.bytes().map_err(|e| not_found(repo, e))?;
        Ok(bytes.to_vec())
    }
}

/// Loader for templates published as GitHub repositories.
pub struct GitHubLoader<'a> {
    host: &'a dyn RepositoryHost,
    repo: RepoRef,
    cache_root: &'a Path,
}

impl<'a> GitHubLoader<'a> {
    pub fn new(host: &'a dyn RepositoryHost, repo: RepoRef, cache_root: &'a Path) -> Self {
        Self {
            host,
            repo,
            cache_root,
        }
    }

    /// Cache directory owned by this repository.
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_root.join(&self.repo.owner).join(&self.repo.repo)
    }

    fn extracted_root(&self, cache_dir: &Path, branch: &str) -> ThingResult<PathBuf> {
        let expected = cache_dir.join(self.repo.archive_folder(branch));
        if expected.is_dir() {
            return Ok(expected);
        }

        let mut top_level = Vec::new();
        for entry in fs::read_dir(cache_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                top_level.push(entry.path());
            }
        }
        match top_level.as_slice() {
            [only] => Ok(only.clone()),
            _ => Err(not_found(
                &self.repo,
                format!("archive does not contain '{}'", expected.display()),
            )),
        }
    }
}

impl TemplateLoader for GitHubLoader<'_> {
    /// Downloads the default branch and extracts it into a fresh cache entry.
    ///
    /// # Errors
    /// * `ThingError::RepositoryNotFound` if GitHub does not serve the repository
    /// * `ThingError::ArchiveError` if the downloaded archive cannot be extracted
    fn load(&self) -> ThingResult<PathBuf> {
        let branch = self.host.default_branch(&self.repo)?;
        debug!("Default branch of '{}' is '{branch}'", self.repo);
        let archive = self.host.download_archive(&self.repo, &branch)?;

        let cache_dir = self.cache_dir();
        if cache_dir.exists() {
            debug!("Removing cached template '{}'", cache_dir.display());
            fs::remove_dir_all(&cache_dir)?;
        }
        fs::create_dir_all(&cache_dir)?;

        zip::ZipArchive::new(Cursor::new(archive))?.extract(&cache_dir)?;

        self.extracted_root(&cache_dir, &branch)
    }
}
