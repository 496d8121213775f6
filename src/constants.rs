//! Common constants used throughout thing.

/// Template metadata file name, never copied into the generated project
pub const DESCRIPTOR_FILE: &str = "thing.template.yaml";

/// Cache location for downloaded templates, relative to the home directory
pub const CACHE_SUBDIR: &str = ".local/thing/templates";

/// The only answer that confirms hook execution
pub const CONFIRM_TOKEN: &str = "y";

/// Variable name bound to the project name inside template files
pub const NAME_VARIABLE: &str = "name";

pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_URL: &str = "https://github.com";

pub const USER_AGENT: &str = concat!("thing/", env!("CARGO_PKG_VERSION"));

/// Environment overrides for the resolver settings
pub const ENV_CACHE_DIR: &str = "THING_CACHE_DIR";
pub const ENV_GITHUB_API: &str = "THING_GITHUB_API";
pub const ENV_GITHUB_URL: &str = "THING_GITHUB_URL";
