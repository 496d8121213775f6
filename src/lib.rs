//! thing creates new projects from templates.
//! A template is a local directory or a GitHub repository; its files are
//! copied with the project name substituted in, then the hooks declared in
//! `thing.template.yaml` run inside the new project.

/// Command-line interface module
pub mod cli;

/// Template descriptor (`thing.template.yaml`) loading
pub mod config;

pub mod constants;

/// Error types and handling
pub mod error;

/// Checks made before anything is written
pub mod guard;

/// Post-creation hook execution
pub mod hooks;

/// Template sources: local directories and cached GitHub archives
pub mod loader;

pub mod logger;

/// Orchestration of a complete project creation
pub mod pipeline;

/// Rendering of template files into the project directory
pub mod processor;

/// User interaction
pub mod prompt;

/// Placeholder substitution engine
pub mod renderer;
