//! Project creation flow.
//! resolve → check preconditions → create project directory → render files
//! → load descriptor → confirm and run hooks. The first failure stops the
//! run; nothing created before it is removed.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::load_descriptor;
use crate::error::ThingResult;
use crate::guard::check_preconditions;
use crate::hooks::{run_hooks, HookReport};
use crate::loader::TemplateResolver;
use crate::processor::Processor;
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;

/// Summary of a completed run.
#[derive(Debug)]
pub struct Outcome {
    pub project_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub hooks: HookReport,
}

pub struct Pipeline<'a> {
    resolver: &'a TemplateResolver<'a>,
    engine: &'a dyn TemplateRenderer,
    prompt: &'a dyn Prompter,
    base_dir: PathBuf,
}

impl<'a> Pipeline<'a> {
    /// `base_dir` is the directory project names are relative to; the
    /// binary passes the current working directory.
    pub fn new<P: Into<PathBuf>>(
        resolver: &'a TemplateResolver<'a>,
        engine: &'a dyn TemplateRenderer,
        prompt: &'a dyn Prompter,
        base_dir: P,
    ) -> Self {
        Self {
            resolver,
            engine,
            prompt,
            base_dir: base_dir.into(),
        }
    }

    pub fn project_dir(&self, project_name: &str) -> PathBuf {
        self.base_dir.join(project_name)
    }

    /// Creates `project_name` from the template behind `reference`.
    pub fn run(&self, project_name: &str, reference: &str) -> ThingResult<Outcome> {
        let template_root = self.resolver.resolve(reference)?;
        let project_dir = self.project_dir(project_name);

        check_preconditions(&project_dir, &template_root)?;

        debug!("Creating project directory {}", project_dir.display());
        fs::create_dir_all(&project_dir)?;

        let files = self.render(project_name, &template_root, &project_dir)?;

        let descriptor = load_descriptor(&template_root)?;
        debug!("Template description: {}", descriptor.description);
        let hooks = run_hooks(self.prompt, &project_dir, &descriptor.hooks)?;

        println!("Project created successfully in {}.", project_dir.display());
        Ok(Outcome {
            project_dir,
            files,
            hooks,
        })
    }

    fn render(
        &self,
        project_name: &str,
        template_root: &Path,
        project_dir: &Path,
    ) -> ThingResult<Vec<PathBuf>> {
        Processor::new(self.engine, template_root, project_dir, project_name)
            .render_all()
    }
}
