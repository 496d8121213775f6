use std::cell::Cell;
use std::fs;
use std::path::Path;

use tempfile::TempDir;
use thing::constants::DESCRIPTOR_FILE;
use thing::error::{Precondition, ThingError, ThingResult};
use thing::loader::github::{RepoRef, RepositoryHost};
use thing::loader::TemplateResolver;
use thing::pipeline::Pipeline;
use thing::renderer::MiniJinjaRenderer;

/// Host for pipelines that must never reach the network.
struct OfflineHost;

impl RepositoryHost for OfflineHost {
    fn default_branch(&self, repo: &RepoRef) -> ThingResult<String> {
        panic!("unexpected lookup of {repo}")
    }

    fn download_archive(&self, repo: &RepoRef, _branch: &str) -> ThingResult<Vec<u8>> {
        panic!("unexpected download of {repo}")
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn demo_template() -> TempDir {
    let template = TempDir::new().unwrap();
    write(
        template.path(),
        DESCRIPTOR_FILE,
        "hooks:\n  - touch ok.txt\ndescription: x\n",
    );
    write(template.path(), "README.md", "Hello {{name}}");
    template
}

fn reference(template: &TempDir) -> &str {
    template.path().to_str().unwrap()
}

#[cfg(unix)]
#[test]
fn test_end_to_end_with_confirmed_hooks() {
    let template = demo_template();
    let work = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    let resolver = TemplateResolver::new(&OfflineHost, cache.path());
    let engine = MiniJinjaRenderer::new();
    let prompt = |_: &str| true;

    let outcome = Pipeline::new(&resolver, &engine, &prompt, work.path())
        .run("demo", reference(&template))
        .unwrap();

    let project = work.path().join("demo");
    assert_eq!(outcome.project_dir, project);
    let readme = fs::read_to_string(project.join("README.md")).unwrap();
    assert_eq!(readme, "Hello demo");
    assert!(project.join("ok.txt").exists());
    assert!(!project.join(DESCRIPTOR_FILE).exists());
    assert!(outcome.hooks.executed);
}

#[test]
fn test_declined_hooks_still_succeed() {
    let template = demo_template();
    let work = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    let resolver = TemplateResolver::new(&OfflineHost, cache.path());
    let engine = MiniJinjaRenderer::new();
    let asked = Cell::new(0);
    let prompt = |_: &str| {
        asked.set(asked.get() + 1);
        false
    };

    let outcome = Pipeline::new(&resolver, &engine, &prompt, work.path())
        .run("demo", reference(&template))
        .unwrap();

    assert_eq!(asked.get(), 1);
    assert!(!outcome.hooks.executed);
    assert!(!work.path().join("demo/ok.txt").exists());
    assert!(work.path().join("demo/README.md").exists());
}

#[test]
fn test_multi_segment_name() {
    let template = demo_template();
    let work = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    let resolver = TemplateResolver::new(&OfflineHost, cache.path());
    let engine = MiniJinjaRenderer::new();
    let prompt = |_: &str| false;

    Pipeline::new(&resolver, &engine, &prompt, work.path())
        .run("sub/my-app", reference(&template))
        .unwrap();

    let readme = work.path().join("sub/my-app/README.md");
    assert_eq!(fs::read_to_string(readme).unwrap(), "Hello my-app");
}

#[test]
fn test_existing_project_is_left_untouched() {
    let template = demo_template();
    let work = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    fs::create_dir(work.path().join("demo")).unwrap();
    let resolver = TemplateResolver::new(&OfflineHost, cache.path());
    let engine = MiniJinjaRenderer::new();
    let prompt = |_: &str| true;

    let result = Pipeline::new(&resolver, &engine, &prompt, work.path())
        .run("demo", reference(&template));

    assert!(matches!(
        result,
        Err(ThingError::PreconditionFailed(Precondition::ProjectExists(_)))
    ));
    assert_eq!(fs::read_dir(work.path().join("demo")).unwrap().count(), 0);
}

#[test]
fn test_unresolved_template_aborts_before_hooks() {
    let template = demo_template();
    write(template.path(), "z-broken.txt", "{{ author }}");
    let work = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    let resolver = TemplateResolver::new(&OfflineHost, cache.path());
    let engine = MiniJinjaRenderer::new();
    let asked = Cell::new(false);
    let prompt = |_: &str| {
        asked.set(true);
        true
    };

    let result = Pipeline::new(&resolver, &engine, &prompt, work.path())
        .run("demo", reference(&template));

    assert!(matches!(result, Err(ThingError::UnresolvedTemplate { .. })));
    assert!(!asked.get());
    // Files rendered before the failure stay behind.
    assert!(work.path().join("demo/README.md").exists());
    assert!(!work.path().join("demo/z-broken.txt").exists());
}

#[test]
fn test_missing_descriptor_fails_after_rendering() {
    let template = TempDir::new().unwrap();
    write(template.path(), "README.md", "Hello {{name}}");
    let work = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    let resolver = TemplateResolver::new(&OfflineHost, cache.path());
    let engine = MiniJinjaRenderer::new();
    let prompt = |_: &str| true;

    let result = Pipeline::new(&resolver, &engine, &prompt, work.path())
        .run("demo", reference(&template));

    assert!(matches!(
        result,
        Err(ThingError::MalformedDescriptor { .. })
    ));
    assert!(work.path().join("demo/README.md").exists());
}
