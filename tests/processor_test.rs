use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thing::constants::DESCRIPTOR_FILE;
use thing::error::{ThingError, ThingResult};
use thing::processor::{collect_template_files, FileOperation, Processor};
use thing::renderer::MiniJinjaRenderer;

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const DESCRIPTOR: &[u8] = b"hooks: []\ndescription: x\n";

fn render(template: &Path, project_dir: &Path, name: &str) -> ThingResult<Vec<PathBuf>> {
    let engine = MiniJinjaRenderer::new();
    let processor = Processor::new(&engine, template, project_dir, name);
    processor.render_all()
}

#[test]
fn test_collect_skips_descriptor_at_any_depth() {
    let template = TempDir::new().unwrap();
    write(template.path(), DESCRIPTOR_FILE, DESCRIPTOR);
    write(template.path(), &format!("nested/{DESCRIPTOR_FILE}"), b"");
    write(template.path(), "nested/b.txt", b"");
    write(template.path(), "a.txt", b"");

    let files = collect_template_files(template.path()).unwrap();

    let relative: Vec<&Path> = files
        .iter()
        .map(|f| f.strip_prefix(template.path()).unwrap())
        .collect();
    assert_eq!(relative, [Path::new("a.txt"), Path::new("nested/b.txt")]);
}

#[test]
fn test_render_substitutes_name() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(
        template.path(),
        "README.md",
        b"# {{ name }}\n\nWelcome to {{name}}.\n",
    );
    let project_dir = output.path().join("my-app");

    render(template.path(), &project_dir, "my-app").unwrap();

    let readme = fs::read_to_string(project_dir.join("README.md")).unwrap();
    assert_eq!(readme, "# my-app\n\nWelcome to my-app.\n");
}

#[test]
fn test_render_uses_last_name_segment() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(template.path(), "src/main.txt", b"{{name}}");
    let project_dir = output.path().join("sub/my-app");

    render(template.path(), &project_dir, "sub/my-app").unwrap();

    let main = fs::read_to_string(project_dir.join("src/main.txt")).unwrap();
    assert_eq!(main, "my-app");
}

#[test]
fn test_descriptor_is_never_rendered() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(template.path(), DESCRIPTOR_FILE, DESCRIPTOR);
    let nested = format!("deep/er/{DESCRIPTOR_FILE}");
    write(template.path(), &nested, b"{{ nope }}");
    write(template.path(), "deep/er/file.txt", b"ok");
    let project_dir = output.path().join("demo");

    let written = render(template.path(), &project_dir, "demo").unwrap();

    assert_eq!(written, vec![project_dir.join("deep/er/file.txt")]);
    assert!(!project_dir.join(DESCRIPTOR_FILE).exists());
    assert!(!project_dir.join("deep/er").join(DESCRIPTOR_FILE).exists());
}

#[test]
fn test_unresolved_token_fails_without_writing_file() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(template.path(), "bad.txt", b"{{ name }} {{ version }}");
    let project_dir = output.path().join("demo");

    let result = render(template.path(), &project_dir, "demo");

    match result {
        Err(ThingError::UnresolvedTemplate { path, .. }) => {
            assert_eq!(path, template.path().join("bad.txt"))
        }
        other => panic!("Expected UnresolvedTemplate, got {other:?}"),
    }
    assert!(!project_dir.join("bad.txt").exists());
}

#[test]
fn test_binary_files_are_copied_verbatim() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let bytes: &[u8] = &[0x89, b'P', b'N', b'G', 0xff, 0xfe, b'{', b'{'];
    write(template.path(), "logo.png", bytes);
    let engine = MiniJinjaRenderer::new();
    let project_dir = output.path().join("demo");
    let processor = Processor::new(&engine, template.path(), &project_dir, "demo");

    let operation = processor.process(&template.path().join("logo.png")).unwrap();
    let target = project_dir.join("logo.png");
    assert_eq!(operation, FileOperation::Copy { target });

    processor.render_all().unwrap();
    assert_eq!(fs::read(project_dir.join("logo.png")).unwrap(), bytes);
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_rejected() {
    let template = TempDir::new().unwrap();
    write(template.path(), "real.txt", b"x");
    let real = template.path().join("real.txt");
    let link = template.path().join("link.txt");
    std::os::unix::fs::symlink(real, link).unwrap();

    let result = collect_template_files(template.path());

    assert!(matches!(result, Err(ThingError::UnsupportedEntry { .. })));
}
