//! Integration tests for the full analysis pipeline.
//!
//! These tests run discovery and analysis against the `testdata/webapp`
//! fixture and against small trees built in temporary directories.

use std::fs;
use std::path::PathBuf;

use codedoc::{Analyzer, Config, FileInfo, ProjectDocument};
use tempfile::TempDir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("webapp")
}

/// Analyze the fixture with its own codedoc.yaml.
fn analyze_fixture() -> ProjectDocument {
    let root = fixture_path();
    let config = Config::load(&root, None).expect("fixture config should load");
    let analyzer = Analyzer::new(&root, config).expect("fixture root should exist");
    analyzer.analyze().expect("analysis should succeed")
}

fn find<'a>(document: &'a ProjectDocument, path: &str) -> &'a FileInfo {
    document
        .files()
        .into_iter()
        .find(|f| f.path == path)
        .unwrap_or_else(|| panic!("missing {}", path))
}

#[test]
fn test_discovers_expected_files() {
    let document = analyze_fixture();
    let paths: Vec<&str> = document.files().iter().map(|f| f.path.as_str()).collect();

    // Each directory's files come before its subdirectories.
    assert_eq!(
        paths,
        vec![
            "src/app.tsx",
            "src/index.ts",
            "src/components/Button.tsx",
            "src/lib/api.ts",
            "src/lib/format.js",
            "src/lib/types.ts",
        ]
    );
}

#[test]
fn test_excluded_and_foreign_files_absent() {
    let document = analyze_fixture();
    for file in document.files() {
        assert!(!file.path.ends_with(".stories.tsx"), "{} should be excluded", file.path);
        assert!(!file.path.starts_with("scripts/"), "{} has no allowed extension", file.path);
    }
    assert!(!document.root.directories.contains_key("scripts"));
}

#[test]
fn test_file_descriptions() {
    let document = analyze_fixture();

    assert_eq!(
        find(&document, "src/index.ts").file_description.as_deref(),
        Some("Application entry point.\nMounts the root component.")
    );
    assert_eq!(
        find(&document, "src/lib/api.ts").file_description.as_deref(),
        Some("HTTP client for the backend.")
    );
    // Only a `use client` pragma comment.
    assert!(find(&document, "src/app.tsx").file_description.is_none());
    assert!(find(&document, "src/lib/types.ts").file_description.is_none());
}

#[test]
fn test_imports_classified() {
    let document = analyze_fixture();

    let index = find(&document, "src/index.ts");
    assert_eq!(index.external_imports, vec!["react-dom/client"]);
    assert_eq!(index.internal_imports, vec!["./app", "@/lib/api"]);

    let api = find(&document, "src/lib/api.ts");
    assert_eq!(api.external_imports, vec!["axios"]);
    assert_eq!(api.internal_imports, vec!["./types", "./cache"]);
}

#[test]
fn test_functions_and_docs() {
    let document = analyze_fixture();

    let api = find(&document, "src/lib/api.ts");
    let names: Vec<&str> = api.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["configure", "ApiClient.getUser"]);

    let configure = &api.functions[0];
    assert_eq!(configure.description.as_deref(), Some("Set global client options."));
    assert_eq!(configure.params.len(), 2);
    assert_eq!(configure.params[0].name, "options");
    assert_eq!(configure.params[0].type_name.as_deref(), Some("object"));
    assert!(configure.params[0].description.is_none());
    assert_eq!(configure.params[1].name, "options.baseUrl");
    assert_eq!(
        configure.params[1].description.as_deref(),
        Some("Prefix for every request")
    );

    let get_user = &api.functions[1];
    let returns = get_user.returns.as_ref().unwrap();
    assert_eq!(returns.type_name.as_deref(), Some("Promise<User>"));
    assert_eq!(returns.description.as_deref(), Some("the user record"));

    let button = find(&document, "src/components/Button.tsx");
    assert_eq!(button.functions[0].name, "Button");
    assert_eq!(
        button.functions[0].params[0].description.as_deref(),
        Some("the component props")
    );

    let format = find(&document, "src/lib/format.js");
    let format_date = &format.functions[0];
    assert_eq!(format_date.name, "formatDate");
    assert_eq!(format_date.params[1].name, "pattern");
    assert_eq!(
        format_date.returns.as_ref().unwrap().description.as_deref(),
        Some("the formatted date")
    );

    let app = find(&document, "src/app.tsx");
    assert_eq!(app.functions[0].name, "App");
    assert!(app.functions[0].description.is_none());
}

#[test]
fn test_every_function_named() {
    let document = analyze_fixture();
    for file in document.files() {
        for function in &file.functions {
            assert!(!function.name.is_empty(), "unnamed function in {}", file.path);
        }
    }
}

#[test]
fn test_no_empty_directories() {
    let document = analyze_fixture();
    document.root.walk(&mut |dir| {
        if dir.path.is_none() {
            assert!(!dir.is_empty(), "empty directory {}", dir.name);
        }
    });
}

#[test]
fn test_gitignore_and_baseline_excludes() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join(".gitignore"), "generated/\n*.gen.ts\n!keep.gen.ts\n").unwrap();
    for sub in ["src", "generated", "node_modules/lib", "dist", "src/build"] {
        fs::create_dir_all(root.join(sub)).unwrap();
    }
    fs::write(root.join("src/main.ts"), "export const x = 1;\n").unwrap();
    fs::write(root.join("src/schema.gen.ts"), "export const y = 1;\n").unwrap();
    fs::write(root.join("src/keep.gen.ts"), "export const z = 1;\n").unwrap();
    fs::write(root.join("generated/api.ts"), "export {};\n").unwrap();
    fs::write(root.join("node_modules/lib/index.js"), "export {};\n").unwrap();
    fs::write(root.join("dist/bundle.js"), "export {};\n").unwrap();
    fs::write(root.join("src/build/out.ts"), "export {};\n").unwrap();

    let analyzer = Analyzer::new(root, Config::default()).unwrap();
    let document = analyzer.analyze().unwrap();
    let paths: Vec<&str> = document.files().iter().map(|f| f.path.as_str()).collect();

    assert_eq!(paths, vec!["src/keep.gen.ts", "src/main.ts"]);
}

#[test]
fn test_ignore_file_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join(".gitignore"), "*.ts\n").unwrap();
    fs::write(root.join("a.ts"), "export {};\n").unwrap();

    let analyzer = Analyzer::new(root, Config::default()).unwrap();
    assert_eq!(analyzer.analyze().unwrap().file_count(), 0);

    let config = Config {
        respect_ignore_file: false,
        ..Config::default()
    };
    let analyzer = Analyzer::new(root, config).unwrap();
    assert_eq!(analyzer.analyze().unwrap().file_count(), 1);
}

#[test]
fn test_bad_files_skipped() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("good.ts"), "export function ok() {}\n").unwrap();
    fs::write(root.join("binary.js"), [0x00u8, 0xc3, 0x28, 0xff]).unwrap();
    fs::write(root.join("broken.ts"), "export function half( {\n").unwrap();

    let analyzer = Analyzer::new(root, Config::default()).unwrap();
    let document = analyzer.analyze().unwrap();
    let names: Vec<&str> = document.files().iter().map(|f| f.name.as_str()).collect();

    assert!(names.contains(&"good.ts"));
    assert!(names.contains(&"broken.ts"));
    assert!(!names.contains(&"binary.js"));
}

#[test]
fn test_empty_project() {
    let dir = TempDir::new().unwrap();
    let analyzer = Analyzer::new(dir.path(), Config::default()).unwrap();
    let document = analyzer.analyze().unwrap();

    assert_eq!(document.file_count(), 0);
    assert!(document.root.is_empty());
    assert!(document.root.path.is_some());
}

#[test]
fn test_repeat_runs_identical() {
    assert_eq!(analyze_fixture(), analyze_fixture());
}
