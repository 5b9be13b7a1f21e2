use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ripple_core::adapter::ManifestSource;
use ripple_core::error::{Error, Result};
use ripple_core::loader::ManifestLoader;
use ripple_core::package::Manifest;

struct MemoryManifests(HashMap<PathBuf, String>);

impl MemoryManifests {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(path, content)| (PathBuf::from(path), content.to_string()))
                .collect(),
        )
    }
}

impl ManifestSource for MemoryManifests {
    fn read_manifest(&self, path: &Path) -> Result<Manifest> {
        let content = self.0.get(path).ok_or_else(|| Error::ManifestParse {
            path: path.to_path_buf(),
            message: "not found".to_string(),
        })?;
        Manifest::from_json(path, content)
    }
}

fn paths(paths: &[&str]) -> Vec<PathBuf> {
    paths.iter().map(PathBuf::from).collect()
}

#[test]
fn test_load_workspaces_in_order() {
    let source = MemoryManifests::new(&[
        (
            "packages/app/package.json",
            r#"{"name": "app", "dependencies": {"core": "*", "react": "^18"}}"#,
        ),
        ("packages/core/package.json", r#"{"name": "core"}"#),
    ]);

    let workspaces = ManifestLoader::new(&source)
        .load(&paths(&["packages/app/package.json", "packages/core/package.json"]))
        .unwrap();

    let names: Vec<&str> = workspaces.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["app", "core"]);

    let app = &workspaces["app"];
    assert_eq!(app.location, "packages/app");
    let deps: Vec<&str> = app.declared_dependencies.iter().map(String::as_str).collect();
    assert_eq!(deps, vec!["core", "react"]);
    assert!(workspaces["core"].declared_dependencies.is_empty());
}

#[test]
fn test_dev_dependencies_are_merged_without_duplicates() {
    let source = MemoryManifests::new(&[(
        "libs/ui/package.json",
        r#"{
            "name": "ui",
            "dependencies": {"tokens": "1.0.0", "lodash": "^4"},
            "devDependencies": {"tokens": "1.0.0", "jest": "^29"}
        }"#,
    )]);

    let workspaces = ManifestLoader::new(&source)
        .load(&paths(&["libs/ui/package.json"]))
        .unwrap();

    let deps: Vec<&str> = workspaces["ui"]
        .declared_dependencies
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(deps, vec!["tokens", "lodash", "jest"]);
}

#[test]
fn test_missing_name_is_an_error() {
    let source = MemoryManifests::new(&[("packages/anon/package.json", r#"{"version": "1.0.0"}"#)]);

    let result = ManifestLoader::new(&source).load(&paths(&["packages/anon/package.json"]));
    assert!(matches!(result, Err(Error::MissingName(path)) if path == Path::new("packages/anon/package.json")));
}

#[test]
fn test_malformed_manifest_is_an_error() {
    let source = MemoryManifests::new(&[("packages/bad/package.json", "{ not json")]);

    let result = ManifestLoader::new(&source).load(&paths(&["packages/bad/package.json"]));
    assert!(matches!(result, Err(Error::ManifestParse { .. })));
}

#[test]
fn test_unreadable_manifest_is_an_error() {
    let source = MemoryManifests::new(&[]);

    let result = ManifestLoader::new(&source).load(&paths(&["packages/gone/package.json"]));
    assert!(matches!(result, Err(Error::ManifestParse { .. })));
}

#[test]
fn test_duplicate_names_are_rejected() {
    let source = MemoryManifests::new(&[
        ("packages/one/package.json", r#"{"name": "shared"}"#),
        ("packages/two/package.json", r#"{"name": "shared"}"#),
    ]);

    let result = ManifestLoader::new(&source)
        .load(&paths(&["packages/one/package.json", "packages/two/package.json"]));

    match result {
        Err(Error::DuplicateWorkspace {
            name,
            first,
            second,
        }) => {
            assert_eq!(name, "shared");
            assert_eq!(first, "packages/one");
            assert_eq!(second, "packages/two");
        }
        other => panic!("expected duplicate workspace error, got {:?}", other),
    }
}

#[test]
fn test_no_manifests_yields_empty_map() {
    let source = MemoryManifests::new(&[]);
    let workspaces = ManifestLoader::new(&source).load(&[]).unwrap();
    assert!(workspaces.is_empty());
}
