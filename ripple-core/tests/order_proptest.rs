use std::collections::HashSet;

use proptest::prelude::*;
use ripple_core::change::{qualifying, ChangeClassifier};
use ripple_core::order::BuildOrderResolver;
use ripple_core::package::{WorkspaceMap, WorkspaceRecord};

/// A random acyclic monorepo: workspace `i` may only depend on `j < i`.
#[derive(Debug, Clone)]
struct Repo {
    order: Vec<usize>,
    deps: Vec<Vec<usize>>,
    changed: Vec<bool>,
}

fn gen_repo() -> impl Strategy<Value = Repo> {
    (1usize..9).prop_flat_map(|n| {
        (
            Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
            proptest::collection::vec(proptest::collection::vec(any::<bool>(), n), n),
            proptest::collection::vec(any::<bool>(), n),
        )
            .prop_map(|(order, adjacency, changed)| {
                let deps = adjacency
                    .iter()
                    .enumerate()
                    .map(|(i, row)| (0..i).filter(|&j| row[j]).collect())
                    .collect();
                Repo {
                    order,
                    deps,
                    changed,
                }
            })
    })
}

fn name(i: usize) -> String {
    format!("ws{}", i)
}

fn build(repo: &Repo) -> (WorkspaceMap, Vec<String>) {
    let mut map = WorkspaceMap::new();
    for &i in &repo.order {
        let mut deps: Vec<String> = repo.deps[i].iter().map(|&j| name(j)).collect();
        deps.push("external-lib".to_string());
        map.insert(
            name(i),
            WorkspaceRecord::new(name(i), format!("packages/{}", name(i)), deps),
        );
    }
    let changed = repo
        .changed
        .iter()
        .enumerate()
        .filter(|(_, c)| **c)
        .map(|(i, _)| format!("packages/{}/index.js", name(i)))
        .collect();
    (map, changed)
}

fn reaches_change(repo: &Repo, i: usize) -> bool {
    let mut stack = repo.deps[i].clone();
    let mut seen = HashSet::new();
    while let Some(j) = stack.pop() {
        if !seen.insert(j) {
            continue;
        }
        if repo.changed[j] {
            return true;
        }
        stack.extend(repo.deps[j].iter().copied());
    }
    false
}

proptest! {
    #[test]
    fn test_plan_contains_every_changed_workspace_once(repo in gen_repo()) {
        let (map, changed) = build(&repo);
        let classifications = ChangeClassifier::default().classify(&map, &changed).unwrap();
        let candidates = qualifying(&classifications);
        let plan = BuildOrderResolver::new(&map, &classifications).resolve(&candidates).unwrap();

        prop_assert_eq!(plan.len(), candidates.len());
        let placed: HashSet<&str> = plan.names().into_iter().collect();
        prop_assert_eq!(placed.len(), candidates.len());
        for candidate in &candidates {
            prop_assert!(placed.contains(candidate.as_str()), "missing {}", candidate);
        }
        for (position, workspace) in plan.workspaces.iter().enumerate() {
            prop_assert_eq!(workspace.build_order, position);
        }
    }

    #[test]
    fn test_dependencies_come_before_dependents(repo in gen_repo()) {
        let (map, changed) = build(&repo);
        let classifications = ChangeClassifier::default().classify(&map, &changed).unwrap();
        let candidates = qualifying(&classifications);
        let plan = BuildOrderResolver::new(&map, &classifications).resolve(&candidates).unwrap();

        for workspace in &plan.workspaces {
            for dep in &workspace.classification.changed_in_repo_dependencies {
                if let Some(dep_position) = plan.position(dep) {
                    prop_assert!(
                        dep_position < workspace.build_order,
                        "{} placed at {} before its dependency {} at {}",
                        workspace.name, workspace.build_order, dep, dep_position
                    );
                }
            }
        }
    }

    #[test]
    fn test_classification_matches_reachability(repo in gen_repo()) {
        let (map, changed) = build(&repo);
        let classifications = ChangeClassifier::default().classify(&map, &changed).unwrap();

        for i in 0..repo.changed.len() {
            let classification = &classifications[name(i).as_str()];
            prop_assert_eq!(classification.directly_changed, repo.changed[i]);
            prop_assert_eq!(classification.transitively_changed, reaches_change(&repo, i));
        }

        let again = ChangeClassifier::default().classify(&map, &changed).unwrap();
        prop_assert_eq!(classifications, again);
    }
}
