//! Build order resolution for changed workspaces.

use std::collections::HashSet;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::change::{Classification, ClassificationMap};
use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::package::WorkspaceMap;

/// A changed workspace with its position in the build order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedWorkspace {
    pub name: String,
    pub location: String,
    pub declared_dependencies: IndexSet<String>,
    #[serde(flatten)]
    pub classification: Classification,
    /// 0-based position; dependencies always come first.
    pub build_order: usize,
}

/// Ordered list of changed workspaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildPlan {
    pub workspaces: Vec<ResolvedWorkspace>,
}

impl BuildPlan {
    /// Workspace names in build order.
    pub fn names(&self) -> Vec<&str> {
        self.workspaces.iter().map(|w| w.name.as_str()).collect()
    }

    /// Build order of `name`, if it is part of the plan.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.workspaces
            .iter()
            .find(|w| w.name == name)
            .map(|w| w.build_order)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }
}

/// Orders qualifying workspaces so that dependencies are built first.
///
/// Candidates are extracted one at a time. A directly changed workspace with
/// no changed dependencies always wins. Otherwise the first dependency-changed
/// candidate is taken, unless some of its dependencies are still waiting, in
/// which case the same selection runs over those dependencies instead. Ties
/// are broken by candidate order.
pub struct BuildOrderResolver<'a> {
    workspaces: &'a WorkspaceMap,
    classifications: &'a ClassificationMap,
}

impl<'a> BuildOrderResolver<'a> {
    pub fn new(workspaces: &'a WorkspaceMap, classifications: &'a ClassificationMap) -> Self {
        Self {
            workspaces,
            classifications,
        }
    }

    /// Produces the build plan for `qualifying`, keeping its order for ties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DependencyCycle`] if the qualifying workspaces depend on
    /// each other in a cycle, and [`Error::UnknownWorkspace`] if a name has no
    /// workspace record.
    pub fn resolve(&self, qualifying: &[String]) -> Result<BuildPlan> {
        DependencyGraph::new(qualifying, self.classifications).ensure_acyclic()?;

        let mut remaining: IndexSet<&str> = qualifying.iter().map(String::as_str).collect();
        let mut workspaces = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let next = self.select_next(&remaining);
            remaining.shift_remove(next);

            let record = self
                .workspaces
                .get(next)
                .ok_or_else(|| Error::UnknownWorkspace(next.to_string()))?;
            let build_order = workspaces.len();
            debug!(name = next, build_order, "placed workspace");

            workspaces.push(ResolvedWorkspace {
                name: record.name.clone(),
                location: record.location.clone(),
                declared_dependencies: record.declared_dependencies.clone(),
                classification: self.classifications.get(next).cloned().unwrap_or_default(),
                build_order,
            });
        }

        info!(count = workspaces.len(), "resolved build order");
        Ok(BuildPlan { workspaces })
    }

    /// Picks the next workspace to extract from `remaining`.
    ///
    /// `remaining` must not be empty.
    pub fn select_next<'r>(&self, remaining: &IndexSet<&'r str>) -> &'r str {
        let mut scope: Vec<&'r str> = remaining.iter().copied().collect();
        let mut visited: HashSet<&'r str> = HashSet::new();

        loop {
            if let Some(&independent) = scope
                .iter()
                .find(|name| self.class(name).is_some_and(Classification::is_independent))
            {
                return independent;
            }

            let dependent = scope.iter().copied().find(|name| {
                !visited.contains(name)
                    && self.class(name).is_some_and(|c| c.transitively_changed)
            });
            let Some(dependent) = dependent else {
                warn!(candidate = scope[0], "no eligible workspace, taking first candidate");
                return scope[0];
            };
            visited.insert(dependent);

            let blockers = self.blockers(dependent, remaining);
            if blockers.is_empty() {
                return dependent;
            }
            scope = blockers;
        }
    }

    /// In-repo dependencies of `name` that have not been placed yet, in
    /// candidate order.
    fn blockers<'r>(&self, name: &str, remaining: &IndexSet<&'r str>) -> Vec<&'r str> {
        let Some(classification) = self.class(name) else {
            return Vec::new();
        };
        remaining
            .iter()
            .copied()
            .filter(|candidate| *candidate != name)
            .filter(|candidate| {
                classification
                    .changed_in_repo_dependencies
                    .iter()
                    .any(|dep| dep == candidate)
            })
            .collect()
    }

    #[inline]
    fn class(&self, name: &str) -> Option<&'a Classification> {
        self.classifications.get(name)
    }
}

