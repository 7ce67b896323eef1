//! Structural checks the CLI runs after customization, standing in for a host validator.

use modelfix_domain::{ModelProblem, ModelValidator};
use modelfix_types::{Coordinate, Dependency, Model};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl StructuralValidator {
    fn check_entry(
        kind: &str,
        coordinate: &Coordinate,
        version: Option<&str>,
        problems: &mut Vec<ModelProblem>,
    ) {
        if coordinate.group_id.trim().is_empty() || coordinate.artifact_id.trim().is_empty() {
            problems.push(ModelProblem::error(format!(
                "{kind} '{coordinate}' is missing groupId or artifactId"
            )));
        }
        if version.is_none_or(str::is_empty) {
            problems.push(ModelProblem::error(format!(
                "{kind} '{coordinate}' has no version"
            )));
        }
    }

    /// `groupId:artifactId:type:classifier`, with the default `jar` type.
    fn management_key(dep: &Dependency) -> String {
        let field = |name: &str| dep.extra.get(name).and_then(|v| v.as_str());
        format!(
            "{}:{}:{}",
            dep.coordinate,
            field("type").unwrap_or("jar"),
            field("classifier").unwrap_or_default()
        )
    }
}

impl ModelValidator for StructuralValidator {
    fn validate_effective_model(&self, model: &Model, problems: &mut Vec<ModelProblem>) {
        let mut seen = BTreeSet::new();
        for dep in &model.dependencies {
            Self::check_entry("dependency", &dep.coordinate, dep.version.as_deref(), problems);
            let key = Self::management_key(dep);
            if !seen.insert(key) {
                problems.push(ModelProblem::warning(format!(
                    "dependency '{}' is declared more than once",
                    dep.coordinate
                )));
            }
        }
        let Some(build) = &model.build else {
            return;
        };
        for ext in &build.extensions {
            Self::check_entry("extension", &ext.coordinate, ext.version.as_deref(), problems);
        }
        for plugin in &build.plugins {
            Self::check_entry("plugin", &plugin.coordinate, plugin.version.as_deref(), problems);
        }
    }
}
