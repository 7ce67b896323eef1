use crate::compiler::{
    COMPILER_PLUGIN_ARTIFACT_ID, COMPILER_PLUGIN_GROUP_ID, CompilerDirectiveNormalizer,
    NormalizeSummary,
};
use crate::policy::BuildPolicy;
use crate::prune::DependencyPruner;
use crate::version::VersionResolver;
use modelfix_types::{Coordinate, Model};
use serde::Serialize;
use tracing::debug;

/// Per entry-kind version counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VersionCounts {
    pub visited: u64,
    pub defaulted: u64,
}

/// What one customization pass did. Advisory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CustomizeReport {
    pub dependencies_pruned: u64,
    pub dependencies: VersionCounts,
    pub extensions: VersionCounts,
    pub plugins: VersionCounts,
    pub compiler: NormalizeSummary,
}

/// Applies a [`BuildPolicy`] to descriptors, one pass per descriptor.
///
/// Holds no per-pass state, so a single customizer can serve concurrent passes over
/// distinct descriptors.
#[derive(Debug, Clone, Default)]
pub struct ModelCustomizer {
    policy: BuildPolicy,
    resolver: VersionResolver,
}

impl ModelCustomizer {
    pub fn new(policy: BuildPolicy) -> Self {
        Self {
            policy,
            resolver: VersionResolver,
        }
    }

    pub fn policy(&self) -> &BuildPolicy {
        &self.policy
    }

    /// Prune dependencies, pin versions of dependencies, extensions and plugins, and
    /// normalize the compiler plugin's configuration. Never fails.
    pub fn customize(&self, model: &mut Model) -> CustomizeReport {
        let mut report = CustomizeReport::default();

        let pruned = DependencyPruner::new(self.policy.skip_tests).prune(&mut model.dependencies);
        report.dependencies_pruned = pruned as u64;

        for dep in &mut model.dependencies {
            self.pin(&dep.coordinate, &mut dep.version, &mut report.dependencies);
        }

        if let Some(build) = model.build.as_mut() {
            for ext in &mut build.extensions {
                self.pin(&ext.coordinate, &mut ext.version, &mut report.extensions);
            }

            let mut normalizer = None;
            for plugin in &mut build.plugins {
                self.pin(&plugin.coordinate, &mut plugin.version, &mut report.plugins);

                if plugin
                    .coordinate
                    .matches(COMPILER_PLUGIN_GROUP_ID, COMPILER_PLUGIN_ARTIFACT_ID)
                {
                    let normalizer = normalizer.get_or_insert_with(|| {
                        CompilerDirectiveNormalizer::new(self.policy.compiler_source.as_ref())
                    });
                    report
                        .compiler
                        .merge(normalizer.normalize(plugin.configurations_mut()));
                }
            }
        }

        debug!("customized {}: {:?}", model.id(), report);
        report
    }

    fn pin(&self, coordinate: &Coordinate, version: &mut Option<String>, counts: &mut VersionCounts) {
        let (resolved, fallback) = self
            .resolver
            .resolve_with_fallback(coordinate, version.as_deref());
        counts.visited += 1;
        if fallback.is_some() {
            counts.defaulted += 1;
        }
        *version = Some(resolved);
    }
}
