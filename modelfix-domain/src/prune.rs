use modelfix_types::Dependency;
use tracing::debug;

/// Scope value that marks a dependency as test-only.
pub const TEST_SCOPE: &str = "test";

/// Drops dependencies excluded by policy. Only ever touches the dependency list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyPruner {
    skip_tests: bool,
}

impl DependencyPruner {
    pub fn new(skip_tests: bool) -> Self {
        Self { skip_tests }
    }

    /// Remove every dependency whose scope is exactly `"test"` when tests are skipped.
    ///
    /// The match is case-sensitive and the order of survivors is preserved. Returns the number
    /// of entries removed.
    pub fn prune(&self, dependencies: &mut Vec<Dependency>) -> usize {
        if !self.skip_tests {
            return 0;
        }

        let before = dependencies.len();
        dependencies.retain(|dep| {
            if dep.scope.as_deref() == Some(TEST_SCOPE) {
                debug!("dropped test dependency {} (tests are skipped)", dep.coordinate);
                false
            } else {
                true
            }
        });
        before - dependencies.len()
    }
}
