//! Property-based tests for modelfix-domain.
//!
//! These tests verify that:
//! - Version resolution is total and never yields an empty or ranged version, however
//!   long or deeply qualified the spec
//! - Pruning is a stable filter on exactly the `test` scope
//! - Compiler normalization establishes its invariants and is idempotent

use modelfix_domain::{
    BuildPolicy, CompilerDirectiveNormalizer, DEFAULT_VERSION, DependencyPruner, Level,
    LocationOutcome, ModelCustomizer, VersionResolver,
};
use modelfix_types::{Build, ConfigNode, Coordinate, Dependency, Model, Plugin};
use proptest::prelude::*;

/// Strategy for dotted numeric versions like `1.2.3`.
fn arb_concrete_version() -> impl Strategy<Value = String> {
    prop::collection::vec(0u32..50, 1..4).prop_map(|parts| {
        parts
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(".")
    })
}

/// Strategy for compiler levels like `1.4`, `1.8`, `11`, `17.0`.
fn arb_level_text() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u32..2, 0u32..10).prop_map(|(a, b)| format!("{a}.{b}")),
        (5u32..25).prop_map(|a| a.to_string()),
        (5u32..25).prop_map(|a| format!("{a}.0")),
    ]
}

fn arb_scope() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("test".to_string())),
        Just(Some("Test".to_string())),
        Just(Some("compile".to_string())),
        Just(Some("runtime".to_string())),
        Just(Some("provided".to_string())),
    ]
}

fn arb_dependencies() -> impl Strategy<Value = Vec<Dependency>> {
    prop::collection::vec(arb_scope(), 0..12).prop_map(|scopes| {
        scopes
            .into_iter()
            .enumerate()
            .map(|(i, scope)| Dependency {
                coordinate: Coordinate::new("org.example", format!("dep-{i}")),
                version: Some("1.0".to_string()),
                scope,
                ..Default::default()
            })
            .collect()
    })
}

fn compiler_cfg(source: &str, target: &str) -> ConfigNode {
    ConfigNode::new("configuration")
        .with_child(ConfigNode::leaf("source", source))
        .with_child(ConfigNode::leaf("target", target))
}

fn level_of(config: &ConfigNode, name: &str) -> Level {
    config
        .child_value(name)
        .expect("value present")
        .parse()
        .expect("value is a level")
}

proptest! {
    /// Any input resolves to something non-empty and range-free.
    #[test]
    fn resolve_is_total(spec in proptest::option::of(".{0,20}")) {
        let resolved = VersionResolver.resolve(&Coordinate::new("g", "a"), spec.as_deref());
        prop_assert!(!resolved.is_empty());
        prop_assert!(!resolved.starts_with('[') && !resolved.starts_with('('));
    }

    /// Concrete versions come back byte-for-byte.
    #[test]
    fn resolve_is_identity_on_concrete_versions(version in arb_concrete_version()) {
        let resolved = VersionResolver.resolve(&Coordinate::new("g", "a"), Some(&version));
        prop_assert_eq!(resolved, version);
    }

    /// Two-sided ranges never carry a recommendation.
    #[test]
    fn resolve_defaults_bounded_ranges(lo in arb_concrete_version(), hi in arb_concrete_version()) {
        let spec = format!("[{lo},{hi})");
        let resolved = VersionResolver.resolve(&Coordinate::new("g", "a"), Some(&spec));
        prop_assert_eq!(resolved, DEFAULT_VERSION);
    }

    /// Pruning keeps exactly the non-`test` entries, in their original order.
    #[test]
    fn prune_is_stable_filter(deps in arb_dependencies(), skip_tests in any::<bool>()) {
        let mut pruned = deps.clone();
        let removed = DependencyPruner::new(skip_tests).prune(&mut pruned);

        let expected: Vec<Dependency> = deps
            .iter()
            .filter(|d| !skip_tests || d.scope.as_deref() != Some("test"))
            .cloned()
            .collect();
        prop_assert_eq!(removed, deps.len() - expected.len());
        prop_assert_eq!(pruned, expected);
    }

    /// After normalization source respects the floor and target is at least source.
    #[test]
    fn normalize_establishes_invariants(
        source in arb_level_text(),
        target in arb_level_text(),
        floor in proptest::option::of(arb_level_text()),
    ) {
        let floor: Option<Level> = floor.map(|f| f.parse().expect("floor"));
        let normalizer = CompilerDirectiveNormalizer::new(floor.as_ref());
        let original_source: Level = source.parse().expect("source");

        let mut config = compiler_cfg(&source, &target);
        let outcome = normalizer.normalize_location(&mut config);
        let is_normalized = matches!(outcome, LocationOutcome::Normalized { .. });
        prop_assert!(is_normalized);

        let new_source = level_of(&config, "source");
        let new_target = level_of(&config, "target");
        match &floor {
            Some(f) => prop_assert_eq!(&new_source, f),
            None => {
                prop_assert!(new_source >= *normalizer.floor());
                prop_assert!(new_source >= original_source);
            }
        }
        prop_assert!(new_target >= new_source);
    }

    /// A second pass changes nothing.
    #[test]
    fn normalize_is_idempotent(
        source in arb_level_text(),
        target in arb_level_text(),
        floor in proptest::option::of(arb_level_text()),
    ) {
        let floor: Option<Level> = floor.map(|f| f.parse().expect("floor"));
        let normalizer = CompilerDirectiveNormalizer::new(floor.as_ref());

        let mut config = compiler_cfg(&source, &target);
        normalizer.normalize_location(&mut config);
        let once = config.clone();

        let outcome = normalizer.normalize_location(&mut config);
        prop_assert_eq!(outcome, LocationOutcome::Normalized { changed: false });
        prop_assert_eq!(config, once);
    }

    /// Customizing an already customized descriptor is a no-op.
    #[test]
    fn customize_is_idempotent(
        deps in arb_dependencies(),
        source in arb_level_text(),
        target in arb_level_text(),
        skip_tests in any::<bool>(),
    ) {
        let customizer = ModelCustomizer::new(BuildPolicy { skip_tests, compiler_source: None });
        let mut model = Model {
            dependencies: deps,
            build: Some(Build {
                plugins: vec![
                    Plugin::new("org.apache.maven.plugins", "maven-compiler-plugin")
                        .with_configuration(compiler_cfg(&source, &target)),
                ],
                ..Default::default()
            }),
            ..Default::default()
        };

        customizer.customize(&mut model);
        let once = model.clone();
        customizer.customize(&mut model);
        prop_assert_eq!(model, once);
    }
}

/// Long specs where every `-` or digit/letter switch opens another nested list.
fn arb_deep_spec() -> impl Strategy<Value = (String, bool)> {
    (
        prop::sample::select(vec!["-1", "a1", ".0-", "-rc"]),
        1_000usize..60_000,
        any::<bool>(),
    )
        .prop_map(|(step, n, bracketed)| {
            let body = format!("1{}", step.repeat(n));
            if bracketed {
                (format!("[{body},2)"), true)
            } else {
                (body, false)
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Depth of a spec never matters: plain ones come back verbatim, ranges default.
    #[test]
    fn resolve_is_total_on_deep_specs((spec, bracketed) in arb_deep_spec()) {
        let resolved = VersionResolver.resolve(&Coordinate::new("g", "a"), Some(&spec));
        if bracketed {
            prop_assert_eq!(resolved, DEFAULT_VERSION);
        } else {
            prop_assert_eq!(resolved, spec);
        }
    }
}

#[test]
fn resolve_handles_100kb_versions() {
    let coordinate = Coordinate::new("g", "a");
    let plain = format!("1{}", "-1".repeat(50_000));
    assert_eq!(VersionResolver.resolve(&coordinate, Some(&plain)), plain);

    let ranged = format!("[{plain},2)");
    assert_eq!(
        VersionResolver.resolve(&coordinate, Some(&ranged)),
        DEFAULT_VERSION
    );

    let mixed = "1a".repeat(50_000);
    assert_eq!(VersionResolver.resolve(&coordinate, Some(&mixed)), mixed);
}
