#![no_main]

//! Structured descriptors through the customizer: a second pass changes nothing.

use libfuzzer_sys::fuzz_target;
use modelfix_domain::{BuildPolicy, ModelCustomizer};
use modelfix_types::{Build, ConfigNode, Dependency, Model, Plugin, PluginExecution};

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    skip_tests: bool,
    compiler_source: Option<String>,
    dependencies: Vec<(String, Option<String>, bool)>,
    compiler_blocks: Vec<(Option<String>, Option<String>)>,
    raw_json: Vec<u8>,
}

fn compiler_config(source: Option<String>, target: Option<String>) -> ConfigNode {
    let mut node = ConfigNode::new("configuration");
    if let Some(s) = source {
        node = node.with_child(ConfigNode::leaf("source", s));
    }
    if let Some(t) = target {
        node = node.with_child(ConfigNode::leaf("target", t));
    }
    node
}

fuzz_target!(|input: Input| {
    // Arbitrary JSON must never panic the descriptor reader.
    if let Ok(s) = std::str::from_utf8(&input.raw_json) {
        let _ = serde_json::from_str::<Model>(s);
    }

    let Ok(policy) = BuildPolicy::from_raw(input.skip_tests, input.compiler_source.as_deref())
    else {
        return;
    };

    let dependencies = input
        .dependencies
        .into_iter()
        .map(|(artifact, version, test)| {
            let mut dep = Dependency::new("fuzz", artifact);
            dep.version = version;
            if test {
                dep = dep.with_scope("test");
            }
            dep
        })
        .collect();

    let mut plugin = Plugin::new("org.apache.maven.plugins", "maven-compiler-plugin");
    for (i, (source, target)) in input.compiler_blocks.into_iter().enumerate() {
        let config = compiler_config(source, target);
        if i == 0 {
            plugin = plugin.with_configuration(config);
        } else {
            plugin = plugin.with_execution(
                PluginExecution::new(format!("exec-{i}")).with_configuration(config),
            );
        }
    }

    let mut model = Model {
        dependencies,
        build: Some(Build {
            plugins: vec![plugin],
            ..Default::default()
        }),
        ..Default::default()
    };

    let customizer = ModelCustomizer::new(policy);
    customizer.customize(&mut model);
    let once = model.clone();
    customizer.customize(&mut model);
    assert_eq!(model, once);
});
