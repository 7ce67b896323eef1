use crate::config::ConfigNode;
use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Descriptor keys that are not modelled, carried through customization unchanged.
pub type Extra = BTreeMap<String, serde_json::Value>;

/// An already-parsed project descriptor.
///
/// Only the parts that customization reads or rewrites are modelled. Everything else,
/// the project's own identity included, is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<Build>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Model {
    /// `group:artifact` of the project itself, with `?` for missing parts.
    pub fn id(&self) -> String {
        format!(
            "{}:{}",
            self.group_id.as_deref().unwrap_or("?"),
            self.artifact_id.as_deref().unwrap_or("?")
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    #[serde(default)]
    pub extensions: Vec<Extension>,

    #[serde(default)]
    pub plugins: Vec<Plugin>,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(flatten)]
    pub coordinate: Coordinate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Dependency {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            coordinate: Coordinate::new(group_id, artifact_id),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    #[serde(flatten)]
    pub coordinate: Coordinate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Extension {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            coordinate: Coordinate::new(group_id, artifact_id),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    #[serde(flatten)]
    pub coordinate: Coordinate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ConfigNode>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub executions: Vec<PluginExecution>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Plugin {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            coordinate: Coordinate::new(group_id, artifact_id),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_configuration(mut self, configuration: ConfigNode) -> Self {
        self.configuration = Some(configuration);
        self
    }

    pub fn with_execution(mut self, execution: PluginExecution) -> Self {
        self.executions.push(execution);
        self
    }

    /// Every configuration location: the plugin-level block first, then one per execution.
    ///
    /// Absent blocks are yielded as `None` so callers can account for them.
    pub fn configurations_mut(&mut self) -> impl Iterator<Item = Option<&mut ConfigNode>> {
        std::iter::once(self.configuration.as_mut())
            .chain(self.executions.iter_mut().map(|e| e.configuration.as_mut()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginExecution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ConfigNode>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl PluginExecution {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_configuration(mut self, configuration: ConfigNode) -> Self {
        self.configuration = Some(configuration);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dependency_reads_camel_case_and_flattens_coordinate() {
        let dep: Dependency = serde_json::from_value(serde_json::json!({
            "groupId": "junit",
            "artifactId": "junit",
            "version": "4.12",
            "scope": "test"
        }))
        .expect("deserialize");

        assert_eq!(dep.coordinate, Coordinate::new("junit", "junit"));
        assert_eq!(dep.version.as_deref(), Some("4.12"));
        assert_eq!(dep.scope.as_deref(), Some("test"));
    }

    #[test]
    fn model_defaults_missing_sections() {
        let model: Model = serde_json::from_str("{}").expect("deserialize");
        assert!(model.dependencies.is_empty());
        assert!(model.build.is_none());
        assert_eq!(model.id(), "?:?");
    }

    #[test]
    fn plugin_yaml_with_executions() {
        let yaml = r#"
groupId: org.apache.maven.plugins
artifactId: maven-compiler-plugin
configuration:
  name: configuration
  children:
    - name: source
      value: "1.6"
executions:
  - id: default-testCompile
    goals: [testCompile]
  - id: java8
    configuration:
      name: configuration
"#;
        let plugin: Plugin = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(plugin.executions.len(), 2);
        assert!(plugin.executions[0].configuration.is_none());
        assert_eq!(
            plugin
                .configuration
                .as_ref()
                .and_then(|c| c.child_value("source")),
            Some("1.6")
        );
    }

    #[test]
    fn configurations_mut_yields_plugin_block_then_executions() {
        let mut plugin = Plugin::new("g", "a")
            .with_execution(PluginExecution::new("one").with_configuration(ConfigNode::new("c1")))
            .with_execution(PluginExecution::new("two"));

        let names: Vec<Option<String>> = plugin
            .configurations_mut()
            .map(|c| c.map(|n| n.name.clone()))
            .collect();
        assert_eq!(names, vec![None, Some("c1".to_string()), None]);
    }

    #[test]
    fn absent_optional_fields_are_not_serialized() {
        let json = serde_json::to_value(Extension::new("g", "a")).expect("serialize");
        assert_eq!(json, serde_json::json!({"groupId": "g", "artifactId": "a"}));
    }

    #[test]
    fn unmodelled_keys_round_trip() {
        let input = serde_json::json!({
            "name": "My App",
            "packaging": "jar",
            "dependencies": [{
                "groupId": "g",
                "artifactId": "a",
                "version": "1.0",
                "classifier": "tests",
                "type": "test-jar",
                "optional": true
            }],
            "build": {
                "finalName": "app",
                "plugins": [{
                    "groupId": "g",
                    "artifactId": "p",
                    "inherited": false,
                    "executions": [{ "id": "e", "phase": "verify" }]
                }]
            }
        });

        let model: Model = serde_json::from_value(input.clone()).expect("deserialize");
        let dep = &model.dependencies[0];
        assert_eq!(dep.coordinate, Coordinate::new("g", "a"));
        assert_eq!(dep.extra.get("classifier"), Some(&serde_json::json!("tests")));
        assert!(!dep.extra.contains_key("groupId"));
        assert!(!dep.extra.contains_key("version"));

        let mut expected = input;
        expected["build"]["extensions"] = serde_json::json!([]);
        assert_eq!(serde_json::to_value(&model).expect("serialize"), expected);
    }

    #[test]
    fn unmodelled_keys_survive_yaml() {
        let yaml = "packaging: pom\ndependencies:\n  - groupId: g\n    artifactId: a\n    type: test-jar\n";
        let model: Model = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(model.extra.get("packaging"), Some(&serde_json::json!("pom")));

        let again: Model =
            serde_yaml::from_str(&serde_yaml::to_string(&model).expect("serialize"))
                .expect("deserialize");
        assert_eq!(again, model);
        assert_eq!(
            again.dependencies[0].extra.get("type"),
            Some(&serde_json::json!("test-jar"))
        );
    }
}
