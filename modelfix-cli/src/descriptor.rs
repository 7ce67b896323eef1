//! Reading and writing descriptors as JSON or YAML.

use anyhow::Context;
use camino::Utf8Path;
use fs_err as fs;
use modelfix_types::Model;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DescriptorFormat {
    Json,
    Yaml,
}

impl DescriptorFormat {
    /// `.yaml`/`.yml` files are YAML; everything else is read as JSON.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DescriptorFormat::Yaml
            }
            _ => DescriptorFormat::Json,
        }
    }
}

pub fn read_model(path: &Utf8Path, format: DescriptorFormat) -> anyhow::Result<Model> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    parse_model(&contents, format).with_context(|| format!("parse descriptor {}", path))
}

pub fn parse_model(contents: &str, format: DescriptorFormat) -> anyhow::Result<Model> {
    let model = match format {
        DescriptorFormat::Json => serde_json::from_str(contents).context("invalid JSON")?,
        DescriptorFormat::Yaml => serde_yaml::from_str(contents).context("invalid YAML")?,
    };
    Ok(model)
}

pub fn render_model(model: &Model, format: DescriptorFormat) -> anyhow::Result<String> {
    let mut out = match format {
        DescriptorFormat::Json => serde_json::to_string_pretty(model).context("serialize JSON")?,
        DescriptorFormat::Yaml => serde_yaml::to_string(model).context("serialize YAML")?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}
