use anyhow::Context;
use clap::{Parser, Subcommand};
use fs_err as fs;
use modelfix_domain::{
    COMPILER_PLUGIN_ARTIFACT_ID, COMPILER_PLUGIN_GROUP_ID, DEFAULT_VERSION, TEST_SCOPE,
    default_compiler_source,
};
use modelfix_types::{Build, Dependency, Model};
use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the constants the customizer matches and writes.
    PrintConstants,
    /// Scaffold a golden fixture case (tests/fixtures/<name>/input.json + policy.toml).
    NewFixture {
        name: String,
        #[arg(long, default_value = "tests/fixtures")]
        dir: PathBuf,
    },
    /// Bless golden fixtures (overwrite expected outputs).
    BlessFixtures,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintConstants => {
            println!("default_version = {DEFAULT_VERSION}");
            println!("test_scope = {TEST_SCOPE}");
            println!("compiler_plugin = {COMPILER_PLUGIN_GROUP_ID}:{COMPILER_PLUGIN_ARTIFACT_ID}");
            println!("compiler_source_floor = {}", default_compiler_source());
        }
        Command::NewFixture { name, dir } => {
            let case = new_fixture(&dir, &name)?;
            println!("initialized {}", case.display());
            println!("register '{name}' in modelfix-domain/tests/golden_fixtures.rs, then run bless-fixtures");
        }
        Command::BlessFixtures => {
            let status = ProcessCommand::new("cargo")
                .args(["test", "-p", "modelfix-domain", "--test", "golden_fixtures"])
                .env("MODELFIX_BLESS", "1")
                .status()
                .context("run golden fixture blessing")?;
            if !status.success() {
                anyhow::bail!("bless-fixtures failed");
            }
        }
    }
    Ok(())
}

fn new_fixture(root: &Path, name: &str) -> anyhow::Result<PathBuf> {
    let case = root.join(name);
    if case.exists() {
        anyhow::bail!("fixture {} already exists", case.display());
    }
    fs::create_dir_all(&case)?;

    let model = Model {
        group_id: Some("org.example".to_string()),
        artifact_id: Some(name.to_string()),
        version: Some("1.0".to_string()),
        dependencies: vec![Dependency::new("org.example", "lib").with_version("[1.0,2.0)")],
        build: Some(Build::default()),
        ..Default::default()
    };
    let json = serde_json::to_string_pretty(&model).context("serialize fixture input")?;
    fs::write(case.join("input.json"), json + "\n")?;
    fs::write(
        case.join("policy.toml"),
        "[build]\nskip_tests = false\n# compiler_source = \"1.8\"\n",
    )?;
    Ok(case)
}
