mod config;
mod descriptor;
mod validate;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use config::ConfigMerger;
use descriptor::DescriptorFormat;
use fs_err as fs;
use modelfix_domain::{
    BuildPolicy, CustomizingValidator, ModelCustomizer, Severity, VersionResolver,
};
use modelfix_types::Coordinate;
use std::io::Write;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use validate::StructuralValidator;

#[derive(Debug, Parser)]
#[command(
    name = "modelfix",
    version,
    about = "Customize build descriptors for reproducible, range-free packaging."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Customize a descriptor and run structural validation over the result.
    Customize(CustomizeArgs),
    /// Print the concrete version a coordinate's version spec resolves to.
    Resolve(ResolveArgs),
    /// Print the effective build policy (config file merged with flags).
    ShowPolicy(PolicyArgs),
}

#[derive(Debug, Args)]
struct PolicyArgs {
    /// Config file (default: ./modelfix.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Drop test-scoped dependencies.
    #[arg(long, default_value_t = false)]
    skip_tests: bool,

    /// Pin every compiler configuration's source level to this value.
    #[arg(long, env = "MODELFIX_COMPILER_SOURCE")]
    compiler_source: Option<String>,
}

#[derive(Debug, Parser)]
struct CustomizeArgs {
    /// Descriptor to customize (JSON or YAML).
    input: Utf8PathBuf,

    /// Where to write the customized descriptor (default: stdout).
    #[arg(long)]
    out: Option<Utf8PathBuf>,

    /// Descriptor format (default: inferred from the input file extension).
    #[arg(long, value_enum)]
    format: Option<DescriptorFormat>,

    /// Also write a JSON summary of what was changed.
    #[arg(long)]
    report: Option<Utf8PathBuf>,

    #[command(flatten)]
    policy: PolicyArgs,
}

#[derive(Debug, Parser)]
struct ResolveArgs {
    /// Coordinate as `groupId:artifactId`.
    coordinate: String,

    /// Version spec; omit to resolve a missing version.
    version: Option<String>,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Customize(args) => cmd_customize(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::ShowPolicy(args) => cmd_show_policy(args),
    }
}

fn load_policy(args: &PolicyArgs) -> anyhow::Result<BuildPolicy> {
    let file_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(Utf8Path::new("."))
            .context("load modelfix.toml config")?,
    };
    ConfigMerger::new(file_config)
        .merge_policy_args(args.skip_tests, args.compiler_source.as_deref())
}

fn cmd_customize(args: CustomizeArgs) -> anyhow::Result<()> {
    let policy = load_policy(&args.policy)?;
    let format = args
        .format
        .unwrap_or_else(|| DescriptorFormat::from_path(&args.input));

    let mut model = descriptor::read_model(&args.input, format)?;

    let hook = CustomizingValidator::new(ModelCustomizer::new(policy), StructuralValidator);
    let mut problems = Vec::new();
    let report = hook.validate_effective_model(&mut model, &mut problems);

    for problem in &problems {
        warn!("{}: {}", args.input, problem);
    }
    let errors = problems
        .iter()
        .filter(|p| p.severity == Severity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("{} failed validation with {} error(s)", args.input, errors);
    }

    let rendered = descriptor::render_model(&model, format)?;
    match &args.out {
        Some(out) => {
            fs::write(out, &rendered).with_context(|| format!("write {}", out))?;
            info!("wrote customized descriptor to {}", out);
        }
        None => {
            std::io::stdout()
                .write_all(rendered.as_bytes())
                .context("write descriptor to stdout")?;
        }
    }

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report).context("serialize report")?;
        fs::write(path, json + "\n").with_context(|| format!("write {}", path))?;
        info!("wrote report to {}", path);
    }

    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let (group_id, artifact_id) = args
        .coordinate
        .split_once(':')
        .with_context(|| format!("coordinate '{}' is not groupId:artifactId", args.coordinate))?;
    let coordinate = Coordinate::new(group_id, artifact_id);
    println!(
        "{}",
        VersionResolver.resolve(&coordinate, args.version.as_deref())
    );
    Ok(())
}

fn cmd_show_policy(args: PolicyArgs) -> anyhow::Result<()> {
    let policy = load_policy(&args)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&policy).context("serialize policy")?
    );
    Ok(())
}
