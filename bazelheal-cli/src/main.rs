mod config;

use anyhow::Context;
use bazelheal_logscan::{LogScan, scan_reader};
use bazelheal_render::render_commands;
use bazelheal_resolve::Resolver;
use bazelheal_types::Dependency;
use bazelheal_workspace::ShellWorkspace;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use fs_err as fs;
use std::io::{self, BufReader};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "bazelheal",
    version,
    about = "Heals missing-dependency failures in Bazel Java builds."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rebuild the dependency catalog cache and exit.
    Refresh(RefreshArgs),
    /// Scan a build log and emit buildozer repair commands.
    Resolve(ResolveArgs),
}

#[derive(Debug, Parser)]
struct RefreshArgs {
    /// Bazel workspace directory (default: current directory).
    #[arg(long)]
    workspace: Option<Utf8PathBuf>,

    /// Catalog cache file (default: <workspace>/.healdb).
    #[arg(long)]
    cache: Option<Utf8PathBuf>,

    /// Source tree root (default: the workspace directory).
    #[arg(long)]
    source_root: Option<Utf8PathBuf>,

    /// Source file extension.
    #[arg(long)]
    source_extension: Option<String>,
}

#[derive(Debug, Parser)]
struct ResolveArgs {
    /// Bazel workspace directory (default: current directory).
    #[arg(long)]
    workspace: Option<Utf8PathBuf>,

    /// Catalog cache file (default: <workspace>/.healdb).
    #[arg(long)]
    cache: Option<Utf8PathBuf>,

    /// Build log file; stdin when omitted.
    #[arg(long)]
    log: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    // Repair commands own stdout; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Refresh(args) => cmd_refresh(args),
        Command::Resolve(args) => cmd_resolve(args),
    }
}

fn cmd_refresh(args: RefreshArgs) -> anyhow::Result<()> {
    let settings = merge_config(
        args.workspace.as_deref(),
        args.cache.as_deref(),
        args.source_root.as_deref(),
        args.source_extension.as_deref(),
    )?;

    let mut deps = bazelheal_catalog::source_dependencies(
        &settings.source_root,
        &settings.source_extension,
        &settings.layout_marker,
    )
    .context("scan source tree")?;
    info!(count = deps.len(), "source dependencies found");

    let workspace = ShellWorkspace::new(settings.workspace.clone());
    let external =
        bazelheal_catalog::external_dependencies(&workspace).context("list external dependencies")?;
    info!(count = external.len(), "external dependencies found");
    deps.extend(external);

    bazelheal_catalog::write_cache(&settings.cache_file, &deps).context("write catalog cache")?;

    // A refresh never touches the log: catalog queries and builds must not
    // run against the same workspace concurrently.
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let settings = merge_config(args.workspace.as_deref(), args.cache.as_deref(), None, None)?;

    let catalog: Vec<Dependency> = bazelheal_catalog::read_cache(&settings.cache_file)
        .context("load catalog cache (run `bazelheal refresh` first)")?;
    info!(count = catalog.len(), "catalog loaded");

    let scan = match &args.log {
        Some(path) => {
            let file = fs::File::open(path).with_context(|| format!("open log {path}"))?;
            scan_reader(BufReader::new(file)).context("scan build log")?
        }
        None => scan_reader(io::stdin().lock()).context("scan build log")?,
    };

    let problems = match scan {
        LogScan::Passthrough(line) => {
            // The build tool already suggested the fix; relay it verbatim.
            println!("{line}");
            return Ok(());
        }
        LogScan::Problems(problems) => problems,
    };
    info!(
        rule = problems.bazel_rule.as_deref().unwrap_or("<none>"),
        missing = problems.missing_class.len(),
        "build problems extracted"
    );

    let workspace = ShellWorkspace::new(settings.workspace.clone());
    let commands = Resolver::new()
        .resolve(&problems, &catalog, &workspace)
        .context("resolve missing classes")?;

    for line in render_commands(&commands) {
        println!("{line}");
    }
    Ok(())
}

fn merge_config(
    workspace: Option<&Utf8Path>,
    cache: Option<&Utf8Path>,
    source_root: Option<&Utf8Path>,
    source_extension: Option<&str>,
) -> anyhow::Result<config::Settings> {
    // The config file lives in the workspace the caller pointed at.
    let discovery_dir = workspace.unwrap_or(Utf8Path::new("."));
    let file_config = config::load_or_default(discovery_dir).context("load bazelheal.toml")?;
    Ok(ConfigMerger::new(file_config).merge(workspace, cache, source_root, source_extension))
}
