//! Atom-of-Thought graph runner CLI.
//!
//! Loads an AoT graph (`{"nodes": [...]}`), checks it, and executes every
//! node once in dependency order, writing a JSON report of the results.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use aot_runner::core::types::NodeOutcome;
use aot_runner::executor::failures;
use aot_runner::exit_codes;
use aot_runner::io::config::load_config;
use aot_runner::io::graph_store::LoadOptions;
use aot_runner::io::init::{AotPaths, InitOptions, init_aot};
use aot_runner::logging;
use aot_runner::run::{RunRequest, resolve, run_graph};
use aot_runner::tools::tool_schema;
use aot_runner::validate::validate_graph_file;

#[derive(Parser)]
#[command(
    name = "aot-runner",
    version,
    about = "Dependency-ordered runner for Atom-of-Thought action graphs"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.aot/` with a default config, the graph schema, and an example graph.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the tool descriptions offered to a planning model.
    Tools,
    /// Check a graph file against the schema, invariants, and for cycles.
    Validate(GraphArgs),
    /// Print node ids in execution order.
    Order(GraphArgs),
    /// Execute every node and write a results report.
    Run {
        #[command(flatten)]
        graph: GraphArgs,
        /// Config file (defaults to `.aot/config.toml`).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Report path (defaults to `<report.dir>/<graph>.results.json`).
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct GraphArgs {
    /// Graph document, or raw model output with `--extract`.
    path: PathBuf,
    /// Recover the JSON document from surrounding model text.
    #[arg(long)]
    extract: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(cli.command) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(command: Command) -> Result<i32> {
    let root = std::env::current_dir()?;
    match command {
        Command::Init { force } => {
            let paths = init_aot(&root, &InitOptions { force })?;
            println!("initialized {}", paths.aot_dir.display());
            Ok(exit_codes::OK)
        }
        Command::Tools => {
            println!("{}", serde_json::to_string_pretty(&tool_schema())?);
            Ok(exit_codes::OK)
        }
        Command::Validate(args) => {
            let outcome = validate_graph_file(&args.path, load_options(&root, &args)?)?;
            for dropped in &outcome.dropped {
                eprintln!("dropped: {}", dropped);
            }
            println!("ok: {} nodes", outcome.order.len());
            Ok(exit_codes::OK)
        }
        Command::Order(args) => {
            let outcome = validate_graph_file(&args.path, load_options(&root, &args)?)?;
            for id in outcome.order {
                println!("{}", id);
            }
            Ok(exit_codes::OK)
        }
        Command::Run {
            graph,
            config,
            report,
        } => {
            let outcome = run_graph(&RunRequest {
                graph_path: resolve(&root, &graph.path),
                extract: graph.extract,
                config_path: config.map(|path| resolve(&root, &path)),
                report_path: report.map(|path| resolve(&root, &path)),
                root,
            })?;
            if outcome.dropped > 0 {
                eprintln!("dropped {} malformed node(s)", outcome.dropped);
            }
            for result in &outcome.report.results {
                if let NodeOutcome::Success { result: value } = &result.outcome {
                    println!("ok     {} {} -> {}", result.node_id, result.action, value);
                }
            }
            for failure in failures(&outcome.report.results) {
                println!("failed {failure}");
            }
            println!("report: {}", outcome.report_path.display());
            if !outcome.report.summary().all_succeeded() {
                return Ok(exit_codes::NODE_FAILURES);
            }
            Ok(exit_codes::OK)
        }
    }
}

/// `validate`/`order` honor the salvage setting of the project config.
fn load_options(root: &std::path::Path, args: &GraphArgs) -> Result<LoadOptions> {
    let cfg = load_config(&AotPaths::new(root).config_path)?;
    Ok(LoadOptions {
        extract: args.extract,
        salvage: cfg.plan.salvage_malformed_nodes,
    })
}
