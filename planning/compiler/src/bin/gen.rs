use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::Level;

use domos_compiler::viz::exclude_actions_json;
use domos_compiler::{BuildingConfig, compile};
use domos_model::Res;

/// Compiles a building configuration into a PDDL planning task.
///
/// Writes `domain.pddl`, `problem.pddl` and `exclude_actions.json` (plan
/// viewer hint) to the output directory.
#[derive(Debug, Parser)]
#[command(name = "domos-gen", rename_all = "kebab-case")]
struct Args {
    /// Path to the building configuration (JSON).
    config: PathBuf,
    /// Directory receiving the generated files.
    #[arg(long, short, default_value = ".")]
    output: PathBuf,
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Res<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    anyhow::ensure!(args.config.exists(), "Configuration file {} does not exist", args.config.display());
    let text = fs::read_to_string(&args.config)?;
    let config: BuildingConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", args.config.display()))?;

    let compilation = compile(&config)?;

    fs::create_dir_all(&args.output)?;
    fs::write(args.output.join("domain.pddl"), &compilation.domain)?;
    fs::write(args.output.join("problem.pddl"), &compilation.problem)?;
    fs::write(
        args.output.join("exclude_actions.json"),
        exclude_actions_json(&compilation.map)?,
    )?;

    println!("wrote domain.pddl, problem.pddl, exclude_actions.json to {}", args.output.display());

    Ok(())
}
