use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::error::Result;
use crate::render::{RenderArgs, run_render};
use crate::script::{ScriptArgs, run_script};

#[derive(Debug, Parser)]
#[command(
    name = "fdnd-demo",
    about = "Drive FrankenDnD lists from the command line",
    version
)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a list repeatedly and compare the passes.
    Render(RenderArgs),

    /// Run a gesture script through the control panel.
    Script(ScriptArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.log_json);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let output = execute(&cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Run a command and return its JSON report.
pub fn execute(command: &Commands) -> Result<Value> {
    let value = match command {
        Commands::Render(args) => serde_json::to_value(run_render(args)?)?,
        Commands::Script(args) => serde_json::to_value(run_script(args)?)?,
    };
    Ok(value)
}
