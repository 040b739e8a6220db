use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use phpantom_codegen::{ArrayStyle, Config, FunctionDeclaration, render_members};

/// Render PHP method declarations described as JSON.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file holding one method model or an array of them
    model: PathBuf,

    /// TOML configuration file with a `[render]` section
    #[arg(long)]
    config: Option<PathBuf>,

    /// Indent with this many spaces instead of the configured indentation
    #[arg(long)]
    indent: Option<usize>,

    /// Emit `[]` array literals instead of `array()`
    #[arg(long)]
    short_arrays: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(width) = cli.indent {
        config.render.indentation = " ".repeat(width);
    }
    if cli.short_arrays {
        config.render.array_style = ArrayStyle::Short;
    }

    let text = std::fs::read_to_string(&cli.model)?;
    let json: serde_json::Value = serde_json::from_str(&text)?;
    let models = match json {
        serde_json::Value::Array(items) => items,
        single => vec![single],
    };
    debug!("rendering {} declaration(s) from {}", models.len(), cli.model.display());

    let decls = models
        .into_iter()
        .map(FunctionDeclaration::from_json_value)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(render_members(&decls, &config.render))
}

// ─── Tests ──────────────────────────────────────────────────────────────────
