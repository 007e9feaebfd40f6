use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use cmd::commands::{check_command, downstream_command, render_command, upstream_command};
use cmd::common::CatalogContext;
use cmd::template_utils::parse_variables;

/// Configuration file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "catalog.yaml";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "thmcat")]
/// Render and maintain catalogs of theorem formalizations
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog configuration (default: ./catalog.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Template variable for the configuration file, as key=value
    #[arg(short = 'v', long = "var", global = true)]
    variables: Vec<String>,

    /// Directory of theorem files, overriding the configuration
    #[arg(long, global = true)]
    theorems: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the HTML table views
    Render {
        /// MSC label table, overriding the configuration
        #[arg(long)]
        msc: Option<PathBuf>,
        /// Output directory, overriding the configuration
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Fail on the first malformed or duplicate theorem file
        #[arg(long)]
        strict: bool,
    },
    /// Validate every theorem file
    Check,
    /// Export Lean formalizations in mathlib's 1000.yaml format
    Downstream {
        /// File to write
        #[arg(short, long, default_value = "generated-1000.yaml")]
        output: PathBuf,
    },
    /// Import Lean formalizations from mathlib's 1000.yaml
    Upstream {
        /// The 1000.yaml file to read
        input: PathBuf,
        /// Report changes without rewriting any file
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    diagnostics::init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(|| {
        let default = Path::new(DEFAULT_CONFIG);
        default.is_file().then(|| default.to_path_buf())
    });
    let mut ctx = CatalogContext::new(config_path);
    ctx.variables = parse_variables(&cli.variables)?;
    ctx.theorems = cli.theorems.clone();

    let print = |line: &str| println!("{}", line);

    match cli.command {
        Commands::Render {
            msc,
            output,
            strict,
        } => {
            ctx.msc = msc;
            ctx.output = output;
            render_command(&ctx, strict, print)
        }
        Commands::Check => check_command(&ctx, print),
        Commands::Downstream { output } => downstream_command(&ctx, &output, print),
        Commands::Upstream { input, dry_run } => upstream_command(&ctx, &input, dry_run, print),
    }
}
