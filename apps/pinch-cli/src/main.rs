mod error;
mod report;

use clap::{Parser, Subcommand, ValueEnum};
use error::{CliError, CliResult};
use pinch_engine::{PinchAnalysis, PinchConfig, PinchRule};
use pinch_project::StreamTable;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pinch-cli")]
#[command(about = "Pinch analysis of hot and cold process streams", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CurveKind {
    /// Composite curves on the shifted temperature scale
    Shifted,
    /// Composite curves at actual stream temperatures
    Actual,
    /// Grand composite curve
    Grand,
}

#[derive(clap::Args)]
struct AnalysisArgs {
    /// Stream table (.csv, .yaml, .yml or .json)
    streams_path: PathBuf,
    /// Enthalpies at or below this magnitude are treated as zero
    #[arg(long, default_value_t = pinch_core::ZERO_TOL)]
    zero_tol: f64,
    /// Pinch temperature tie-break
    #[arg(long, default_value_t = PinchRule::FirstRowUpper)]
    pinch_rule: PinchRule,
}

impl AnalysisArgs {
    fn config(&self) -> PinchConfig {
        PinchConfig::default()
            .with_zero_tol(self.zero_tol)
            .with_pinch_rule(self.pinch_rule)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a stream table
    Validate {
        /// Stream table (.csv, .yaml, .yml or .json)
        streams_path: PathBuf,
    },
    /// Compute energy targets
    Analyze {
        #[command(flatten)]
        args: AnalysisArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Also print the shifted temperatures, problem table and cascades
        #[arg(long)]
        tables: bool,
    },
    /// Export a curve as CSV
    Curves {
        #[command(flatten)]
        args: AnalysisArgs,
        /// Which curve to export
        #[arg(long, value_enum, default_value_t = CurveKind::Shifted)]
        curve: CurveKind,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the heat cascade with temperature pockets removed
    Pockets {
        #[command(flatten)]
        args: AnalysisArgs,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { streams_path } => cmd_validate(&streams_path),
        Commands::Analyze {
            args,
            format,
            tables,
        } => cmd_analyze(&args, format, tables),
        Commands::Curves {
            args,
            curve,
            output,
        } => cmd_curves(&args, curve, output.as_deref()),
        Commands::Pockets { args } => cmd_pockets(&args),
    }
}

fn load_table(path: &Path) -> CliResult<StreamTable> {
    tracing::debug!(path = %path.display(), "loading stream table");
    pinch_project::load(path).map_err(|source| CliError::Load {
        path: path.to_path_buf(),
        source,
    })
}

fn run_analysis(args: &AnalysisArgs) -> CliResult<PinchAnalysis> {
    let table = load_table(&args.streams_path)?;
    let streams = table.to_stream_set()?;
    Ok(PinchAnalysis::run(streams, args.config())?)
}

fn cmd_validate(streams_path: &Path) -> CliResult<()> {
    println!("Validating stream table: {}", streams_path.display());
    let table = load_table(streams_path)?;
    let streams = table.to_stream_set()?;
    let hot = streams.iter().filter(|s| s.stream.is_hot()).count();
    println!(
        "✓ Stream table is valid ({} hot, {} cold, Tmin = {})",
        hot,
        streams.len() - hot,
        streams.tmin()
    );
    Ok(())
}

fn cmd_analyze(args: &AnalysisArgs, format: OutputFormat, tables: bool) -> CliResult<()> {
    let analysis = run_analysis(args)?;
    match format {
        OutputFormat::Text => {
            print!("{}", report::targets_text(analysis.targets()));
            if tables {
                println!();
                print!("{}", report::tables_text(&analysis));
            }
        }
        OutputFormat::Json => {
            let report = report::AnalysisReport::new(&analysis)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Yaml => {
            let report = report::AnalysisReport::new(&analysis)?;
            print!("{}", serde_yaml::to_string(&report)?);
        }
    }
    Ok(())
}

fn cmd_curves(args: &AnalysisArgs, curve: CurveKind, output: Option<&Path>) -> CliResult<()> {
    let analysis = run_analysis(args)?;
    let csv = match curve {
        CurveKind::Shifted => report::diagram_csv(analysis.shifted_composite()),
        CurveKind::Actual => report::diagram_csv(analysis.composite()),
        CurveKind::Grand => report::curve_csv(analysis.grand_composite()),
    };

    if let Some(path) = output {
        std::fs::write(path, &csv)?;
        println!(
            "✓ Exported {} points to {}",
            csv.lines().count() - 1,
            path.display()
        );
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_pockets(args: &AnalysisArgs) -> CliResult<()> {
    let analysis = run_analysis(args)?;
    let profile = analysis.cascade_profile()?;
    let deleted = analysis.deleted_pocket_cascade()?;

    println!("Heat cascade ({} intervals):", profile.len());
    print!("{}", report::profile_text(&profile));
    println!("\nWithout temperature pockets ({} intervals):", deleted.len());
    print!("{}", report::profile_text(&deleted));
    Ok(())
}
