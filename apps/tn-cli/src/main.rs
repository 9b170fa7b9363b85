use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tn_app::{AppResult, Session, SolutionSummary, load_config};
use tracing::debug;

#[derive(Parser)]
#[command(name = "tn-cli")]
#[command(about = "TubeNet CLI - sample tube logistics between cities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a solution against every feasibility rule
    Check {
        /// Path to the session YAML file
        config_path: PathBuf,
    },
    /// Print per-tube volumes, aliquots and freezes
    Summary {
        /// Path to the session YAML file
        config_path: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate, then write the solution file
    Export {
        /// Path to the session YAML file
        config_path: PathBuf,
        /// Output path (defaults to the config's `output`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the arc chain a tube follows between two cities
    Path {
        /// Path to the session YAML file
        config_path: PathBuf,
        /// Tube as cohort/type/number, e.g. 0/SER/1
        #[arg(long)]
        tube: String,
        /// Start city number
        #[arg(long)]
        from: u32,
        /// End city number
        #[arg(long)]
        to: u32,
    },
}

fn main() -> AppResult<()> {
    // Verbosity follows RUST_LOG
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config_path } => cmd_check(&config_path),
        Commands::Summary { config_path, json } => cmd_summary(&config_path, json),
        Commands::Export {
            config_path,
            output,
        } => cmd_export(&config_path, output.as_deref()),
        Commands::Path {
            config_path,
            tube,
            from,
            to,
        } => cmd_path(&config_path, &tube, from, to),
    }
}

fn open(config_path: &Path) -> AppResult<Session> {
    let config = load_config(config_path)?;
    debug!(?config, "config loaded");
    Session::open(&config)
}

fn cmd_check(config_path: &Path) -> AppResult<()> {
    println!("Checking solution: {}", config_path.display());
    let session = open(config_path)?;
    match session.check() {
        Ok(()) => {
            println!("✓ Solution is feasible");
            Ok(())
        }
        Err(violation) => {
            println!("✗ Rule {} violated: {}", violation.rule(), violation);
            std::process::exit(1);
        }
    }
}

fn cmd_summary(config_path: &Path, json: bool) -> AppResult<()> {
    let session = open(config_path)?;
    let summary = session.summary()?;

    if json {
        println!("{}", summary.to_json()?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &SolutionSummary) {
    println!("Tubes:");
    for tube in &summary.tubes {
        let drawn = if tube.used_by_cohort { "  (drawn)" } else { "" };
        println!(
            "  {} {} #{}: {}/{}  arcs={}  aliquots={}{}",
            tube.cohort,
            tube.type_name,
            tube.number,
            tube.required,
            tube.capacity,
            tube.arcs,
            tube.aliquots,
            drawn
        );
    }

    println!("\nTotal aliquots: {}", summary.total_aliquots);
    println!("Total freezes:  {}", summary.total_freezes);
    match &summary.busiest_city {
        Some(busiest) => println!("Busiest city:   {} ({})", busiest.city, busiest.aliquots),
        None => println!("Busiest city:   none"),
    }
}

fn cmd_export(config_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let config = load_config(config_path)?;
    let session = Session::open(&config)?;
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => config.output_path(),
    };

    session.save_to(&path)?;
    println!("✓ Exported solution to {}", path.display());
    Ok(())
}

fn cmd_path(config_path: &Path, tube: &str, from: u32, to: u32) -> AppResult<()> {
    let session = open(config_path)?;
    let tube = session.find_tube(tube)?;
    let chain = session.find_path(from, to, tube)?;

    if chain.is_empty() {
        println!("{}", empty_route(from, to));
        return Ok(());
    }

    let instance = session.instance();
    for arc in chain {
        let arc = instance.arc(arc)?;
        println!(
            "  {} -> {}  ({})",
            instance.city(arc.origin)?.display_name(),
            instance.city(arc.destination)?.display_name(),
            arc.quantity
        );
    }
    Ok(())
}

/// A city reaches itself along an empty route.
fn empty_route(from: u32, to: u32) -> String {
    if from == to {
        format!("City {from} is its own destination (empty route)")
    } else {
        format!("No path from {from} to {to}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_city_is_an_empty_route() {
        assert_eq!(empty_route(3, 3), "City 3 is its own destination (empty route)");
        assert_eq!(empty_route(3, 4), "No path from 3 to 4");
    }
}
