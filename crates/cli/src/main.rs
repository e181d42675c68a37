use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tieline_diagram::{
    Config, DiagramDataset, GxCurveSample, compute_diagram, sample_mixing_energy,
};
use tieline_solvers::bisection;
use tieline_thermo::{BinarySystem, MixingModel, Side, SubregularCoefficients};
use tracing::{info, warn};

mod error;

use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "tieline")]
#[command(about = "Binary solid/liquid phase diagrams from a sub-regular solution model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute liquidus and solidus on both sides of the azeotrope
    Diagram {
        /// Path to the system JSON file
        system_path: PathBuf,
        /// Temperature step in K
        #[arg(long, default_value_t = 1.0)]
        step: f64,
        /// Temperature uncertainty in K
        #[arg(long, default_value_t = 0.005)]
        delta_t: f64,
        /// Normalized Gibbs energy resolution
        #[arg(long, default_value_t = 5e-8)]
        delta_g: f64,
        /// Composition margin and convergence step
        #[arg(long, default_value_t = 1e-8)]
        epsilon: f64,
        /// Maximum slope refinements per temperature
        #[arg(long, default_value_t = 200)]
        max_iters: usize,
        /// Maximum halvings per inner root search
        #[arg(long, default_value_t = 200)]
        bisection_iters: usize,
        /// Bracket width at which an inner root search stops
        #[arg(long, default_value_t = 1e-15)]
        x_abs_tol: f64,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sample both mixing Gibbs energy curves at one temperature
    Gibbs {
        /// Path to the system JSON file
        system_path: PathBuf,
        /// Temperature in K
        #[arg(long)]
        temperature: f64,
        #[arg(long, default_value_t = 0.001)]
        xmin: f64,
        #[arg(long, default_value_t = 0.999)]
        xmax: f64,
        #[arg(long, default_value_t = 0.001)]
        xstep: f64,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the fitted interaction coefficients
    Coefficients {
        /// Path to the system JSON file
        system_path: PathBuf,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Diagram {
            system_path,
            step,
            delta_t,
            delta_g,
            epsilon,
            max_iters,
            bisection_iters,
            x_abs_tol,
            output,
        } => {
            let bisection = bisection::Config::new(bisection_iters, x_abs_tol)?;
            let config = Config::new(delta_t, delta_g, epsilon, max_iters, bisection)?;
            cmd_diagram(&system_path, step, &config, output.as_deref())
        }
        Commands::Gibbs {
            system_path,
            temperature,
            xmin,
            xmax,
            xstep,
            output,
        } => cmd_gibbs(
            &system_path,
            temperature,
            [xmin, xmax, xstep],
            output.as_deref(),
        ),
        Commands::Coefficients { system_path } => cmd_coefficients(&system_path),
    }
}

fn load_system(path: &Path) -> CliResult<BinarySystem> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn cmd_diagram(
    system_path: &Path,
    step: f64,
    config: &Config,
    output: Option<&Path>,
) -> CliResult<()> {
    let system = load_system(system_path)?;
    let coefficients = SubregularCoefficients::fit(&system)?;
    let diagram = compute_diagram(&system, &coefficients, step, config)?;

    info!(levels = diagram.len(), "diagram computed");
    for side in [Side::Left, Side::Right] {
        if let Some(failure) = diagram.failure(side) {
            warn!(
                ?side,
                temperature = failure.temperature,
                error = %failure.error,
                "branch stops early"
            );
        }
    }
    emit(&diagram_csv(&diagram), output)
}

fn cmd_gibbs(
    system_path: &Path,
    temperature: f64,
    [xmin, xmax, xstep]: [f64; 3],
    output: Option<&Path>,
) -> CliResult<()> {
    let system = load_system(system_path)?;
    let coefficients = SubregularCoefficients::fit(&system)?;
    let model = MixingModel::new(&system, coefficients);
    let samples = sample_mixing_energy(&model, temperature, xmin, xmax, xstep)?;

    emit(&gibbs_csv(&samples), output)
}

fn cmd_coefficients(system_path: &Path) -> CliResult<()> {
    let system = load_system(system_path)?;
    let coefficients = SubregularCoefficients::fit(&system)?;

    println!("c0 = {}", coefficients.c0);
    println!("c1 = {}", coefficients.c1);
    println!("a0 = {}", coefficients.a0);
    println!("a1 = {}", coefficients.a1);
    Ok(())
}

fn emit(csv: &str, output: Option<&Path>) -> CliResult<()> {
    if let Some(path) = output {
        std::fs::write(path, csv).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        println!("✓ Wrote {} lines to {}", csv.lines().count(), path.display());
    } else {
        print!("{csv}");
    }
    Ok(())
}

fn diagram_csv(diagram: &DiagramDataset) -> String {
    let mut csv = String::from(
        "temperature_k,left_liquidus,left_solidus,left_degenerate,\
         right_liquidus,right_solidus,right_degenerate\n",
    );
    for entry in diagram.entries() {
        csv.push_str(&entry.temperature.to_string());
        for point in [entry.left, entry.right] {
            match point {
                Some(point) => csv.push_str(&format!(
                    ",{},{},{}",
                    point.liquidus, point.solidus, point.degenerate
                )),
                None => csv.push_str(",,,"),
            }
        }
        csv.push('\n');
    }
    csv
}

fn gibbs_csv(samples: &[GxCurveSample]) -> String {
    let mut csv = String::from("x,liquid,solid,liquid_slope,solid_slope\n");
    for sample in samples {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            sample.x, sample.liquid, sample.solid, sample.liquid_slope, sample.solid_slope
        ));
    }
    csv
}
