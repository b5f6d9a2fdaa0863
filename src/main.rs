use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use rlcsim::output::{self, SaveSettings};
use rlcsim::params::{self, ParameterSet, PARAMETER_SPECS};
use rlcsim::plot::{self, PlotDescriptor};
use rlcsim::rlc::{AnalyticSolver, AnalyticSolverDescriptor, SeriesRlc, SeriesRlcDescriptor};
use rlcsim::{RunDescriptor, Simulation, SimulationDescriptor, SimulationParameters, TimeSeries};

/// Simulate the transient charge response of a series RLC circuit
#[derive(Parser)]
#[command(name = "rlcsim", version)]
struct Cli {
    /// Source voltage [V]
    #[arg(long, default_value = "10", allow_hyphen_values = true)]
    voltage: String,

    /// Capacitance [F]
    #[arg(short = 'C', long, default_value = "1e-8", allow_hyphen_values = true)]
    capacitance: String,

    /// Inductance [H]
    #[arg(short = 'L', long, default_value = "1e-2", allow_hyphen_values = true)]
    inductance: String,

    /// Resistance [Ω]
    #[arg(short = 'R', long, default_value = "7.5", allow_hyphen_values = true)]
    resistance: String,

    /// Simulation end time [s]
    #[arg(long, default_value = "0.001", allow_hyphen_values = true)]
    t_end: String,

    /// Simulation time step [s]
    #[arg(long, default_value = "0.000001", allow_hyphen_values = true)]
    t_step: String,

    /// Existing directory to store the data file in
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Name of the data file
    #[arg(long, default_value = "datafile.txt")]
    file: String,

    /// Where to write the SVG chart
    #[arg(long, default_value = "charge.svg")]
    plot: PathBuf,

    /// Skip drawing the chart
    #[arg(long)]
    no_plot: bool,

    /// Fail instead of replacing an existing data file
    #[arg(long)]
    no_clobber: bool,

    /// Print simulation info and progress
    #[arg(short, long)]
    verbose: bool,

    /// Print the allowed parameter ranges and exit
    #[arg(long)]
    show_limits: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if cli.show_limits {
        print_limits();
        return;
    }

    let raw: HashMap<&str, &str> = [
        ("V", cli.voltage.as_str()),
        ("C", cli.capacitance.as_str()),
        ("L", cli.inductance.as_str()),
        ("R", cli.resistance.as_str()),
        ("t_end", cli.t_end.as_str()),
        ("t_step", cli.t_step.as_str()),
    ]
    .into_iter()
    .collect();

    let validation = params::validate(&raw);
    let set = validation.parameter_set().unwrap_or_else(|| {
        eprint!("{}", validation.error_message());
        std::process::exit(1);
    });

    let series = run(&set, cli.verbose).unwrap_or_else(|e| {
        eprintln!("Simulation error: {}", e);
        std::process::exit(1);
    });

    let created = output::save(&series, &SaveSettings {
        filename: cli.dir.join(&cli.file),
        overwrite: !cli.no_clobber,
    });
    if !created {
        eprint!("{}", params::error_message(["input file"]));
        std::process::exit(1);
    }

    if !cli.no_plot {
        plot::plot_svg(&series, &cli.plot, PlotDescriptor::default()).unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        });
    }
}

fn run(set: &ParameterSet, verbose: bool) -> Result<TimeSeries, rlcsim::Error> {
    let circuit = SeriesRlc::new(SeriesRlcDescriptor {
        voltage: set.voltage,
        capacitance: set.capacitance,
        inductance: set.inductance,
        resistance: set.resistance,
    })?;

    if verbose {
        println!(
            "\n-- General Simulation Info --\n\
            α:            {:<9.3e} 1/s\n\
            ω₀:           {:<9.3e} rad/s\n\
            ω:            {:<9.3e} rad/s\n\
            Δt:           {:<9.2e} s\n",
            circuit.alpha(),
            circuit.natural_frequency(),
            circuit.damped_frequency(),
            set.t_step,
        );
    }

    let simulation = Simulation::new(SimulationDescriptor {
        solver: AnalyticSolver::new(AnalyticSolverDescriptor { circuit }),
        sim_params: SimulationParameters {
            t_end: set.t_end,
            t_step: set.t_step,
        },
    })?;

    simulation.run(RunDescriptor { verbose })
}

fn print_limits() {
    println!("{:<10}{:<10}{:<14}{:<14}", "Component", "Units", "Min value", "Max value");
    for spec in PARAMETER_SPECS.iter() {
        let min = if spec.inclusive_min { format!("{:e}", spec.min) } else { format!(">{:e}", spec.min) };
        let max = if spec.inclusive_max { format!("{:e}", spec.max) } else { format!("<{:e}", spec.max) };
        println!("{:<10}{:<10}{:<14}{:<14}", spec.parameter.name(), spec.units, min, max);
    }
}
