use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Frame Order CLI - Evaluates frame order models of inter-domain motion against RDC and PCS data.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the chi-squared of a fitting problem at one parameter vector.
    Evaluate(EvaluateArgs),
    /// Compile and print the frame order matrix of a motional model.
    Matrix(MatrixArgs),
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Path to the problem description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub problem: PathBuf,

    /// Comma-separated parameter vector, overriding `params` from the problem file.
    #[arg(long, value_name = "LIST", value_delimiter = ',', allow_negative_numbers = true)]
    pub params: Option<Vec<f64>>,

    /// Also print the frame order matrix of the evaluated parameters.
    #[arg(long)]
    pub show_matrix: bool,
}

/// Arguments for the `matrix` subcommand.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    /// Model name, e.g. 'iso cone' or 'pseudo-ellipse, torsionless'.
    #[arg(short, long, required = true, value_name = "NAME")]
    pub model: String,

    /// The model parameters in layout order, without pivot or translation.
    #[arg(required = true, value_name = "VALUE", allow_negative_numbers = true)]
    pub params: Vec<f64>,

    /// Print the matrix in the model's eigenframe instead of the reference frame.
    #[arg(long)]
    pub eigenframe: bool,
}
