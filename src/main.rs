use clap::Parser;
use royalbit_inspect::cli;
use royalbit_inspect::error::InspectResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "inspect-workbook")]
#[command(version)]
#[command(about = "Print the values and formulas of a workbook's active sheet")]
#[command(long_about = "Inspect - dump a workbook's active sheet

Opens the workbook with formula text preserved, selects the sheet that was
active when the file was saved, and prints every populated cell in
rows 1-40, columns A-O.

OUTPUT:
  Sheet: Sheet1
  Dimensions: A1:C3

  === All cells with values ===

  A1: Flow Rate
  B1: 100
  C2: FORMULA: =A1*2

EXAMPLES:
  inspect-workbook                          # Default development workbook
  inspect-workbook calculator.xlsx
  INSPECT_WORKBOOK=calculator.xlsx inspect-workbook -v")]
struct Cli {
    /// Path to the workbook (.xlsx, .xlsm, .xlsb, .xls, .ods)
    #[arg(env = "INSPECT_WORKBOOK", default_value = cli::DEFAULT_WORKBOOK_PATH)]
    file: PathBuf,

    /// Show progress and debug logs on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> InspectResult<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    cli::inspect(args.file, args.verbose)
}
