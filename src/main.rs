use anyhow::Context;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

const ABOUT: &str = "txtc, source to txt converter tool";

#[derive(Parser, Debug)]
#[command(
    name = "txtc",
    version,
    author,
    about = ABOUT,
    long_about = "Copies C/C++ sources into a parallel tree of .txt files.\n\n\
    Supported input file types:\n  \
      *.h      C Headers\n  \
      *.c      C Source\n  \
      *.hpp    C++ Headers\n  \
      *.cpp    C++ Source\n\n\
    USAGE EXAMPLES:\n  \
      # Convert the top level of a folder\n  \
      txtc -f ./include -o ./include-txt\n\n  \
      # Convert a whole tree, skipping vendored code\n  \
      txtc -f ./engine -o ./engine-txt -r --exclude '**/third_party'",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Input folder
    #[arg(short = 'f', value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output folder (created if missing)
    #[arg(short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Convert folders recursively
    #[arg(short, long)]
    recursive: bool,

    /// Glob of files or folders to skip, relative to the input folder (repeatable)
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Report what would be copied without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Verbose output (repeat for more)
    #[arg(long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Print a summary table when done
    #[arg(long)]
    summary: bool,

    /// Print run statistics as JSON on stdout (logs go to stderr)
    #[arg(long)]
    json: bool,

    /// Display this help and exit
    #[arg(short, long)]
    help: bool,

    /// Output version information and exit
    #[arg(short = 'v', long)]
    version: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("{ABOUT}, version {}.", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if cli.help {
        print_help(None);
        return ExitCode::FAILURE;
    }

    let Some(input) = cli.input.clone() else {
        print_help(Some("Input folder name must be specified."));
        return ExitCode::FAILURE;
    };

    let Some(output) = cli.output.clone() else {
        print_help(Some("Output folder name must be specified."));
        return ExitCode::FAILURE;
    };

    match convert(&cli, input, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn convert(cli: &Cli, input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    setup_tracing(cli.verbose, cli.quiet, cli.json)?;

    let config = txtc::Config::builder()
        .input_dir(input)
        .output_dir(output)
        .recursive(cli.recursive)
        .exclude(cli.exclude.clone())
        .dry_run(cli.dry_run)
        .build()
        .context("Failed to build configuration")?;

    let stats = txtc::run(config).context("Conversion failed")?;

    if cli.summary {
        stats.print_summary();
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialize statistics")?
        );
    }

    Ok(())
}

fn print_help(error: Option<&str>) {
    if let Some(error) = error {
        println!("Error:\n{error}\n");
    }

    // Nothing useful to do if stdout is gone.
    let _ = Cli::command().print_long_help();
}

fn setup_tracing(verbosity: u8, quiet: bool, json: bool) -> anyhow::Result<()> {
    let level = match (quiet, verbosity) {
        (true, _) => "txtc=warn",
        (false, 0) => "txtc=info",
        (false, 1) => "txtc=debug",
        _ => "txtc=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Keep stdout clean for the JSON document.
    let writer = if json {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_target(false)
                .with_thread_ids(false),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
