use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{ArgAction, Parser, ValueEnum};
use devconf::{DevconfError, GeneratorOptions, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "devconf", version, about = "Compile a configuration description into a macro header")]
struct Cli {
    /// Source document.
    file: PathBuf,

    /// Output path; written only when compilation succeeds.
    #[arg(short, long)]
    output: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Header)]
    format: FormatChoice,

    /// Generator options (JSON: `{"prefix": "DC", "separator": "_"}`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Header,
    Json,
}

impl From<FormatChoice> for OutputFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Header => OutputFormat::Header,
            FormatChoice::Json => OutputFormat::Json,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = match &cli.config {
        Some(path) => GeneratorOptions::from_json_file(path)?,
        None => GeneratorOptions::default(),
    };

    let table = devconf::compile_file(&cli.file, &options)?;
    tracing::info!(macros = table.len(), "compiled {}", cli.file.display());

    if let Some(parent) = cli.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    table.write_to(&cli.output, cli.format.into())?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Crate errors already carry their own "Error:" prefix.
            match err.downcast_ref::<DevconfError>() {
                Some(DevconfError::Other(inner)) => eprintln!("Error: {inner:#}"),
                Some(e) => eprintln!("{e}"),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
