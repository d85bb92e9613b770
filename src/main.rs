//! teiclean - strip TEI markup down to its text skeleton

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use teiclean::{CleanOptions, SerializeOptions, clean_file};

#[derive(Parser)]
#[command(name = "teiclean")]
#[command(version, about = "Clean TEI XML down to its text skeleton", long_about = None)]
#[command(after_help = "EXAMPLES:
    teiclean play.xml play_clean.xml      Clean a file
    teiclean --segment play.xml           Clean and split sentences, print to stdout
    RUST_LOG=teiclean=debug teiclean play.xml out.xml --report")]
struct Cli {
    /// Input TEI document
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (stdout when omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<String>,

    /// Split paragraphs into <seg> sentences after cleaning
    #[arg(long)]
    segment: bool,

    /// Pair each <seg> sentence as <choice><orig/><reg/></choice> (use with --segment)
    #[arg(long)]
    orig_reg: bool,

    /// Re-join words split by <lb break="no"/> before cleaning
    #[arg(long)]
    rejoin_words: bool,

    /// Write without indentation
    #[arg(long)]
    compact: bool,

    /// Print a JSON report of rule matches to stderr
    #[arg(long)]
    report: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teiclean=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let options = CleanOptions::new()
        .with_segmentation(cli.segment)
        .with_orig_reg(cli.orig_reg)
        .with_rejoin_words(cli.rejoin_words);
    let serialize = if cli.compact {
        SerializeOptions::new().with_indent(None)
    } else {
        SerializeOptions::default()
    };

    let cleaned = clean_file(&cli.input, &options).map_err(|e| e.to_string())?;

    match &cli.output {
        Some(path) => {
            cleaned.write(path, &serialize).map_err(|e| e.to_string())?;
            if !cli.quiet {
                eprintln!("{} -> {}", cli.input, path);
            }
        }
        None => teiclean::write_to(&cleaned.document, &serialize, io::stdout().lock())
            .map_err(|e| e.to_string())?,
    }

    if cli.report {
        let json = serde_json::to_string_pretty(&cleaned.report).map_err(|e| e.to_string())?;
        eprintln!("{json}");
    }

    Ok(())
}
