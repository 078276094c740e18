//! pastecondense - Condense whitespace in pasted markup

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pastecondense::{
    CondenseReport, EmptyBlockPolicy, Options, Result, condense_document_html,
    condense_html_with_report, decode_html,
};

#[derive(Parser)]
#[command(name = "pastecondense")]
#[command(version, about = "Condense whitespace in pasted markup", long_about = None)]
#[command(after_help = "EXAMPLES:
    pastecondense paste.html                 Condense a fragment to stdout
    pastecondense -d in.html -o out.html     Condense the body of a document
    pastecondense -p aggressive --stats      Read stdin, drop all empty blocks")]
struct Cli {
    /// Input file (reads stdin when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,

    /// What to do with empty blocks: conservative or aggressive
    #[arg(short, long, default_value_t = EmptyBlockPolicy::Conservative)]
    policy: EmptyBlockPolicy,

    /// Treat the input as a whole document and condense its body
    #[arg(short, long)]
    document: bool,

    /// Print what was changed as JSON on stderr
    #[arg(short, long)]
    stats: bool,

    /// Log stage activity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => "pastecondense=debug",
        _ => "pastecondense=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let bytes = match &cli.input {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };
    let html = decode_html(&bytes)?;

    let options = Options::new().with_empty_block_policy(cli.policy);
    let (condensed, report) = if cli.document {
        condense_document_html(&html, &options)
    } else {
        condense_html_with_report(&html, &options)
    };

    match &cli.output {
        Some(path) => fs::write(path, condensed)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(condensed.as_bytes())?;
            stdout.flush()?;
        }
    }

    if cli.stats {
        print_stats(&report)?;
    }
    Ok(())
}

fn print_stats(report: &CondenseReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    eprintln!("{json}");
    Ok(())
}
