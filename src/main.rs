use bytefreq::batch::BatchProcessor;
use bytefreq::codec::ExpansionOrder;
use bytefreq::decode::{decode_to, load_record};
use bytefreq::options::{CodecOptions, DEFAULT_OUTPUT_DIR};
use bytefreq::{analyze_file, logging, CodecError};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bytefreq", version, about = "Byte-frequency analyzer and expander")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Directory for analysis and batch output
    #[arg(short, long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    /// Run order: rank (count desc) or positional (on-disk order)
    #[arg(long, global = true, value_parser = parse_order)]
    order: Option<ExpansionOrder>,
    /// More log output (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Errors only
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Histogram a file and write the record to <output-dir>/analysis
    Analyze {
        input: PathBuf,
    },
    /// Expand a record to stdout (rank order by default)
    Decode {
        input: PathBuf,
    },
    /// Expand every record in a directory into <output-dir> (positional order by default)
    Batch {
        dir: PathBuf,
    },
    /// Print the entry table of a record
    Inspect {
        input: PathBuf,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CodecError> {
    let mut opts = CodecOptions::default().with_output_dir(&cli.output_dir);
    if let Some(order) = cli.order {
        opts = opts.with_order(order);
    }

    match cli.command {

        // ── Analyze ──────────────────────────────────────────────────────────
        Commands::Analyze { input } => {
            let summary = analyze_file(&input, &opts)?;
            println!(
                "File analyzed and intermediate record saved to {} ({} bytes, {} distinct)",
                summary.output.display(),
                summary.total_bytes,
                summary.unique_count
            );
        }

        // ── Decode ───────────────────────────────────────────────────────────
        Commands::Decode { input } => {
            let stdout = std::io::stdout();
            let written = decode_to(&input, opts.decode_order, stdout.lock())?;
            tracing::info!(path = %input.display(), bytes = written, "decoded message");
        }

        // ── Batch ────────────────────────────────────────────────────────────
        Commands::Batch { dir } => {
            let processor = BatchProcessor::new(&opts);
            let report = processor.run(&dir)?;
            for d in &report.decoded {
                println!("  decoded {} -> {}", d.input.display(), d.output.display());
            }
            println!("{}", report.summary(processor.order()));
        }

        // ── Inspect ──────────────────────────────────────────────────────────
        Commands::Inspect { input, json } => {
            let record = load_record(&input)?;
            if json {
                let view = serde_json::json!({
                    "path":         input.display().to_string(),
                    "unique_count": record.unique_count(),
                    "total":        record.total(),
                    "entries":      record.entries(),
                });
                println!("{view:#}");
            } else {
                println!("Record: {}", input.display());
                println!("{:>6} {:>5} {:>12}", "Symbol", "Char", "Count");
                for e in record.entries() {
                    println!("  0x{:02x} {:>5} {:>12}", e.symbol, glyph(e.symbol), e.count);
                }
                println!("{} distinct, {} total", record.unique_count(), record.total());
            }
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn parse_order(s: &str) -> Result<ExpansionOrder, String> {
    ExpansionOrder::from_name(s).ok_or_else(|| format!("unknown order '{s}' (expected rank or positional)"))
}

fn glyph(b: u8) -> String {
    if b.is_ascii_graphic() {
        (b as char).to_string()
    } else {
        "·".into()
    }
}
