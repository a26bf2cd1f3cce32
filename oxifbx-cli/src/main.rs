//! OxiFBX CLI
//!
//! Inflate zlib streams and decode array properties dumped from binary FBX
//! files.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{ArrayOptions, ChecksumArg, ElementArg, cmd_array, cmd_inflate, cmd_inspect};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oxifbx")]
#[command(author, version, about = "Pure Rust zlib inflate for FBX array properties")]
#[command(long_about = "
OxiFBX decodes the zlib streams that binary FBX files use for compressed
array properties. Use \"-\" as the input to read from stdin.

Examples:
  oxifbx inflate payload.z -o payload.bin
  oxifbx inflate payload.deflate --raw
  oxifbx inspect payload.z --json
  oxifbx array vertices.z --type d --count 72
  oxifbx array property.bin --record
")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG also works
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompress a zlib (or raw DEFLATE) stream
    #[command(alias = "x")]
    Inflate {
        /// Compressed input file
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input is a bare DEFLATE stream without zlib framing
        #[arg(long)]
        raw: bool,

        /// Adler-32 trailer handling
        #[arg(long, value_enum, default_value = "verify")]
        checksum: ChecksumArg,

        /// Refuse to produce more than this many bytes
        #[arg(long)]
        max_output: Option<usize>,
    },

    /// Show the header, blocks and trailer of a stream
    #[command(alias = "i")]
    Inspect {
        /// Compressed input file
        input: PathBuf,

        /// Input is a bare DEFLATE stream without zlib framing
        #[arg(long)]
        raw: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Decode an FBX array property
    #[command(alias = "a")]
    Array {
        /// Array payload, or a whole property record with --record
        input: PathBuf,

        /// Element type code (f, d, i, l, b)
        #[arg(short = 't', long = "type", value_enum, required_unless_present = "record")]
        element: Option<ElementArg>,

        /// Number of elements
        #[arg(short, long, required_unless_present = "record")]
        count: Option<u32>,

        /// Encoding (0 = raw, 1 = zlib)
        #[arg(short, long, default_value = "1")]
        encoding: u32,

        /// Input starts at the property type code and carries its own header
        #[arg(long, conflicts_with_all = ["element", "count"])]
        record: bool,

        /// Number of values to print
        #[arg(long, default_value = "8")]
        show: usize,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Inflate {
            input,
            output,
            raw,
            checksum,
            max_output,
        } => cmd_inflate(&input, output.as_deref(), raw, checksum, max_output),
        Commands::Inspect { input, raw, json } => cmd_inspect(&input, raw, json),
        Commands::Array {
            input,
            element,
            count,
            encoding,
            record,
            show,
        } => cmd_array(
            &input,
            &ArrayOptions {
                element,
                count,
                encoding,
                record,
                show,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
