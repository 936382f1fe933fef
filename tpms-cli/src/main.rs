use anyhow::Result;
use clap::{Parser, Subcommand};
use tpms_cli::commands;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "tpms")]
#[command(about = "Subaru TPMS - decode tire pressure sensor frames from demodulated rows", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode captured rows and report sensor readings
    Decode {
        /// Input file with one `{bits}hex` row per line ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Output JSON file for decoded records
        #[arg(short, long)]
        output: Option<String>,

        /// Show statistics only
        #[arg(long)]
        stats_only: bool,

        /// Decoder configuration (JSON)
        #[arg(long)]
        config: Option<String>,
    },

    /// Synthesize rows that decode to the given reading
    Synth {
        /// Output file for rows
        #[arg(short, long)]
        output: String,

        /// Sensor ID (24 bits, e.g. 0xA3C2F1)
        #[arg(long, value_parser = parse_id)]
        id: u32,

        /// Raw pressure
        #[arg(long, default_value = "0")]
        pressure: u16,

        /// Temperature in °C
        #[arg(long, default_value = "20", allow_hyphen_values = true)]
        temperature: i16,

        /// Status byte (e.g. 0x0E or 0b00001110)
        #[arg(long, default_value = "0", value_parser = parse_status)]
        status: u8,

        /// Zero bits before the preamble
        #[arg(long, default_value = "0")]
        lead_bits: usize,

        /// Number of rows to write
        #[arg(long, default_value = "1")]
        count: usize,
    },

    /// Check the SUM8 checksum of a 16 hex digit frame
    Check {
        /// Frame bytes as hex, e.g. 001122334464000E
        frame: String,
    },
}

fn parse_id(s: &str) -> Result<u32, String> {
    tpms_cli::parse_int(s).map_err(|e| e.to_string())
}

fn parse_status(s: &str) -> Result<u8, String> {
    let value = tpms_cli::parse_int(s).map_err(|e| e.to_string())?;
    u8::try_from(value).map_err(|_| format!("status {} does not fit in a byte", value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Decode {
            input,
            output,
            stats_only,
            config,
        } => commands::decode::execute(&input, output.as_deref(), stats_only, config.as_deref())
            .map(|_| ()),

        Commands::Synth {
            output,
            id,
            pressure,
            temperature,
            status,
            lead_bits,
            count,
        } => commands::synth::execute(&output, id, pressure, temperature, status, lead_bits, count),

        Commands::Check { frame } => commands::check::execute(&frame).map(|_| ()),
    }
}
