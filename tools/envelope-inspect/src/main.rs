//! envelope-inspect: look inside encoded envelopes from the command line.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use envelope_codec::{BodyEscaping, CodecConfig};
use messenger_telemetry::{codec_span, init_tracing, TelemetryConfig};

/// envelope-inspect: Envelope Codec operator tool
#[derive(Parser, Debug)]
#[command(name = "envelope-inspect")]
#[command(about = "Unescape, check, and inspect encoded envelopes")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Body escaping (backslash or hex); defaults to CODEC_BODY_ESCAPING
    #[arg(short, long, global = true)]
    escaping: Option<BodyEscaping>,

    /// Input is a JSON object of fields instead of a bare body
    #[arg(long, global = true)]
    map: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the raw serialized form of the body
    Unescape(Source),
    /// Guarded decode; exits with status 1 when decoding fails
    Check(Source),
    /// Lenient decode showing classes, data, and stamps
    Inspect(Source),
}

#[derive(clap::Args, Debug)]
struct Source {
    /// File to read; stdin when omitted
    input: Option<PathBuf>,
}

impl Command {
    fn source(&self) -> &Source {
        match self {
            Self::Unescape(source) | Self::Check(source) | Self::Inspect(source) => source,
        }
    }
}

fn read_source(source: &Source) -> Result<String> {
    match &source.input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;
            Ok(input)
        }
    }
}

fn telemetry_config() -> TelemetryConfig {
    let mut config = TelemetryConfig::for_service("envelope-inspect");
    // Keep stderr quiet unless asked.
    if env::var_os("CODEC_LOG_LEVEL").is_none() && env::var_os("RUST_LOG").is_none() {
        config.log_level = "warn".to_string();
    }
    config
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let _guard = init_tracing(&telemetry_config())?;

    let mut config = CodecConfig::from_env()?;
    if let Some(escaping) = args.escaping {
        config = config.with_escaping(escaping);
    }

    let _span = codec_span!("envelope_inspect", command = ?args.command).entered();

    let input = read_source(args.command.source())?;
    let encoded = envelope_inspect::parse_input(&input, args.map)?;

    match &args.command {
        Command::Unescape(_) => {
            println!("{}", envelope_inspect::unescape(&encoded, config.escaping)?);
        }
        Command::Check(_) => match envelope_inspect::check(&encoded, config) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                println!("{e}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Inspect(_) => {
            print!("{}", envelope_inspect::inspect(&encoded, config.escaping)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
