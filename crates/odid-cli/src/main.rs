use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use odid_cli::{decode_inputs, pack_messages, render, BroadcastProfile, CliError, OutputFormat};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "odid", version, about = "Decode and build Open Drone ID messages")]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode hex-encoded messages, one per argument or per stdin line
    Decode {
        /// Messages as hex; read from stdin when omitted
        hex: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Build the messages described by a broadcast profile
    Build {
        /// YAML broadcast profile
        profile: PathBuf,

        /// Emit a single Message Pack instead of one line per message
        #[arg(long)]
        pack: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_stdin_lines() -> Result<Vec<String>, CliError> {
    let mut lines = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Decode { hex, format } => {
            let inputs = if hex.is_empty() {
                read_stdin_lines()?
            } else {
                hex
            };
            info!(count = inputs.len(), "decoding messages");
            let report = decode_inputs(&inputs)?;
            println!("{}", render(&report, format)?);
        }
        Command::Build { profile, pack } => {
            let profile_data = BroadcastProfile::load(&profile)?;
            let messages = profile_data.build()?;
            if pack {
                println!("{}", pack_messages(&messages, profile_data.version)?.to_hex());
            } else {
                for message in &messages {
                    println!("{}", message.to_hex());
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
