use clap::{Args, Parser, Subcommand};
use log::error;
use mp4flags::{FourCC, Mp4FlagsResult, Operation, Outcome, PatchOptions, TrackFlag};
use std::io;
use std::path::PathBuf;

/// List MP4 tracks and flip their default and forced flags in place.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every track as JSON.
    List {
        /// MP4 file to inspect.
        file: PathBuf,
    },
    /// Turn a flag on.
    Set(FlagArgs),
    /// Turn a flag off.
    Unset(FlagArgs),
}

#[derive(Debug, Args)]
struct FlagArgs {
    /// MP4 file to patch in place.
    file: PathBuf,

    /// Id of the track as shown by `list`.
    track_id: u32,

    /// Flag to change: default or forced.
    flag: TrackFlag,

    /// Show the bytes that would change without writing them.
    #[arg(long)]
    dry_run: bool,

    /// Sample entry format to restore when unsetting forced (e.g. tx3g).
    #[arg(long, value_name = "FOURCC")]
    restore_format: Option<FourCC>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Mp4FlagsResult<()> {
    let (file, operation, options) = match cli.command {
        Command::List { file } => (file, Operation::List, PatchOptions::default()),
        Command::Set(args) => flag_operation(args, true),
        Command::Unset(args) => flag_operation(args, false),
    };

    match operation.run(&file, &options)? {
        Outcome::Tracks(tracks) => {
            let json = serde_json::to_string_pretty(&tracks).map_err(io::Error::from)?;
            println!("{}", json);
        }
        Outcome::Patched(patch) if options.dry_run => println!("would patch {}", patch),
        Outcome::Patched(patch) if patch.is_noop() => println!("unchanged"),
        Outcome::Patched(patch) => println!("patched {}", patch),
    }
    Ok(())
}

fn flag_operation(args: FlagArgs, value: bool) -> (PathBuf, Operation, PatchOptions) {
    let operation = Operation::SetFlag {
        track_id: args.track_id,
        flag: args.flag,
        value,
    };
    let options = PatchOptions {
        dry_run: args.dry_run,
        restore_format: args.restore_format,
    };
    (args.file, operation, options)
}
