use clap::{error::ErrorKind, Parser, ValueEnum};
use std::{path::PathBuf, process};
use stem_separate::{
    separate_file, set_progress_callback, Backend, SeparateError, SeparateOptions,
    SeparateProgress,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stem-separate")]
#[command(about = "Split a song into vocals.mp3 and accompaniment.mp3", long_about = None)]
#[command(version)]
struct Cli {
    /// Audio file to separate
    input: PathBuf,

    /// Directory that receives vocals.mp3 and accompaniment.mp3
    output: PathBuf,

    #[arg(short, long, value_enum, default_value_t = BackendArg::Auto)]
    backend: BackendArg,

    /// Demucs model name
    #[arg(short, long)]
    model: Option<String>,

    /// MP3 bitrate (kbps) requested from Demucs
    #[arg(long, default_value_t = 320)]
    bitrate: u32,

    /// ffmpeg VBR quality used when a stem needs transcoding (0 = best)
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=9))]
    quality: u8,

    /// Reuse vocals.mp3 and accompaniment.mp3 if both already exist
    #[arg(long)]
    skip_existing: bool,

    /// Leave the separator's own output directory in place
    #[arg(long)]
    keep_intermediate: bool,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "quiet")]
    json: bool,

    #[arg(short, long)]
    quiet: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Auto,
    Demucs,
    Spleeter,
}

impl BackendArg {
    fn forced(self) -> Option<Backend> {
        match self {
            BackendArg::Auto => None,
            BackendArg::Demucs => Some(Backend::Demucs),
            BackendArg::Spleeter => Some(Backend::Spleeter),
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    init_tracing(cli.verbose);

    match handle_separate(&cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            report_error(&e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_separate(cli: &Cli) -> Result<(), SeparateError> {
    let opts = SeparateOptions {
        output_dir: cli.output.clone(),
        backend: cli.backend.forced(),
        demucs_model: cli.model.clone(),
        mp3_bitrate: cli.bitrate,
        mp3_quality: cli.quality,
        skip_existing: cli.skip_existing,
        keep_intermediate: cli.keep_intermediate,
        ..SeparateOptions::default()
    };

    if !cli.quiet && !cli.json {
        setup_progress_callback(cli.input.display().to_string());
    }

    let result = separate_file(&cli.input, &opts)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if cli.quiet {
        println!("{}", result.vocals_path.display());
        println!("{}", result.accompaniment_path.display());
    } else {
        if result.backend.is_none() {
            println!("Stems already present, skipping separation.");
        }
        println!("✅ Separation complete! Files in: {}", cli.output.display());
        println!("  - vocals.mp3");
        println!("  - accompaniment.mp3");
    }

    Ok(())
}

fn setup_progress_callback(input: String) {
    set_progress_callback(move |progress| match progress {
        SeparateProgress::Probe { backend, available } => {
            println!("{backend} available: {available}");
        }
        SeparateProgress::Separate { backend } => {
            println!("🎵 Separating with {backend}: {input}");
        }
        SeparateProgress::Transcode { stem } => println!("⏳ Converting {stem} to MP3"),
        SeparateProgress::Stage(_) | SeparateProgress::Finished => {}
    });
}

fn report_error(e: &SeparateError) {
    match e {
        SeparateError::NoBackendAvailable { candidates } => {
            eprintln!("Error: {e}");
            let hints: Vec<_> = candidates.iter().map(|b| b.install_hint()).collect();
            eprintln!("Install with: {}", hints.join("  OR  "));
        }
        SeparateError::InputNotFound(_) | SeparateError::InvalidInput(_) => {
            eprintln!("Error: {e}");
        }
        _ => {
            eprintln!("{e}");
            eprintln!("Separation failed!");
        }
    }
}
