use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use overtone_lab::audio::AudioError;
use overtone_lab::config::{self, Config};
use overtone_lab::features::{self, FeatureError};
use overtone_lab::pitch::{self, A4};
use overtone_lab::synth::{Chord, SynthError, Tone};

/// Overtone chord synthesis and spectral feature extraction
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults are used when it does not exist)
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract spectral centroid and inharmonicity from tone samples
    Analyze(AnalyzeArgs),

    /// Synthesize 12-TET and just intonation chords and print frequency tables
    Synth(SynthArgs),
}

/// Extract spectral centroid and inharmonicity from tone samples
#[derive(Parser)]
struct AnalyzeArgs {
    /// Directory containing one `<N>Hz` subdirectory of WAV files per fundamental
    #[arg(long)]
    sounds_dir: Option<PathBuf>,

    /// Path of the CSV table to write
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Synthesize 12-TET and just intonation chords and print frequency tables
#[derive(Parser)]
struct SynthArgs {
    /// Root directory for the `12tet` and `just` output folders
    #[arg(long)]
    audio_dir: Option<PathBuf>,

    /// Number of overtones above each fundamental
    #[arg(short = 'n', long)]
    overtones: Option<usize>,

    /// Chord length in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Only print the frequency tables
    #[arg(long)]
    tables_only: bool,

    /// Extra chord written to `<audio_dir>/custom`, as note names or Hz (e.g. `A4,C#5,660.0`)
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    chord: Vec<Tone>,
}

/// Chords rendered in 12-TET, by note name
const TWELVE_TET_CHORDS: [&[&str]; 4] = [&["A4"], &["C#5"], &["E5"], &["A4", "C#5", "E5"]];

fn run_analyze_command(args: &AnalyzeArgs, config: &Config) -> Result<(), FeatureError> {
    let sounds_dir = args
        .sounds_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.analysis.sounds_dir));
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.analysis.output_csv));

    let rows = features::extract_directory(&sounds_dir, &config.analysis_config())?;
    features::write_csv(&output, &rows)?;
    info!("Wrote {}", output.display());

    Ok(())
}

fn write_chords(chords: &[Chord], dir: &Path, config: &Config) -> Result<(), SynthError> {
    fs::create_dir_all(dir).map_err(AudioError::Io)?;
    let settings = config.synth_settings();

    for chord in chords {
        let outpath = dir.join(chord.file_name(settings.n_overtones));
        chord.to_audio(&outpath, &settings)?;
    }

    Ok(())
}

fn print_tables(n_overtones: usize) -> Result<(), pitch::PitchError> {
    println!("12-TONE EQUAL TEMPERAMENT\n");
    for row in pitch::equal_temperament_table(
        pitch::TABLE_FIRST_NOTE,
        pitch::TABLE_END_NOTE,
        n_overtones,
    )? {
        println!("{}", row);
    }

    println!("\n\nJUST INTONATION (PYTHAGOREAN TUNING)\n");
    for row in pitch::just_intonation_table(A4, n_overtones) {
        println!("{}", row);
    }

    Ok(())
}

fn run_synth_command(args: &SynthArgs, config: &mut Config) -> Result<(), SynthError> {
    if let Some(dir) = &args.audio_dir {
        config.synth.audio_dir = dir.to_string_lossy().into_owned();
    }
    if let Some(n) = args.overtones {
        config.synth.n_overtones = n;
    }
    if let Some(duration) = args.duration {
        config.synth.duration = duration;
    }

    if !args.tables_only {
        let twelve_tet = TWELVE_TET_CHORDS
            .iter()
            .map(|notes| Chord::from_notes(*notes))
            .collect::<Result<Vec<Chord>, SynthError>>()?;
        write_chords(&twelve_tet, &config.twelve_tet_dir(), config)?;

        // A4 as the base note covers A4 to G#5
        let just_cs5 = A4 * pitch::interval_ratio("major third")?;
        let just_e5 = A4 * pitch::interval_ratio("perfect fifth")?;
        let just = [
            vec![A4],
            vec![just_cs5],
            vec![just_e5],
            vec![A4, just_cs5, just_e5],
        ]
        .iter()
        .map(|freqs| Chord::from_frequencies(freqs))
        .collect::<Result<Vec<Chord>, SynthError>>()?;
        write_chords(&just, &config.just_dir(), config)?;

        if !args.chord.is_empty() {
            let custom = Chord::new(args.chord.clone())?;
            write_chords(&[custom], &config.custom_dir(), config)?;
        }
    }

    print_tables(config.synth.n_overtones)?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "overtone_lab=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = config::load_config_from(&cli.config)?;

    match &cli.command {
        Commands::Analyze(args) => run_analyze_command(args, &config)?,
        Commands::Synth(args) => run_synth_command(args, &mut config)?,
    }

    Ok(())
}

fn main() {
    init_tracing();

    match run() {
        Ok(_) => {}
        Err(err) => {
            eprintln!("\nERROR: {}\n", err);
            if let Some(FeatureError::InvalidFundamental(_)) = err.downcast_ref::<FeatureError>() {
                eprintln!("Sound files must live in a directory named after their fundamental,");
                eprintln!("for example: audio/Sounds-v0/440Hz/sample.wav");
            }
            process::exit(1);
        }
    }
}
